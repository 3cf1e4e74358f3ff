use partbench::cli::*;
use partbench::error::*;
use partbench::solver::bench::run_matmul;
use partbench::strategy::*;
use std::process::ExitCode;

fn run(args: &MatMulProcessesArgs) -> Result<()> {
    let ctx = args.run_context();
    ctx.validate()?;
    println!(
        "Using {} processes for a {n}x{n} matrix.",
        ctx.workers,
        n = ctx.n
    );
    let strategy = Strategy::new(StrategyKind::Processes, ctx.workers, None)?;
    let report = run_matmul(&ctx, &strategy)?;
    report.print();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = MatMulProcessesArgs::cli_setup("matmul_processes");
    exit_status::<MatMulProcessesArgs>(run(&args))
}
