use partbench::cli::*;
use partbench::error::*;
use partbench::solver::bench::run_matmul;
use partbench::strategy::*;
use std::process::ExitCode;

fn run(args: &MatMulThreadsArgs) -> Result<()> {
    let ctx = args.run_context();
    ctx.validate()?;
    let strategy = Strategy::new(StrategyKind::Threads, ctx.workers, None)?;
    let report = run_matmul(&ctx, &strategy)?;
    report.print();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = MatMulThreadsArgs::cli_setup("matmul_threads");
    exit_status::<MatMulThreadsArgs>(run(&args))
}
