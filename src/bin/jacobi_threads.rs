use partbench::cli::*;
use partbench::error::*;
use partbench::solver::bench::run_jacobi;
use partbench::strategy::*;
use std::process::ExitCode;

fn run(args: &JacobiThreadsArgs) -> Result<()> {
    let ctx = args.run_context();
    ctx.validate()?;
    let strategy = Strategy::new(StrategyKind::Threads, ctx.workers, None)?;
    let report = run_jacobi(&ctx, &strategy)?;
    report.print();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = JacobiThreadsArgs::cli_setup("jacobi_threads");
    exit_status::<JacobiThreadsArgs>(run(&args))
}
