use partbench::cli::*;
use partbench::error::*;
use partbench::solver::bench::run_jacobi;
use partbench::strategy::*;
use std::process::ExitCode;

fn run(args: &JacobiProcessesArgs) -> Result<()> {
    let ctx = args.run_context();
    ctx.validate()?;
    if !ctx.shared_grids {
        log::warn!(
            "private grids: every sweep restarts from the initial grid, \
             pass --shared-grids to propagate sweeps"
        );
    }
    let strategy = Strategy::new(StrategyKind::Processes, ctx.workers, None)?;
    let report = run_jacobi(&ctx, &strategy)?;
    report.print();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = JacobiProcessesArgs::cli_setup("jacobi_processes");
    exit_status::<JacobiProcessesArgs>(run(&args))
}
