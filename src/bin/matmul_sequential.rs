use partbench::cli::*;
use partbench::error::*;
use partbench::solver::bench::run_matmul;
use partbench::strategy::*;
use std::process::ExitCode;

fn run(args: &MatMulSequentialArgs) -> Result<()> {
    let ctx = args.run_context();
    ctx.validate()?;
    let strategy = Strategy::new(StrategyKind::Sequential, 1, ctx.block_size)?;
    let report = run_matmul(&ctx, &strategy)?;
    report.print();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = MatMulSequentialArgs::cli_setup("matmul_sequential");
    exit_status::<MatMulSequentialArgs>(run(&args))
}
