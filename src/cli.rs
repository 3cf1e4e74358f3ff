//! Command line of the benchmark executables.
//! Each executable has its own `Args` struct,
//! all of them share `CommonArgs` and turn into a `RunContext`.

use crate::build_info;
use crate::config::*;
use crate::decomposition::PartitionPolicy;
use crate::error::*;
use clap::{Args, CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

#[cfg(feature = "profile-with-puffin")]
use std::sync::{Mutex, OnceLock};

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: OnceLock<Mutex<puffin_http::Server>> = OnceLock::new();

/// Options every benchmark executable accepts.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// File to append the wall-clock time to.
    #[arg(long)]
    pub results_file: Option<PathBuf>,

    /// Seed for the random matrix fill, fresh entropy if not given.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How rows that do not divide evenly are handed out.
    #[arg(long, value_enum, default_value = "balanced")]
    pub policy: PartitionPolicy,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

/// Options of the Jacobi executables.
#[derive(Args, Debug, Clone)]
pub struct JacobiArgs {
    /// Number of sweeps (upper bound when a tolerance is given).
    #[arg(long, default_value_t = MAX_ITERS)]
    pub iterations: usize,

    /// Stop early once a sweep changes the grid by less than this.
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl JacobiArgs {
    pub fn termination(&self) -> Termination {
        match self.tolerance {
            Some(epsilon) => Termination::ConvergenceThreshold {
                epsilon,
                max_iterations: self.iterations,
            },
            None => Termination::FixedIterations(self.iterations),
        }
    }
}

/// Sequential cache-blocked matrix multiplication
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct MatMulSequentialArgs {
    /// Matrices are matrix_size x matrix_size.
    #[arg(required_unless_present = "build_info")]
    pub matrix_size: Option<usize>,

    /// Tile edge for cache blocking.
    #[arg(long, default_value_t = BLOCK_SIZE)]
    pub block_size: usize,

    /// Plain i-j-k loops instead of tiles.
    #[arg(long)]
    pub no_blocking: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Matrix multiplication with one forked process per row range
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct MatMulProcessesArgs {
    /// Matrices are matrix_size x matrix_size.
    #[arg(required_unless_present = "build_info")]
    pub matrix_size: Option<usize>,

    /// Defaults to the number of available cores.
    pub num_processes: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Matrix multiplication with one thread per row range
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct MatMulThreadsArgs {
    /// Matrices are matrix_size x matrix_size.
    #[arg(required_unless_present = "build_info")]
    pub matrix_size: Option<usize>,

    /// At most 12.
    #[arg(required_unless_present = "build_info")]
    pub num_threads: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Jacobi relaxation with 12 forked processes per sweep
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct JacobiProcessesArgs {
    /// Grid is grid_size x grid_size, at least 3.
    #[arg(required_unless_present = "build_info")]
    pub grid_size: Option<usize>,

    /// Put both grids in shared memory so sweeps build on each other.
    /// Without it every sweep starts again from the initial grid.
    #[arg(long)]
    pub shared_grids: bool,

    #[command(flatten)]
    pub jacobi: JacobiArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Jacobi relaxation with one thread per row range
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct JacobiThreadsArgs {
    /// Grid is grid_size x grid_size, at least 3.
    #[arg(required_unless_present = "build_info")]
    pub grid_size: Option<usize>,

    #[arg(required_unless_present = "build_info")]
    pub num_threads: Option<usize>,

    #[command(flatten)]
    pub jacobi: JacobiArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub trait BenchArgs: Parser {
    fn common(&self) -> &CommonArgs;

    /// Results file used when `--results-file` is not given.
    fn default_results_file(&self) -> &'static str {
        RESULTS_FILE
    }

    /// Context without the shared options applied.
    fn base_context(&self) -> RunContext;

    fn run_context(&self) -> RunContext {
        let common = self.common();
        let results_path = common
            .results_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.default_results_file()));
        self.base_context()
            .with_policy(common.policy)
            .with_seed(common.seed)
            .with_results_path(results_path)
    }

    /// Parse the command line.
    /// Unparsable arguments exit with status 1.
    fn cli_setup(name: &str) -> Self {
        let args = match Self::try_parse() {
            Ok(args) => args,
            Err(e) if !e.use_stderr() => e.exit(),
            Err(e) => {
                let _ = e.print();
                std::process::exit(1);
            }
        };

        if args.common().build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        #[cfg(feature = "profile-with-puffin")]
        start_profiling_server();

        args
    }
}

/// Logger of the executables, warnings and errors unless `RUST_LOG` says
/// otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();
}

#[cfg(feature = "profile-with-puffin")]
fn start_profiling_server() {
    let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&server_addr) {
        Ok(server) => {
            println!(
                "Run this to view profiling data:  puffin_viewer {server_addr}"
            );
            let _ = PUFFIN_SERVER.set(Mutex::new(server));
            profiling::puffin::set_scopes_on(true);
        }
        Err(e) => {
            log::warn!("profiling server on {server_addr} not started: {e}")
        }
    }
}

impl BenchArgs for MatMulSequentialArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn base_context(&self) -> RunContext {
        let block_size = (!self.no_blocking).then_some(self.block_size);
        RunContext::for_matmul(size(self.matrix_size), 1)
            .with_block_size(block_size)
    }
}

impl BenchArgs for MatMulProcessesArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn default_results_file(&self) -> &'static str {
        PROCESS_RESULTS_FILE
    }

    fn base_context(&self) -> RunContext {
        let workers = self.num_processes.unwrap_or_else(available_cores);
        RunContext::for_matmul(size(self.matrix_size), workers)
    }
}

impl BenchArgs for MatMulThreadsArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn base_context(&self) -> RunContext {
        RunContext::for_matmul(
            size(self.matrix_size),
            size(self.num_threads),
        )
        .with_max_workers(MAX_THREADS)
    }
}

impl BenchArgs for JacobiProcessesArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn default_results_file(&self) -> &'static str {
        PROCESS_RESULTS_FILE
    }

    fn base_context(&self) -> RunContext {
        RunContext::for_jacobi(size(self.grid_size), JACOBI_PROCESSES)
            .with_termination(self.jacobi.termination())
            .with_shared_grids(self.shared_grids)
    }
}

impl BenchArgs for JacobiThreadsArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn base_context(&self) -> RunContext {
        RunContext::for_jacobi(size(self.grid_size), size(self.num_threads))
            .with_termination(self.jacobi.termination())
    }
}

/// Positionals are only absent together with `--build-info`,
/// which exits before a context is built. Zero is rejected by validation.
fn size(value: Option<usize>) -> usize {
    value.unwrap_or_default()
}

/// Online cores, 1 if that can not be determined.
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Exit status of a run: 0 on success, 1 with a message otherwise.
/// Invalid arguments also print the usage line.
pub fn exit_status<A: BenchArgs>(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, BenchError::InvalidArgument(_)) {
                eprintln!("{}", A::command().render_usage());
            }
            ExitCode::FAILURE
        }
    }
}
