use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cubesolver_cli::output::OutputFormat;
use cubesolver_lib::{FallbackPolicy, DEFAULT_SCRAMBLE_LENGTH};

mod commands;

use commands::solve::SolverOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rubik's Cube solving and scrambling utilities")]
struct Cli {
    /// External solver program that takes a 54-character facelet string.
    #[arg(long, env = "CUBE_SOLVER_COMMAND", global = true)]
    solver: Option<String>,

    /// Extra arguments passed to the solver before the facelet string.
    #[arg(
        long = "solver-arg",
        env = "CUBE_SOLVER_ARGS",
        value_delimiter = ' ',
        allow_hyphen_values = true,
        global = true
    )]
    solver_args: Vec<String>,

    /// Time limit for the external solver, in milliseconds.
    #[arg(long, env = "CUBE_SOLVER_TIMEOUT_MS", global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a cube state read from a file or stdin.
    Solve {
        /// JSON file holding the cube state (stdin when omitted).
        #[arg(long)]
        file: Option<PathBuf>,
        /// Fail instead of printing random placeholder moves when the solver fails.
        #[arg(long)]
        no_fallback: bool,
        /// Print JSON instead of plain moves.
        #[arg(long)]
        json: bool,
    },
    /// Generate a random scramble.
    Scramble {
        /// Number of moves.
        #[arg(long, default_value_t = DEFAULT_SCRAMBLE_LENGTH)]
        length: usize,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Print JSON instead of plain moves.
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in sample cube state.
    Sample {
        /// Print the state as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check a cube state and print its facelet encoding.
    Validate {
        /// JSON file holding the cube state (stdin when omitted).
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut options = SolverOptions {
        command: cli.solver.filter(|s| !s.trim().is_empty()),
        args: cli.solver_args.into_iter().filter(|a| !a.is_empty()).collect(),
        timeout: cli.timeout_ms.map(Duration::from_millis),
        fallback: FallbackPolicy::Enabled,
    };

    match cli.command {
        Command::Solve {
            file,
            no_fallback,
            json,
        } => {
            options.fallback = FallbackPolicy::from(!no_fallback);
            commands::solve::handle_solve(
                file.as_deref(),
                &options,
                OutputFormat::from_json_flag(json),
            )
        }
        Command::Scramble { length, seed, json } => {
            commands::scramble::handle_scramble(length, seed, OutputFormat::from_json_flag(json))
        }
        Command::Sample { json } => {
            commands::sample::handle_sample(OutputFormat::from_json_flag(json))
        }
        Command::Validate { file } => commands::validate::handle_validate(file.as_deref()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
