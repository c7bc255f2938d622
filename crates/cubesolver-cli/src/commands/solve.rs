//! Solve command handler.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

use cubesolver_cli::input::read_cube_state;
use cubesolver_cli::output::{render_solution, OutputFormat};
use cubesolver_lib::{CommandSolver, CubeSolver, FaceletSolver, FallbackPolicy, UnavailableSolver};

/// External solver settings gathered from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    pub command: Option<String>,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
    pub fallback: FallbackPolicy,
}

impl SolverOptions {
    /// Build the orchestrator for these options.
    pub fn build(&self) -> CubeSolver {
        let backend: Box<dyn FaceletSolver> = match &self.command {
            Some(program) => {
                let solver = CommandSolver::new(program.as_str())
                    .with_args(self.args.iter().cloned())
                    .with_timeout(self.timeout);
                Box::new(solver)
            }
            None => Box::new(UnavailableSolver),
        };
        CubeSolver::new(backend, self.fallback)
    }
}

/// Handle the solve subcommand.
///
/// Reads the state from `file` or stdin, rejects invalid states, and prints
/// the move sequence.
pub fn handle_solve(
    file: Option<&Path>,
    options: &SolverOptions,
    format: OutputFormat,
) -> Result<()> {
    let state = read_cube_state(file)?;
    state
        .validate()
        .map_err(|e| anyhow!("Invalid cube state: {e}"))?;

    let solver = options.build();
    info!(solver = solver.backend().name(), "solving cube state");

    let Some(solution) = solver.solve(&state)? else {
        bail!("No solution found");
    };

    if solution.is_fallback() {
        warn!(
            moves = solution.move_count(),
            "external solver unavailable; these moves are a random placeholder"
        );
    } else if solution.moves.is_empty() {
        info!("cube is already solved");
    }

    println!("{}", render_solution(&solution, format));
    Ok(())
}
