//! Solve orchestration and external solver adapters.
//!
//! This module provides:
//! - [`FaceletSolver`] - The boundary to an external solving algorithm
//! - [`CommandSolver`] - Adapter that runs an external program (e.g. `kociemba`)
//! - [`UnavailableSolver`] - Adapter used when no solver is configured
//! - [`CubeSolver`] - Orchestrator: solved check, conversion, external call, fallback
//!
//! # Fallback
//!
//! When the external solver fails or answers with nothing usable, the
//! orchestrator can return a random move sequence instead. That sequence is a
//! placeholder and does not solve the cube; [`SolutionSource::RandomFallback`]
//! marks it so callers can tell it apart from a real answer.
//!
//! # Example
//!
//! ```
//! use cubesolver_lib::{CubeSolver, CubeState, FallbackPolicy, UnavailableSolver};
//!
//! let solver = CubeSolver::new(UnavailableSolver, FallbackPolicy::Enabled);
//! let solution = solver.solve(&CubeState::solved()).unwrap().unwrap();
//! assert!(solution.moves.is_empty());
//! ```

use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::cube::CubeState;
use crate::error::{Error, Result};
use crate::facelets::{to_facelets, FaceletString};
use crate::moves::Move;
use crate::scramble::random_moves;

/// Boundary to an external solving algorithm.
///
/// Implementations map a facelet string to a whitespace-delimited move list.
/// An empty reply means the solver produced nothing.
pub trait FaceletSolver: Send + Sync {
    /// Short identifier used in logs and health output.
    fn name(&self) -> &str;

    /// Solve the cube described by `facelets`.
    fn solve(&self, facelets: &FaceletString) -> Result<String>;

    /// False for placeholder backends that never produce a solution.
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: FaceletSolver + ?Sized> FaceletSolver for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, facelets: &FaceletString) -> Result<String> {
        (**self).solve(facelets)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Solver that always fails; every unsolved cube goes to the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSolver;

impl FaceletSolver for UnavailableSolver {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn solve(&self, _facelets: &FaceletString) -> Result<String> {
        Err(Error::SolverUnavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Runs an external program with the facelet string as its final argument.
///
/// The program's trimmed stdout is the move list. A non-zero exit status is a
/// solver failure carrying the program's stderr. Without a timeout the call
/// waits for the program to exit.
#[derive(Debug, Clone)]
pub struct CommandSolver {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandSolver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Arguments placed before the facelet string.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Kill the program if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, message: impl Into<String>) -> Error {
        Error::Solver {
            solver: self.name().to_string(),
            message: message.into(),
        }
    }
}

impl FaceletSolver for CommandSolver {
    fn name(&self) -> &str {
        &self.program
    }

    fn solve(&self, facelets: &FaceletString) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(facelets.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("failed to start: {e}")))?;

        // Both pipes are drained while waiting so a chatty program cannot
        // block on a full pipe buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            None => child
                .wait()
                .map_err(|e| self.failure(format!("failed to wait: {e}")))?,
            Some(timeout) => match child
                .wait_timeout(timeout)
                .map_err(|e| self.failure(format!("failed to wait: {e}")))?
            {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Readers are left detached: a grandchild may still hold the pipes.
                    return Err(Error::SolverTimeout {
                        solver: self.name().to_string(),
                        timeout,
                    });
                }
            },
        };

        let stdout = self.collect(stdout)?;
        if !status.success() {
            let stderr = self.collect(stderr)?;
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(self.failure(format!("exited with {status}: {detail}")));
        }

        Ok(stdout.trim().to_string())
    }
}

type PipeReader = thread::JoinHandle<io::Result<String>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> PipeReader {
    thread::spawn(move || {
        let mut text = String::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_string(&mut text)?;
        }
        Ok(text)
    })
}

impl CommandSolver {
    fn collect(&self, reader: PipeReader) -> Result<String> {
        match reader.join() {
            Ok(text) => Ok(text?),
            Err(_) => Err(self.failure("output reader panicked")),
        }
    }
}

/// Whether the orchestrator substitutes random moves when the solver fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Return a random placeholder sequence (the historical behavior).
    #[default]
    Enabled,
    /// Report "no solution" instead.
    Disabled,
}

impl FallbackPolicy {
    pub fn is_enabled(self) -> bool {
        self == FallbackPolicy::Enabled
    }
}

impl From<bool> for FallbackPolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            FallbackPolicy::Enabled
        } else {
            FallbackPolicy::Disabled
        }
    }
}

/// Where a solution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionSource {
    /// Every face was already uniform; no moves were needed.
    AlreadySolved,
    /// The external solver produced the moves.
    External,
    /// Random placeholder moves; not a real solution.
    RandomFallback,
}

impl SolutionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SolutionSource::AlreadySolved => "already_solved",
            SolutionSource::External => "external",
            SolutionSource::RandomFallback => "random_fallback",
        }
    }
}

impl std::fmt::Display for SolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered move sequence answering a solve request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub source: SolutionSource,
}

impl Solution {
    pub fn already_solved() -> Self {
        Self {
            moves: Vec::new(),
            source: SolutionSource::AlreadySolved,
        }
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SolutionSource::RandomFallback
    }
}

/// Stateless solve orchestrator around a [`FaceletSolver`].
#[derive(Debug, Clone)]
pub struct CubeSolver<S = Box<dyn FaceletSolver>> {
    backend: S,
    fallback: FallbackPolicy,
}

impl std::fmt::Debug for dyn FaceletSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceletSolver")
            .field("name", &self.name())
            .finish()
    }
}

impl<S: FaceletSolver> CubeSolver<S> {
    pub fn new(backend: S, fallback: FallbackPolicy) -> Self {
        Self { backend, fallback }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Solve using the thread-local RNG for any fallback sequence.
    pub fn solve(&self, state: &CubeState) -> Result<Option<Solution>> {
        self.solve_with_rng(state, &mut rand::rng())
    }

    /// Solve a cube state.
    ///
    /// Returns `Ok(None)` only when the external solver fails and the fallback
    /// is disabled. Conversion errors are returned as `Err`; solver failures
    /// never are.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        state: &CubeState,
        rng: &mut R,
    ) -> Result<Option<Solution>> {
        if state.has_uniform_faces() {
            debug!("every face is uniform; reporting solved");
            return Ok(Some(Solution::already_solved()));
        }

        let facelets = to_facelets(state)?;

        let failure = match self.query_backend(&facelets) {
            Ok(moves) if !moves.is_empty() => {
                debug!(
                    solver = self.backend.name(),
                    moves = moves.len(),
                    "external solver returned a solution"
                );
                return Ok(Some(Solution {
                    moves,
                    source: SolutionSource::External,
                }));
            }
            Ok(_) => "external solver returned no moves".to_string(),
            Err(e) if e.is_solver_failure() => e.to_string(),
            Err(e) => return Err(e),
        };

        match self.fallback {
            FallbackPolicy::Enabled => {
                let moves = random_moves(rng);
                warn!(
                    solver = self.backend.name(),
                    reason = %failure,
                    moves = moves.len(),
                    "external solver failed; returning random placeholder moves"
                );
                Ok(Some(Solution {
                    moves,
                    source: SolutionSource::RandomFallback,
                }))
            }
            FallbackPolicy::Disabled => {
                warn!(
                    solver = self.backend.name(),
                    reason = %failure,
                    "external solver failed; fallback disabled"
                );
                Ok(None)
            }
        }
    }

    fn query_backend(&self, facelets: &FaceletString) -> Result<Vec<Move>> {
        let reply = self.backend.solve(facelets).map_err(|e| match e {
            // IO trouble talking to the solver is still a solver failure
            Error::Io(io) => Error::Solver {
                solver: self.backend.name().to_string(),
                message: io.to_string(),
            },
            other => other,
        })?;
        Move::parse_sequence(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Face;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FixedSolver(&'static str);

    impl FaceletSolver for FixedSolver {
        fn name(&self) -> &str {
            "fixed"
        }

        fn solve(&self, _facelets: &FaceletString) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn only_the_placeholder_backend_is_unavailable() {
        assert!(!UnavailableSolver.is_available());
        assert!(CommandSolver::new("unavailable").is_available());

        let boxed: Box<dyn FaceletSolver> = Box::new(UnavailableSolver);
        assert!(!boxed.is_available());
        assert!(FixedSolver("R").is_available());
    }

    fn scrambled() -> CubeState {
        CubeState::solved()
            .with_face(Face::U, vec!["W", "W", "W", "W", "W", "W", "G", "G", "G"])
            .with_face(Face::F, vec!["R", "R", "R", "G", "G", "G", "G", "G", "G"])
            .with_face(Face::R, vec!["B", "B", "B", "R", "R", "R", "R", "R", "R"])
            .with_face(Face::B, vec!["O", "O", "O", "B", "B", "B", "B", "B", "B"])
            .with_face(Face::L, vec!["W", "W", "W", "O", "O", "O", "O", "O", "O"])
    }

    #[test]
    fn solved_state_short_circuits() {
        let solver = CubeSolver::new(FixedSolver("R U"), FallbackPolicy::Enabled);
        let solution = solver.solve(&CubeState::solved()).unwrap().unwrap();
        assert_eq!(solution, Solution::already_solved());
        assert_eq!(solution.move_count(), 0);
    }

    #[test]
    fn external_reply_is_parsed() {
        let solver = CubeSolver::new(FixedSolver(" U' \n"), FallbackPolicy::Enabled);
        let solution = solver.solve(&scrambled()).unwrap().unwrap();
        assert_eq!(solution.source, SolutionSource::External);
        assert_eq!(crate::moves::format_sequence(&solution.moves), "U'");
    }

    #[test]
    fn empty_reply_falls_back() {
        let solver = CubeSolver::new(FixedSolver(""), FallbackPolicy::Enabled);
        let mut rng = StdRng::seed_from_u64(1);
        let solution = solver
            .solve_with_rng(&scrambled(), &mut rng)
            .unwrap()
            .unwrap();
        assert!(solution.is_fallback());
        assert!((15..=25).contains(&solution.move_count()));
    }

    #[test]
    fn garbage_reply_falls_back() {
        let solver = CubeSolver::new(FixedSolver("Error: bad cube"), FallbackPolicy::Enabled);
        let solution = solver.solve(&scrambled()).unwrap().unwrap();
        assert!(solution.is_fallback());
    }

    #[test]
    fn unavailable_solver_without_fallback_yields_none() {
        let solver = CubeSolver::new(UnavailableSolver, FallbackPolicy::Disabled);
        assert!(solver.solve(&scrambled()).unwrap().is_none());
    }

    #[test]
    fn conversion_error_is_not_recovered() {
        let mut state = scrambled();
        state.set_face(Face::D, vec!["Y", "Y", "Y", "Y", "P", "Y", "Y", "Y", "Y"]);
        let solver = CubeSolver::new(UnavailableSolver, FallbackPolicy::Enabled);
        assert!(matches!(
            solver.solve(&state),
            Err(Error::InvalidColor { .. })
        ));
    }

    #[test]
    fn boxed_backend_delegates() {
        let backend: Box<dyn FaceletSolver> = Box::new(FixedSolver("F2"));
        let solver: CubeSolver = CubeSolver::new(backend, FallbackPolicy::Disabled);
        assert_eq!(solver.backend().name(), "fixed");
        let solution = solver.solve(&scrambled()).unwrap().unwrap();
        assert_eq!(solution.source, SolutionSource::External);
    }

    #[test]
    fn fallback_policy_from_bool() {
        assert_eq!(FallbackPolicy::from(true), FallbackPolicy::Enabled);
        assert!(!FallbackPolicy::from(false).is_enabled());
    }
}
