use std::time::Duration;

use thiserror::Error;

use crate::cube::Face;

/// Convenient result alias for the cube solver library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A face required by the facelet encoding was absent from the state.
    #[error("missing face {face}")]
    MissingFace { face: Face },

    /// Raised when a face identifier is not one of `URFDLB`.
    #[error("invalid face identifier: {value:?}")]
    InvalidFace { value: String },

    /// Raised when a sticker label is outside the six-color alphabet.
    #[error("Failed to convert cube state: Invalid color: {color:?}")]
    InvalidColor { color: String },

    /// Raised when a facelet string is not 54 characters over `URFDLB`.
    #[error("invalid facelet string: {message}")]
    InvalidFacelets { message: String },

    /// Raised when a token is not one of the 18 face-turn moves.
    #[error("invalid move token: {token:?}")]
    InvalidMove { token: String },

    /// The external solver reported a failure.
    #[error("{solver} solver failed: {message}")]
    Solver { solver: String, message: String },

    /// No external solver is configured.
    #[error("no external solver configured")]
    SolverUnavailable,

    /// The external solver did not answer within the configured limit.
    #[error("{solver} solver timed out after {}ms", .timeout.as_millis())]
    SolverTimeout { solver: String, timeout: Duration },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error originated at the external solver boundary.
    ///
    /// These are the failures the orchestrator recovers from locally.
    pub fn is_solver_failure(&self) -> bool {
        matches!(
            self,
            Error::Solver { .. }
                | Error::SolverUnavailable
                | Error::SolverTimeout { .. }
                | Error::InvalidMove { .. }
        )
    }
}
