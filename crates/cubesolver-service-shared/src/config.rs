//! Environment-driven configuration for the HTTP service.
//!
//! # Environment Variables
//!
//! - `SERVICE_PORT` / `PORT`: HTTP port (default: 5000)
//! - `CUBE_SOLVER_COMMAND`: External solver program; unset means no solver
//! - `CUBE_SOLVER_ARGS`: Whitespace-separated arguments placed before the facelets
//! - `CUBE_SOLVER_TIMEOUT_MS`: Kill the solver after this many milliseconds
//! - `CUBE_SOLVER_FALLBACK`: "false" disables the random fallback (default: true)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use cubesolver_lib::{
    CommandSolver, CubeSolver, FaceletSolver, FallbackPolicy, UnavailableSolver,
};

/// Default port when neither `SERVICE_PORT` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 5000;

/// Settings for the external solver and fallback behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Program to run for each solve; `None` disables the external solver.
    pub command: Option<String>,
    /// Extra arguments placed before the facelet string.
    pub args: Vec<String>,
    /// Upper bound on a single solver run.
    pub timeout: Option<Duration>,
    /// Whether failed solves fall back to random moves.
    pub fallback: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout: None,
            fallback: true,
        }
    }
}

impl SolverConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let command = lookup("CUBE_SOLVER_COMMAND")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let args = lookup("CUBE_SOLVER_ARGS")
            .map(|a| a.split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        let timeout = lookup("CUBE_SOLVER_TIMEOUT_MS")
            .and_then(|t| t.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis);

        let fallback = lookup("CUBE_SOLVER_FALLBACK")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            command,
            args,
            timeout,
            fallback,
        }
    }

    /// Build the solve orchestrator described by this configuration.
    pub fn build_solver(&self) -> CubeSolver {
        let backend: Box<dyn FaceletSolver> = match &self.command {
            Some(command) => Box::new(
                CommandSolver::new(command.clone())
                    .with_args(self.args.clone())
                    .with_timeout(self.timeout),
            ),
            None => Box::new(UnavailableSolver),
        };
        CubeSolver::new(backend, FallbackPolicy::from(self.fallback))
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP port to bind on all interfaces.
    pub port: u16,
    /// External solver settings.
    pub solver: SolverConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            solver: SolverConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("SERVICE_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            solver: SolverConfig::from_lookup(lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 5000);
        assert!(config.solver.command.is_none());
        assert!(config.solver.fallback);
    }

    #[test]
    fn test_solver_default_matches_empty_environment() {
        let config = SolverConfig::default();
        assert_eq!(config, SolverConfig::from_lookup(lookup(&[])));
        assert!(config.fallback);
        assert_eq!(config.build_solver().fallback_policy(), FallbackPolicy::Enabled);
    }

    #[test]
    fn test_service_port_wins_over_port() {
        let config =
            ServiceConfig::from_lookup(lookup(&[("SERVICE_PORT", "8080"), ("PORT", "9000")]));
        assert_eq!(config.port, 8080);

        let config = ServiceConfig::from_lookup(lookup(&[("PORT", "9000")]));
        assert_eq!(config.port, 9000);

        let config = ServiceConfig::from_lookup(lookup(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_solver_settings() {
        let config = SolverConfig::from_lookup(lookup(&[
            ("CUBE_SOLVER_COMMAND", " kociemba "),
            ("CUBE_SOLVER_ARGS", "--max-depth 24"),
            ("CUBE_SOLVER_TIMEOUT_MS", "1500"),
            ("CUBE_SOLVER_FALLBACK", "FALSE"),
        ]));
        assert_eq!(config.command.as_deref(), Some("kociemba"));
        assert_eq!(config.args, vec!["--max-depth", "24"]);
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
        assert!(!config.fallback);

        let solver = config.build_solver();
        assert_eq!(solver.backend().name(), "kociemba");
        assert_eq!(solver.fallback_policy(), FallbackPolicy::Disabled);
    }

    #[test]
    fn test_blank_command_means_no_solver() {
        let config = SolverConfig::from_lookup(lookup(&[("CUBE_SOLVER_COMMAND", "  ")]));
        assert!(config.command.is_none());
        assert_eq!(config.build_solver().backend().name(), "unavailable");
    }
}
