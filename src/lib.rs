//! Workspace root package.
//!
//! Carries the pre-commit hook configuration only; the code lives under
//! `crates/`.
