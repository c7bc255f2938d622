//! Cube solver library entry points.
//!
//! This crate validates Rubik's Cube face-color states, encodes them for an
//! external solving algorithm, orchestrates the solve with a random fallback,
//! and generates scramble sequences. Higher-level consumers (HTTP service, CLI)
//! should only depend on the items exported here.
//!
//! The solving algorithm itself is not part of this crate. It is reached
//! through the [`FaceletSolver`] trait.

#![deny(warnings)]

pub mod cube;
pub mod error;
pub mod facelets;
pub mod moves;
pub mod sample;
pub mod scramble;
pub mod solver;

pub use cube::{Color, CubeState, Face, ValidationError, STICKERS_PER_COLOR, STICKERS_PER_FACE};
pub use error::{Error, Result};
pub use facelets::{to_facelets, FaceletString, FACELET_COUNT};
pub use moves::{format_sequence, Move, Turn};
pub use sample::sample_state;
pub use scramble::{
    generate_scramble, generate_scramble_with, random_moves, DEFAULT_SCRAMBLE_LENGTH,
    FALLBACK_LENGTH,
};
pub use solver::{
    CommandSolver, CubeSolver, FaceletSolver, FallbackPolicy, Solution, SolutionSource,
    UnavailableSolver,
};
