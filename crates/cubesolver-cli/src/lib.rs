//! Cube solver CLI library.
//!
//! Input loading and output rendering shared by the `cubesolver` subcommands.

pub mod input;
pub mod output;
