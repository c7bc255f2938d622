// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs parses arguments and dispatches.

pub mod sample;
pub mod scramble;
pub mod solve;
pub mod validate;
