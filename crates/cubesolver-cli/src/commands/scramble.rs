//! Scramble command handler.

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cubesolver_cli::output::{render_scramble, OutputFormat};
use cubesolver_lib::{generate_scramble, generate_scramble_with};

/// Longest scramble the CLI will generate.
pub const MAX_LENGTH: usize = 100;

/// Handle the scramble subcommand.
///
/// A fixed `seed` makes the output reproducible.
pub fn handle_scramble(length: usize, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    ensure!(
        (1..=MAX_LENGTH).contains(&length),
        "scramble length must be between 1 and {MAX_LENGTH}, got {length}"
    );

    let scramble = match seed {
        Some(seed) => generate_scramble_with(&mut StdRng::seed_from_u64(seed), length),
        None => generate_scramble(length),
    };

    println!("{}", render_scramble(&scramble, format));
    Ok(())
}
