//! Validate command handler.

use std::path::Path;

use anyhow::{anyhow, Result};

use cubesolver_cli::input::read_cube_state;
use cubesolver_lib::to_facelets;

/// Check a cube state and print its facelet encoding.
///
/// Fails on the first validation problem. A state can pass the counting
/// checks and still carry labels the encoder rejects, so the encoding is
/// attempted as well.
pub fn handle_validate(file: Option<&Path>) -> Result<()> {
    let state = read_cube_state(file)?;
    state
        .validate()
        .map_err(|e| anyhow!("Invalid cube state: {e}"))?;

    let facelets = to_facelets(&state)?;

    println!("Cube state is valid");
    println!("Facelets: {facelets}");
    if state.has_uniform_faces() {
        println!("Already solved");
    }
    Ok(())
}
