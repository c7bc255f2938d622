//! Sample command handler.

use anyhow::Result;

use cubesolver_cli::output::{render_state, OutputFormat};
use cubesolver_lib::sample_state;

/// Print the built-in sample state.
pub fn handle_sample(format: OutputFormat) -> Result<()> {
    println!("{}", render_state(&sample_state(), format));
    Ok(())
}
