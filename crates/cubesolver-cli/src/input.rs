//! Reading cube states from files or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use cubesolver_lib::CubeState;

/// Read a cube state from `path`, or from stdin when no path is given.
pub fn read_cube_state(path: Option<&Path>) -> Result<CubeState> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read cube state from stdin")?;
            text
        }
    };

    parse_cube_state(&text)
}

/// Parse a cube state document.
///
/// Accepts either a bare face map or an API request body of the form
/// `{"cubeState": {...}}`.
pub fn parse_cube_state(text: &str) -> Result<CubeState> {
    let value: Value = serde_json::from_str(text).context("cube state is not valid JSON")?;

    let value = match value {
        Value::Object(mut map) if map.contains_key("cubeState") => map
            .remove("cubeState")
            .unwrap_or(Value::Null),
        other => other,
    };

    if value.is_null() {
        bail!("No cube state provided");
    }

    serde_json::from_value(value)
        .context("cube state must map face names to lists of color labels")
}
