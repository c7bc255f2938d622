//! Built-in example states.

use crate::cube::{CubeState, Face};

/// A fixed scrambled-looking state with nine stickers of each color.
///
/// Centers and corners stay on their home faces while the edges are
/// shuffled, so the state passes the counting validation. It is a
/// demonstration input for clients and the CLI, not a guaranteed-solvable
/// arrangement.
pub fn sample_state() -> CubeState {
    CubeState::new()
        .with_face(Face::U, vec!["W", "R", "W", "G", "W", "B", "W", "O", "W"])
        .with_face(Face::D, vec!["Y", "O", "Y", "B", "Y", "G", "Y", "R", "Y"])
        .with_face(Face::L, vec!["O", "W", "O", "R", "O", "Y", "O", "B", "O"])
        .with_face(Face::R, vec!["R", "Y", "R", "O", "R", "W", "R", "G", "R"])
        .with_face(Face::F, vec!["G", "B", "G", "W", "G", "R", "G", "Y", "G"])
        .with_face(Face::B, vec!["B", "G", "B", "Y", "B", "O", "B", "W", "B"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_passes_validation_but_is_not_solved() {
        let state = sample_state();
        assert!(state.is_valid());
        assert!(!state.has_uniform_faces());
    }
}
