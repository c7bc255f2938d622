//! Conversion from [`CubeState`] to the 54-character facelet encoding.
//!
//! External solvers in the Kociemba family take the cube as a single string of
//! face letters, nine per face, in the order U, R, F, D, L, B. Each sticker is
//! written as the letter of the face whose center carries that color in the
//! canonical solved cube (white → `U`, red → `R`, green → `F`, yellow → `D`,
//! orange → `L`, blue → `B`).

use std::fmt;

use crate::cube::{Color, CubeState, Face, STICKERS_PER_FACE};
use crate::error::{Error, Result};

/// Length of a complete facelet string.
pub const FACELET_COUNT: usize = STICKERS_PER_FACE * 6;

/// A validated 54-character facelet string over `URFDLB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceletString(String);

impl FaceletString {
    /// Validate and wrap a raw facelet string.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();

        let len = value.chars().count();
        if len != FACELET_COUNT {
            return Err(Error::InvalidFacelets {
                message: format!("expected {FACELET_COUNT} characters, got {len}"),
            });
        }

        if let Some(bad) = value.chars().find(|c| Face::from_letter(*c).is_none()) {
            return Err(Error::InvalidFacelets {
                message: format!("unexpected character {bad:?}"),
            });
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FaceletString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FaceletString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Map a sticker label to its facelet letter.
pub fn facelet_for(label: &str) -> Result<char> {
    Color::from_label(label)
        .map(|color| color.home_face().letter())
        .ok_or_else(|| Error::InvalidColor {
            color: label.to_string(),
        })
}

/// Encode a cube state for the external solver.
///
/// Faces are read in U, R, F, D, L, B order. Fails on the first sticker whose
/// label is outside the six-color alphabet, blank labels included.
pub fn to_facelets(state: &CubeState) -> Result<FaceletString> {
    let mut encoded = String::with_capacity(FACELET_COUNT);

    for face in Face::ALL {
        let stickers = state.face(face).ok_or(Error::MissingFace { face })?;
        for label in stickers {
            encoded.push(facelet_for(label)?);
        }
    }

    FaceletString::new(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_cube_encodes_face_by_face() {
        let facelets = to_facelets(&CubeState::solved()).unwrap();
        assert_eq!(
            facelets.as_str(),
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
        );
    }

    #[test]
    fn unknown_color_is_a_conversion_error() {
        let mut front = vec!["G"; 9];
        front[3] = "P";
        let state = CubeState::solved().with_face(Face::F, front);

        match to_facelets(&state) {
            Err(Error::InvalidColor { color }) => assert_eq!(color, "P"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_sticker_is_a_conversion_error() {
        let mut back = vec!["B"; 9];
        back[8] = "";
        let state = CubeState::solved().with_face(Face::B, back);
        assert!(matches!(
            to_facelets(&state),
            Err(Error::InvalidColor { .. })
        ));
    }

    #[test]
    fn missing_face_is_reported() {
        let mut state = CubeState::solved();
        state.remove_face(Face::L);
        assert!(matches!(
            to_facelets(&state),
            Err(Error::MissingFace { face: Face::L })
        ));
    }

    #[test]
    fn facelet_string_rejects_bad_input() {
        assert!(FaceletString::new("U".repeat(53)).is_err());
        assert!(FaceletString::new(format!("{}X", "U".repeat(53))).is_err());
        assert!(FaceletString::new("U".repeat(54)).is_ok());
    }
}
