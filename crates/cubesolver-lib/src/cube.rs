//! Cube state representation and structural validation.
//!
//! A [`CubeState`] is the face-color map clients send over the wire: six face
//! keys, each holding nine sticker labels in row-major order. Orientation is by
//! convention only and is never checked.
//!
//! Validation is deliberately a counting check. It confirms that every face is
//! present with nine stickers and that each of the six known colors appears
//! exactly nine times. It does not check corner/edge parity or any other
//! physical realizability condition, so unsolvable arrangements pass.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error as LibError;

/// Number of stickers on a single face.
pub const STICKERS_PER_FACE: usize = 9;

/// Number of occurrences of each color on a complete cube.
pub const STICKERS_PER_COLOR: usize = 9;

/// One of the six sides of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Up.
    U,
    /// Right.
    R,
    /// Front.
    F,
    /// Down.
    D,
    /// Left.
    L,
    /// Back.
    B,
}

impl Face {
    /// All faces in facelet-encoding order (U, R, F, D, L, B).
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Order in which face presence and length are checked.
    pub const VALIDATION_ORDER: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    /// Single-letter identifier used both as the JSON key and in move tokens.
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    /// Key used in the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Face::U => "U",
            Face::R => "R",
            Face::F => "F",
            Face::D => "D",
            Face::L => "L",
            Face::B => "B",
        }
    }

    /// Resolve a face from its letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// Color of this face's center in the canonical solved cube.
    pub fn solved_color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::D => Color::Yellow,
            Face::L => Color::Orange,
            Face::R => Color::Red,
            Face::F => Color::Green,
            Face::B => Color::Blue,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = LibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match (chars.next(), chars.next()) {
            (Some(letter), None) => Face::from_letter(letter),
            _ => None,
        };
        face.ok_or_else(|| LibError::InvalidFace {
            value: s.to_string(),
        })
    }
}

/// Sticker color drawn from the fixed six-symbol alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
}

impl Color {
    /// All colors in the order their counts are checked.
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Green,
        Color::Blue,
    ];

    /// Wire label for this color.
    pub fn label(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Yellow => "Y",
            Color::Orange => "O",
            Color::Red => "R",
            Color::Green => "G",
            Color::Blue => "B",
        }
    }

    /// Parse a wire label. Labels are case-sensitive single letters.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "W" => Some(Color::White),
            "Y" => Some(Color::Yellow),
            "O" => Some(Color::Orange),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            "B" => Some(Color::Blue),
            _ => None,
        }
    }

    /// Face whose center carries this color in the canonical solved cube.
    pub fn home_face(self) -> Face {
        match self {
            Color::White => Face::U,
            Color::Red => Face::R,
            Color::Green => Face::F,
            Color::Yellow => Face::D,
            Color::Orange => Face::L,
            Color::Blue => Face::B,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a cube state fails structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of the six faces is absent.
    #[error("face {face} is missing")]
    MissingFace { face: Face },

    /// A face does not hold exactly nine stickers.
    #[error("face {face} has {count} stickers, expected {}", STICKERS_PER_FACE)]
    WrongStickerCount { face: Face, count: usize },

    /// A known color does not appear exactly nine times.
    #[error("color {color} appears {count} times, expected {}", STICKERS_PER_COLOR)]
    ColorCount { color: Color, count: usize },
}

/// Face-color configuration as supplied by a client.
///
/// Keys are face letters; values are sticker labels. Unknown keys are
/// tolerated and their stickers still take part in color counting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubeState {
    faces: BTreeMap<String, Vec<String>>,
}

impl CubeState {
    /// Create an empty state with no faces.
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical solved cube (U=W, D=Y, L=O, R=R, F=G, B=B).
    pub fn solved() -> Self {
        Face::ALL.iter().fold(Self::new(), |state, &face| {
            state.with_face(
                face,
                vec![face.solved_color().label().to_string(); STICKERS_PER_FACE],
            )
        })
    }

    /// Build a state from a raw key/sticker map.
    pub fn from_map(faces: BTreeMap<String, Vec<String>>) -> Self {
        Self { faces }
    }

    /// Set the stickers for one face, replacing any previous value.
    pub fn with_face<S: Into<String>>(mut self, face: Face, stickers: Vec<S>) -> Self {
        self.set_face(face, stickers);
        self
    }

    /// Set the stickers for one face in place.
    pub fn set_face<S: Into<String>>(&mut self, face: Face, stickers: Vec<S>) {
        self.faces.insert(
            face.as_str().to_string(),
            stickers.into_iter().map(Into::into).collect(),
        );
    }

    /// Remove a face, returning its stickers if present.
    pub fn remove_face(&mut self, face: Face) -> Option<Vec<String>> {
        self.faces.remove(face.as_str())
    }

    /// Stickers of the given face, if present.
    pub fn face(&self, face: Face) -> Option<&[String]> {
        self.faces.get(face.as_str()).map(Vec::as_slice)
    }

    /// True when no face keys are present at all.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate over every key and its stickers, including unknown keys.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.faces.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Count occurrences of each known color across all entries.
    ///
    /// Blank and unknown labels are skipped.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts: BTreeMap<Color, usize> = Color::ALL.iter().map(|&c| (c, 0)).collect();
        for label in self.faces.values().flatten() {
            if label.is_empty() {
                continue;
            }
            if let Some(color) = Color::from_label(label) {
                *counts.entry(color).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Validate the structure of the state.
    ///
    /// Checks, in order: all six faces present, nine stickers per face, and
    /// exactly nine of each known color. Labels outside the alphabet are not
    /// rejected here; they surface later as a conversion error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for face in Face::VALIDATION_ORDER {
            if self.face(face).is_none() {
                return Err(ValidationError::MissingFace { face });
            }
        }

        for face in Face::VALIDATION_ORDER {
            let count = self.face(face).map_or(0, <[String]>::len);
            if count != STICKERS_PER_FACE {
                return Err(ValidationError::WrongStickerCount { face, count });
            }
        }

        let counts = self.color_counts();
        for color in Color::ALL {
            let count = counts.get(&color).copied().unwrap_or(0);
            if count != STICKERS_PER_COLOR {
                return Err(ValidationError::ColorCount { color, count });
            }
        }

        Ok(())
    }

    /// Boolean form of [`CubeState::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether every present face shows a single color.
    ///
    /// Empty faces and blank stickers are skipped. The uniform color is not
    /// compared against the canonical solved coloring, so a cube whose faces
    /// are uniform but swapped also reports true.
    pub fn has_uniform_faces(&self) -> bool {
        self.faces.values().all(|stickers| match stickers.first() {
            None => true,
            Some(first) => stickers
                .iter()
                .filter(|label| !label.is_empty())
                .all(|label| label == first),
        })
    }

    /// Whether the state matches the canonical solved coloring exactly.
    pub fn is_canonical_solved(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            self.face(face).is_some_and(|stickers| {
                stickers.len() == STICKERS_PER_FACE
                    && stickers
                        .iter()
                        .all(|label| label == face.solved_color().label())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_of(label: &str) -> Vec<String> {
        vec![label.to_string(); STICKERS_PER_FACE]
    }

    #[test]
    fn solved_state_is_valid_and_uniform() {
        let state = CubeState::solved();
        assert!(state.is_valid());
        assert!(state.has_uniform_faces());
        assert!(state.is_canonical_solved());
    }

    #[test]
    fn missing_face_is_reported_first() {
        let mut state = CubeState::solved();
        state.remove_face(Face::F);
        assert_eq!(
            state.validate(),
            Err(ValidationError::MissingFace { face: Face::F })
        );
    }

    #[test]
    fn short_face_is_rejected() {
        let mut state = CubeState::solved();
        state.set_face(Face::R, vec!["R"; 8]);
        assert_eq!(
            state.validate(),
            Err(ValidationError::WrongStickerCount {
                face: Face::R,
                count: 8
            })
        );
    }

    #[test]
    fn wrong_color_count_is_rejected() {
        let mut state = CubeState::solved();
        let mut up = face_of("W");
        up[0] = "Y".to_string();
        state.set_face(Face::U, up);
        assert_eq!(
            state.validate(),
            Err(ValidationError::ColorCount {
                color: Color::White,
                count: 8
            })
        );
    }

    #[test]
    fn unknown_labels_do_not_affect_counts() {
        let state = CubeState::solved().with_face(Face::U, face_of("W"));
        let mut extra = state.clone();
        extra.faces.insert("X".to_string(), face_of("Z"));
        assert!(extra.is_valid());
    }

    #[test]
    fn swapped_uniform_faces_pass_the_weak_solved_check() {
        let state = CubeState::solved()
            .with_face(Face::U, face_of("Y"))
            .with_face(Face::D, face_of("W"));
        assert!(state.is_valid());
        assert!(state.has_uniform_faces());
        assert!(!state.is_canonical_solved());
    }

    #[test]
    fn blank_stickers_are_ignored_by_uniform_check() {
        let mut up = face_of("W");
        up[4] = String::new();
        let state = CubeState::solved().with_face(Face::U, up);
        assert!(state.has_uniform_faces());
        assert!(!state.is_valid());
    }

    #[test]
    fn face_letters_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
            assert_eq!(face.as_str().parse::<Face>().unwrap(), face);
            assert_eq!(face.solved_color().home_face(), face);
        }
        assert!("UR".parse::<Face>().is_err());
    }

    #[test]
    fn deserializes_from_wire_json() {
        let json = r#"{"U":["W","W","W","W","W","W","W","W","W"]}"#;
        let state: CubeState = serde_json::from_str(json).unwrap();
        assert_eq!(state.face(Face::U).map(<[String]>::len), Some(9));
        assert!(state.face(Face::D).is_none());
    }
}
