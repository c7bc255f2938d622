//! Face-turn move tokens.
//!
//! A [`Move`] is one of 18 symbolic tokens: a face letter followed by an
//! optional suffix (`'` for counter-clockwise, `2` for a half turn). Moves carry
//! no behavior beyond their token; nothing in this crate applies them to a cube.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cube::Face;
use crate::error::{Error, Result};

/// Direction and amount of a face turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Quarter turn clockwise (no suffix).
    Clockwise,
    /// Quarter turn counter-clockwise (`'` suffix).
    CounterClockwise,
    /// Half turn (`2` suffix).
    Double,
}

impl Turn {
    /// Token suffix for this turn.
    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Double => "2",
        }
    }
}

/// A single face turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

const fn mv(face: Face, turn: Turn) -> Move {
    Move { face, turn }
}

impl Move {
    /// The full 18-token alphabet.
    pub const ALL: [Move; 18] = [
        mv(Face::U, Turn::Clockwise),
        mv(Face::U, Turn::CounterClockwise),
        mv(Face::U, Turn::Double),
        mv(Face::D, Turn::Clockwise),
        mv(Face::D, Turn::CounterClockwise),
        mv(Face::D, Turn::Double),
        mv(Face::L, Turn::Clockwise),
        mv(Face::L, Turn::CounterClockwise),
        mv(Face::L, Turn::Double),
        mv(Face::R, Turn::Clockwise),
        mv(Face::R, Turn::CounterClockwise),
        mv(Face::R, Turn::Double),
        mv(Face::F, Turn::Clockwise),
        mv(Face::F, Turn::CounterClockwise),
        mv(Face::F, Turn::Double),
        mv(Face::B, Turn::Clockwise),
        mv(Face::B, Turn::CounterClockwise),
        mv(Face::B, Turn::Double),
    ];

    pub const fn new(face: Face, turn: Turn) -> Self {
        mv(face, turn)
    }

    /// Parse a whitespace-delimited move list such as `"R U R' U2"`.
    pub fn parse_sequence(text: &str) -> Result<Vec<Move>> {
        text.split_whitespace().map(str::parse).collect()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        let invalid = || Error::InvalidMove {
            token: token.to_string(),
        };

        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" => Turn::Double,
            _ => return Err(invalid()),
        };

        Ok(Move { face, turn })
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Render a move list as a single space-separated string.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
