use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat colour of a participant.
///
/// Clients may name a participant by colour instead of id when answering a
/// player selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
    Yellow,
    Green,
    Black,
    Purple,
    Orange,
    Pink,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Blue,
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Black,
        Color::Purple,
        Color::Orange,
        Color::Pink,
    ];

    /// The lowercase name used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Black => "black",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Pink => "pink",
        }
    }

    /// Parse a wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
