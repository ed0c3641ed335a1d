use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant identifier.
///
/// Identifiers are opaque strings chosen by the session owner (e.g. `"blue-id"`),
/// and are what clients send back inside answer payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl PlayerId {
    /// Create a player ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl GameId {
    /// Create a game ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_round_trips_as_plain_string() {
        let id = PlayerId::new("blue-id");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"blue-id\"");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId::from("p2").to_string(), "p2");
        assert_eq!(GameId::new("foobar").as_str(), "foobar");
    }
}
