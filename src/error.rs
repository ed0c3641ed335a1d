//! Error taxonomy surfaced by the resolution core.
//!
//! Every failure is returned synchronously; nothing is logged and swallowed,
//! since a half-applied answer would leave the waiting registry ambiguous.

use thiserror::Error;

use crate::cards::CardName;
use crate::ids::PlayerId;

/// A submitted payload does not satisfy the pending decision.
///
/// The display strings are part of the client protocol and are matched by
/// callers, so they must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// Outer arity does not match what the decision expects.
    #[error("Incorrect options provided")]
    IncorrectOptions,
    /// Amount entry did not parse as an integer.
    #[error("Number not provided for amount")]
    NumberNotProvided,
    #[error("Amount provided too high")]
    AmountTooHigh,
    #[error("Amount provided too low")]
    AmountTooLow,
    /// Player row is empty or carries more than one identifier.
    #[error("Invalid players array provided")]
    InvalidPlayersArray,
    #[error("Player not available")]
    PlayerNotAvailable,
    #[error("Not enough cards selected")]
    NotEnoughCards,
    #[error("Too many cards selected")]
    TooManyCards,
    #[error("Card not available: {0}")]
    CardNotAvailable(String),
    #[error("Duplicate card selected: {0}")]
    DuplicateCard(String),
    #[error("Invalid value provided")]
    InvalidValue,
    #[error("Value not available")]
    ValueNotAvailable,
    /// Or-container selector is missing, non-numeric, or out of range.
    #[error("Invalid option index")]
    InvalidOptionIndex,
    #[error("Decision nested too deeply")]
    NestedTooDeeply,
}

/// A persisted record cannot be turned back into session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A referenced card no longer exists in the catalog.
    #[error("Unknown card in snapshot: {0}")]
    UnknownCard(String),
    /// A card was found where a corporation was required.
    #[error("Card is not a corporation: {0}")]
    NotACorporation(CardName),
    /// The record does not decode into the current schema.
    #[error("Malformed snapshot: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Malformed(err.to_string())
    }
}

/// Top-level error for session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// `process` was called while the participant had nothing pending.
    #[error("Not waiting for anything")]
    NoPendingDecision,
    #[error(transparent)]
    MalformedPayload(#[from] PayloadError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("No effect registered for {0}")]
    UnregisteredCard(CardName),
    /// An effect collaborator refused to apply (cannot afford, requirements unmet).
    #[error("{0}")]
    Rule(String),
}

impl GameError {
    /// Convenience for effect collaborators.
    pub fn rule(message: impl Into<String>) -> Self {
        GameError::Rule(message.into())
    }
}
