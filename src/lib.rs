pub mod cards;
pub mod color;
pub mod decisions;
pub mod deferred;
pub mod error;
pub mod game_state;
pub mod ids;
pub mod options;
pub mod player;
pub mod resolution;
pub mod snapshot;
pub mod timer;
pub mod turn;
pub mod types;
pub mod victory_points;
pub mod waiting;

#[cfg(test)]
mod tests;

pub use cards::{CardEffect, CardName, CorporationCard, EffectRegistry};
pub use color::Color;
pub use decisions::{
    AndOptions, Answer, Continuation, DecisionKind, DecisionNode, DecisionView, OrOptions,
    SelectAmount, SelectCard, SelectOption, SelectPlayer, SelectValue, SelectablePlayer,
};
pub use deferred::{DeferredAction, DeferredActionQueue, Placement};
pub use error::{GameError, PayloadError, SnapshotError};
pub use game_state::GameState;
pub use ids::{GameId, PlayerId};
pub use options::GameOptions;
pub use player::{PlayedCard, Player};
pub use resolution::{Progress, process, request_decision, request_decision_then};
pub use snapshot::{SerializedPlayer, SnapshotMode, load_player, load_player_with};
pub use timer::{Clock, Timer};
pub use turn::{add_card_resource, play_card, start_generation, use_card_action};
pub use types::{CardResource, CardType, Resource, Tag};
pub use victory_points::{VictoryPointsBreakdown, VictoryPointsSource};
pub use waiting::{PendingDecision, WaitingRegistry};
