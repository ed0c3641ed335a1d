//! Tharsis Republic corporation definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::DecisionNode;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Tag};

/// Tharsis Republic
/// Corporation - Building
/// You start with 40 MC.
#[derive(Debug, Clone, Copy, Default)]
pub struct TharsisRepublic;

impl CardEffect for TharsisRepublic {
    fn name(&self) -> CardName {
        CardName::TharsisRepublic
    }

    fn card_type(&self) -> CardType {
        CardType::Corporation
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Building]
    }

    fn starting_mega_credits(&self) -> i32 {
        40
    }

    fn play(
        &self,
        _game: &mut GameState,
        _player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        Ok(None)
    }
}
