//! Lunar Beam card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::DecisionNode;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Resource, Tag};

/// Lunar Beam - 13 MC
/// Automated - Earth, Power
/// Decrease your MC production 2 steps and increase your heat production and energy production 2 steps each.
#[derive(Debug, Clone, Copy, Default)]
pub struct LunarBeam;

impl CardEffect for LunarBeam {
    fn name(&self) -> CardName {
        CardName::LunarBeam
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn cost(&self) -> i32 {
        13
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Earth, Tag::Power]
    }

    fn can_play(&self, game: &GameState, player: &PlayerId) -> bool {
        game.player(player)
            .is_ok_and(|p| p.can_reduce_production(Resource::MegaCredits, 2))
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let player = game.player_mut(player)?;
        player.add_production(Resource::MegaCredits, -2);
        player.add_production(Resource::Heat, 2);
        player.add_production(Resource::Energy, 2);
        Ok(None)
    }
}
