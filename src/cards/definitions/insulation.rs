//! Insulation card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::{Continuation, DecisionNode, SelectAmount};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Resource};

/// Insulation - 2 MC
/// Automated
/// Decrease your heat production any number of steps and increase your MC production the same number of steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Insulation;

impl CardEffect for Insulation {
    fn name(&self) -> CardName {
        CardName::Insulation
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn cost(&self) -> i32 {
        2
    }

    fn can_play(&self, game: &GameState, player: &PlayerId) -> bool {
        game.player(player)
            .is_ok_and(|p| p.production(Resource::Heat) >= 1)
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let max = game.player(player)?.production(Resource::Heat);
        let id = player.clone();
        let node = SelectAmount::new(
            "Select amount of heat production to decrease",
            "Decrease",
            max,
            move |game, amount| {
                let player = game.player_mut(&id)?;
                player.add_production(Resource::Heat, -amount);
                player.add_production(Resource::MegaCredits, amount);
                Ok(Continuation::Done)
            },
        );
        Ok(Some(node.into()))
    }
}
