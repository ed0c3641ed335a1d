//! Power Supply Consortium card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::{Continuation, DecisionNode, SelectPlayer, SelectablePlayer};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Resource, Tag};

/// Power Supply Consortium - 5 MC
/// Automated - Power
/// Requires 2 power tags. Decrease any energy production 1 step and increase your own 1 step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerSupplyConsortium;

impl CardEffect for PowerSupplyConsortium {
    fn name(&self) -> CardName {
        CardName::PowerSupplyConsortium
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn cost(&self) -> i32 {
        5
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Power]
    }

    fn can_play(&self, game: &GameState, player: &PlayerId) -> bool {
        game.tag_count(player, Tag::Power)
            .is_ok_and(|count| count >= 2)
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        if game.is_solo() {
            game.player_mut(player)?
                .add_production(Resource::Energy, 1);
            return Ok(None);
        }

        let targets: Vec<SelectablePlayer> = game
            .players
            .iter()
            .filter(|p| p.production(Resource::Energy) > 0)
            .map(SelectablePlayer::from)
            .collect();
        if targets.is_empty() {
            game.player_mut(player)?
                .add_production(Resource::Energy, 1);
            return Ok(None);
        }

        let id = player.clone();
        let node = SelectPlayer::new(
            "Select player to decrease energy production",
            "Decrease",
            targets,
            move |game, target| {
                game.player_mut(&target)?
                    .add_production(Resource::Energy, -1);
                game.player_mut(&id)?.add_production(Resource::Energy, 1);
                Ok(Continuation::Done)
            },
        );
        Ok(Some(node.into()))
    }
}
