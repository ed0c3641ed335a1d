//! Fish card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::{Continuation, DecisionNode, SelectPlayer, SelectablePlayer};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::turn::add_card_resource;
use crate::types::{CardResource, CardType, Resource, Tag};

/// Fish - 9 MC
/// Active - Animal
/// Action: Add 1 animal to this card.
/// Decrease any plant production 1 step. 1 VP for each animal on this card.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fish;

impl Fish {
    fn targets(game: &GameState) -> Vec<SelectablePlayer> {
        game.players
            .iter()
            .filter(|p| p.production(Resource::Plants) > 0)
            .map(SelectablePlayer::from)
            .collect()
    }
}

impl CardEffect for Fish {
    fn name(&self) -> CardName {
        CardName::Fish
    }

    fn card_type(&self) -> CardType {
        CardType::Active
    }

    fn cost(&self) -> i32 {
        9
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Animal]
    }

    fn resource_type(&self) -> Option<CardResource> {
        Some(CardResource::Animal)
    }

    fn victory_points(&self, game: &GameState, player: &PlayerId) -> i32 {
        game.player(player)
            .map_or(0, |p| p.card_resources(CardName::Fish))
    }

    fn can_play(&self, game: &GameState, _player: &PlayerId) -> bool {
        game.is_solo() || !Self::targets(game).is_empty()
    }

    fn play(
        &self,
        game: &mut GameState,
        _player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let targets = Self::targets(game);
        if targets.is_empty() {
            return Ok(None);
        }
        let node = SelectPlayer::new(
            "Select player to decrease plant production",
            "Decrease",
            targets,
            |game, target| {
                game.player_mut(&target)?
                    .add_production(Resource::Plants, -1);
                Ok(Continuation::Done)
            },
        )
        .auto_resolve_single();
        Ok(Some(node.into()))
    }

    fn can_act(&self, _game: &GameState, _player: &PlayerId) -> bool {
        true
    }

    fn act(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        add_card_resource(game, player, CardName::Fish, 1)?;
        Ok(None)
    }
}
