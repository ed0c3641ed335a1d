//! Meat Industry card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::DecisionNode;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardResource, CardType, Resource, Tag};

/// Meat Industry - 5 MC
/// Active - Building
/// Effect: When you gain an animal to ANY CARD, gain 2 MC.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeatIndustry;

impl CardEffect for MeatIndustry {
    fn name(&self) -> CardName {
        CardName::MeatIndustry
    }

    fn card_type(&self) -> CardType {
        CardType::Active
    }

    fn cost(&self) -> i32 {
        5
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Building]
    }

    fn play(
        &self,
        _game: &mut GameState,
        _player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        Ok(None)
    }

    fn on_resource_added(
        &self,
        game: &mut GameState,
        owner: &PlayerId,
        _card: CardName,
        resource: CardResource,
        _count: i32,
    ) -> Result<(), GameError> {
        if resource == CardResource::Animal {
            game.player_mut(owner)?
                .add_resource(Resource::MegaCredits, 2);
        }
        Ok(())
    }
}
