//! Saturn Systems corporation definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::DecisionNode;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Resource, Tag};

/// Saturn Systems
/// Corporation - Jovian
/// You start with 1 titanium production and 42 MC.
/// Effect: Each time any Jovian tag is put into play, including this, increase your MC production 1 step.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaturnSystems;

impl CardEffect for SaturnSystems {
    fn name(&self) -> CardName {
        CardName::SaturnSystems
    }

    fn card_type(&self) -> CardType {
        CardType::Corporation
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Jovian]
    }

    fn starting_mega_credits(&self) -> i32 {
        42
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let player = game.player_mut(player)?;
        player.add_production(Resource::Titanium, 1);
        player.add_production(Resource::MegaCredits, 1);
        Ok(None)
    }

    fn on_card_played(
        &self,
        game: &mut GameState,
        owner: &PlayerId,
        _played_by: &PlayerId,
        card: CardName,
    ) -> Result<(), GameError> {
        let jovian_tags = game
            .effects()
            .get(card)
            .map_or(0, |effect| {
                effect.tags().iter().filter(|&&t| t == Tag::Jovian).count()
            });
        if jovian_tags > 0 {
            game.player_mut(owner)?
                .add_production(Resource::MegaCredits, jovian_tags as i32);
        }
        Ok(())
    }
}
