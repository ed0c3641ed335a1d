//! Aquifer Turbines prelude definition.

use crate::cards::{CardEffect, CardName, pay_mega_credits, place_ocean_tile};
use crate::decisions::DecisionNode;
use crate::deferred::Placement;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Resource, Tag};

/// Aquifer Turbines
/// Prelude - Power
/// Place an ocean tile. Increase your energy production 2 steps. Pay 3 MC.
#[derive(Debug, Clone, Copy, Default)]
pub struct AquiferTurbines;

const PAYMENT: i32 = 3;

impl CardEffect for AquiferTurbines {
    fn name(&self) -> CardName {
        CardName::AquiferTurbines
    }

    fn card_type(&self) -> CardType {
        CardType::Prelude
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Power]
    }

    fn can_play(&self, game: &GameState, player: &PlayerId) -> bool {
        game.player(player).is_ok_and(|p| p.can_afford(PAYMENT))
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        game.deferred_actions
            .push(place_ocean_tile(player.clone()), Placement::Back);
        game.player_mut(player)?
            .add_production(Resource::Energy, 2);
        game.deferred_actions.push(
            pay_mega_credits(player.clone(), PAYMENT, self.name()),
            Placement::Back,
        );
        Ok(None)
    }
}
