//! Io Mining Industries card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::DecisionNode;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Resource, Tag};

/// Io Mining Industries - 41 MC
/// Automated - Jovian, Space
/// Increase your titanium production 2 steps and your MC production 2 steps.
/// 1 VP per Jovian tag you have.
#[derive(Debug, Clone, Copy, Default)]
pub struct IoMiningIndustries;

impl CardEffect for IoMiningIndustries {
    fn name(&self) -> CardName {
        CardName::IoMiningIndustries
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn cost(&self) -> i32 {
        41
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Jovian, Tag::Space]
    }

    fn victory_points(&self, game: &GameState, player: &PlayerId) -> i32 {
        game.tag_count(player, Tag::Jovian)
            .map_or(0, |count| count as i32)
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let player = game.player_mut(player)?;
        player.add_production(Resource::Titanium, 2);
        player.add_production(Resource::MegaCredits, 2);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayedCard;
    use crate::tests::fixtures;

    #[test]
    fn test_io_mining_industries() {
        let mut game = fixtures::game(&["blue"]);
        let blue = PlayerId::new("blue");
        IoMiningIndustries.play(&mut game, &blue).unwrap();

        let player = game.player_mut(&blue).unwrap();
        assert_eq!(player.production(Resource::Titanium), 2);
        assert_eq!(player.production(Resource::MegaCredits), 2);

        player
            .played_cards
            .push(PlayedCard::new(CardName::IoMiningIndustries));
        assert_eq!(IoMiningIndustries.victory_points(&game, &blue), 1);
    }
}
