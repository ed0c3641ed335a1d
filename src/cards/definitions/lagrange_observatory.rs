//! Lagrange Observatory card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::DecisionNode;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Tag};

/// Lagrange Observatory - 9 MC
/// Automated - Science, Space
/// Draw 1 card. 1 VP.
#[derive(Debug, Clone, Copy, Default)]
pub struct LagrangeObservatory;

impl CardEffect for LagrangeObservatory {
    fn name(&self) -> CardName {
        CardName::LagrangeObservatory
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn cost(&self) -> i32 {
        9
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Science, Tag::Space]
    }

    fn victory_points(&self, _game: &GameState, _player: &PlayerId) -> i32 {
        1
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let drawn = game.draw_cards(1);
        game.player_mut(player)?.cards_in_hand.extend(drawn);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures;

    #[test]
    fn test_lagrange_observatory_draws_a_card() {
        let mut game = fixtures::game(&["blue"]);
        let blue = PlayerId::new("blue");
        let top = *game.project_deck.last().unwrap();

        assert!(LagrangeObservatory.play(&mut game, &blue).unwrap().is_none());
        assert_eq!(game.player(&blue).unwrap().cards_in_hand, vec![top]);
        assert_eq!(LagrangeObservatory.victory_points(&game, &blue), 1);
    }
}
