//! Artificial Photosynthesis card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::{Continuation, DecisionNode, OrOptions, SelectOption};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Resource, Tag};

/// Artificial Photosynthesis - 12 MC
/// Automated - Science
/// Increase your plant production 1 step or your energy production 2 steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtificialPhotosynthesis;

impl CardEffect for ArtificialPhotosynthesis {
    fn name(&self) -> CardName {
        CardName::ArtificialPhotosynthesis
    }

    fn card_type(&self) -> CardType {
        CardType::Automated
    }

    fn cost(&self) -> i32 {
        12
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Science]
    }

    fn play(
        &self,
        _game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let energy_for = player.clone();
        let plants_for = player.clone();
        let node = OrOptions::new(
            "Select production to increase",
            vec![
                SelectOption::new("Increase your energy production 2 steps", "Increase", move |game| {
                    game.player_mut(&energy_for)?
                        .add_production(Resource::Energy, 2);
                    Ok(Continuation::Done)
                })
                .into(),
                SelectOption::new("Increase your plant production 1 step", "Increase", move |game| {
                    game.player_mut(&plants_for)?
                        .add_production(Resource::Plants, 1);
                    Ok(Continuation::Done)
                })
                .into(),
            ],
        );
        Ok(Some(node.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::{process, request_decision};
    use crate::tests::fixtures::{self, payload};

    #[test]
    fn test_choose_plant_production() {
        let mut game = fixtures::game(&["blue"]);
        let blue = PlayerId::new("blue");
        let node = ArtificialPhotosynthesis.play(&mut game, &blue).unwrap().unwrap();
        request_decision(&mut game, &blue, node).unwrap();

        let err = process(&mut game, &blue, &payload(&[&["2"]])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid option index");

        process(&mut game, &blue, &payload(&[&["1"]])).unwrap();
        let player = game.player(&blue).unwrap();
        assert_eq!(player.production(Resource::Plants), 1);
        assert_eq!(player.production(Resource::Energy), 0);
    }
}
