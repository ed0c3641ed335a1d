//! Business Contacts card definition.

use crate::cards::{CardEffect, CardName};
use crate::decisions::{Continuation, DecisionNode, SelectCard};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardType, Tag};

/// Business Contacts - 7 MC
/// Event - Earth
/// Look at the top 4 cards from the deck. Take 2 of them into hand and discard the other 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessContacts;

const LOOK_AT: usize = 4;
const KEEP: usize = 2;

impl CardEffect for BusinessContacts {
    fn name(&self) -> CardName {
        CardName::BusinessContacts
    }

    fn card_type(&self) -> CardType {
        CardType::Event
    }

    fn cost(&self) -> i32 {
        7
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Earth, Tag::Event]
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        let drawn = game.draw_cards(LOOK_AT);
        if drawn.is_empty() {
            return Ok(None);
        }
        let keep = KEEP.min(drawn.len());
        let id = player.clone();
        let offered = drawn.clone();
        let node = SelectCard::new("Select cards to keep", "Keep", drawn, move |game, kept| {
            let discarded: Vec<CardName> = offered
                .iter()
                .copied()
                .filter(|card| !kept.contains(card))
                .collect();
            game.player_mut(&id)?.cards_in_hand.extend(kept);
            game.discard(discarded);
            Ok(Continuation::Done)
        })
        .with_bounds(keep, keep);
        Ok(Some(node.into()))
    }
}
