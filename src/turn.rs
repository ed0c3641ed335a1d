//! Turn actions driven by effect collaborators.
//!
//! This module handles:
//! - Playing a card from hand and notifying reactive cards
//! - Using a card's blue action
//! - Adding resources to cards in play
//! - Generation bookkeeping
//!
//! None of these are called by the resolution driver itself; they are the
//! entry points a turn controller uses, and each leaves the session either
//! idle or waiting on one participant.

use tracing::debug;

use crate::cards::{CardName, EffectRegistry};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::player::PlayedCard;
use crate::resolution::{self, Progress, request_decision};
use crate::types::CardType;

/// Play `card` for `player`.
///
/// The card leaves the hand if it is there, goes onto the tableau (or becomes
/// the corporation), and its effect runs. Cards in play and every corporation
/// are then told about it. Costs are not paid here.
pub fn play_card(
    game: &mut GameState,
    player: &PlayerId,
    card: CardName,
) -> Result<Progress, GameError> {
    let effects = game.effects();
    let effect = effects.require(card)?;
    if !effect.can_play(game, player) {
        return Err(GameError::rule(format!("{card} cannot be played by {player}")));
    }
    debug!(player = %player, card = card.id(), "playing card");

    let owner = game.player_mut(player)?;
    owner.take_from_hand(card);
    if effect.card_type() == CardType::Corporation {
        let corporation = effects.corporation_card(card)?;
        owner.mega_credits += corporation.starting_mega_credits;
        owner.corporation_card = Some(corporation);
    } else {
        owner.played_cards.push(PlayedCard::new(card));
    }
    owner.timer.mark_first_action();

    if let Some(node) = effect.play(game, player)? {
        request_decision(game, player, node)?;
    }
    notify_card_played(game, &effects, player, card)?;

    settle_turn(game, player)
}

/// Use the blue action of `card`, once per generation.
pub fn use_card_action(
    game: &mut GameState,
    player: &PlayerId,
    card: CardName,
) -> Result<Progress, GameError> {
    let effects = game.effects();
    let effect = effects.require(card)?;
    let actor = game.player(player)?;
    if !actor.has_played(card) {
        return Err(GameError::rule(format!("{player} has not played {card}")));
    }
    if actor.has_used_action(card) {
        return Err(GameError::rule(format!(
            "{card} action already used this generation"
        )));
    }
    if !effect.can_act(game, player) {
        return Err(GameError::rule(format!("{card} action is not available")));
    }
    debug!(player = %player, card = card.id(), "using card action");

    let actor = game.player_mut(player)?;
    actor.add_action_this_generation(card);
    actor.actions_taken_this_round += 1;

    if let Some(node) = effect.act(game, player)? {
        request_decision(game, player, node)?;
    }
    settle_turn(game, player)
}

/// Add `count` resources to `card` on `player`'s tableau and notify their cards.
pub fn add_card_resource(
    game: &mut GameState,
    player: &PlayerId,
    card: CardName,
    count: i32,
) -> Result<(), GameError> {
    let effects = game.effects();
    let resource = effects
        .require(card)?
        .resource_type()
        .ok_or_else(|| GameError::rule(format!("{card} cannot hold resources")))?;
    let played = game
        .player_mut(player)?
        .played_card_mut(card)
        .ok_or_else(|| GameError::rule(format!("{card} is not in play")))?;
    played.resource_count += count;
    debug!(player = %player, card = card.id(), ?resource, count, "added card resources");

    for listener in listeners(game, player)? {
        if let Some(effect) = effects.get(listener) {
            effect.on_resource_added(game, player, card, resource, count)?;
        }
    }
    Ok(())
}

/// Advance to the next generation. Fails while anything is still pending.
pub fn start_generation(game: &mut GameState) -> Result<(), GameError> {
    if !game.waiting.is_empty() || !game.deferred_actions.is_empty() {
        return Err(GameError::rule(
            "cannot start a generation with unresolved decisions",
        ));
    }
    game.start_generation();
    Ok(())
}

/// `player`'s cards in play plus their corporation.
fn listeners(game: &GameState, player: &PlayerId) -> Result<Vec<CardName>, GameError> {
    let owner = game.player(player)?;
    Ok(owner
        .played_cards
        .iter()
        .map(|played| played.name)
        .chain(owner.corporation())
        .collect())
}

fn notify_card_played(
    game: &mut GameState,
    effects: &EffectRegistry,
    played_by: &PlayerId,
    card: CardName,
) -> Result<(), GameError> {
    let own_cards: Vec<CardName> = game
        .player(played_by)?
        .played_cards
        .iter()
        .map(|played| played.name)
        .filter(|&name| name != card)
        .collect();
    for name in own_cards {
        if let Some(effect) = effects.get(name) {
            effect.on_card_played(game, played_by, played_by, card)?;
        }
    }

    let corporations: Vec<(PlayerId, CardName)> = game
        .players
        .iter()
        .filter_map(|p| p.corporation().map(|corp| (p.id.clone(), corp)))
        .filter(|&(_, corp)| corp != card)
        .collect();
    for (owner, corporation) in corporations {
        effects
            .require(corporation)?
            .on_card_played(game, &owner, played_by, card)?;
    }
    Ok(())
}

fn settle_turn(game: &mut GameState, player: &PlayerId) -> Result<Progress, GameError> {
    match resolution::blocked_player(game, player) {
        Some(blocked) => Ok(Progress::Waiting(blocked)),
        None => resolution::drain(game),
    }
}
