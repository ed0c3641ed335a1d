//! Per-session state.
//!
//! `GameState` owns everything a session mutates: participants, the shared
//! board counters, the project deck, and the per-session waiting registry and
//! deferred action queue. Nothing here is global, so independent sessions never
//! interfere.
//!
//! A session clones cheaply enough to checkpoint: the card catalog is shared.

use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::cards::{CardName, EffectRegistry};
use crate::deferred::DeferredActionQueue;
use crate::error::GameError;
use crate::ids::{GameId, PlayerId};
use crate::options::GameOptions;
use crate::player::Player;
use crate::timer::Clock;
use crate::types::{CardType, Tag};
use crate::waiting::WaitingRegistry;

/// Oceans available on the board.
pub const MAX_OCEANS: u32 = 9;

#[derive(Debug, Clone)]
pub struct GameState {
    pub id: GameId,
    /// Participants in turn order.
    pub players: Vec<Player>,
    pub first_player: Option<PlayerId>,
    pub generation: u32,
    pub oceans: u32,
    pub project_deck: Vec<CardName>,
    pub discard_pile: Vec<CardName>,
    pub waiting: WaitingRegistry,
    pub deferred_actions: DeferredActionQueue,
    pub options: GameOptions,
    /// Time source for participant timers.
    pub clock: Clock,
    effects: Rc<EffectRegistry>,
    rng: StdRng,
}

impl GameState {
    /// Create a session with the builtin card catalog.
    pub fn new(id: GameId, players: Vec<Player>, options: GameOptions) -> Self {
        Self::with_effects(id, players, options, EffectRegistry::with_builtin_cards())
    }

    pub fn with_effects(
        id: GameId,
        mut players: Vec<Player>,
        options: GameOptions,
        effects: EffectRegistry,
    ) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut project_deck: Vec<CardName> = effects
            .names()
            .filter(|&name| {
                effects
                    .get(name)
                    .is_some_and(|effect| effect.card_type().is_project())
            })
            .collect();
        project_deck.shuffle(&mut rng);

        for player in &mut players {
            player.mega_credits += options.starting_megacredits;
        }

        debug!(game = %id, players = players.len(), deck = project_deck.len(), "created game");
        Self {
            id,
            first_player: players.first().map(|p| p.id.clone()),
            players,
            generation: 1,
            oceans: 0,
            project_deck,
            discard_pile: Vec::new(),
            waiting: WaitingRegistry::new(),
            deferred_actions: DeferredActionQueue::new(),
            options,
            clock: Clock::default(),
            effects: Rc::new(effects),
            rng,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Shared handle on the card catalog.
    pub fn effects(&self) -> Rc<EffectRegistry> {
        Rc::clone(&self.effects)
    }

    pub fn is_solo(&self) -> bool {
        self.players.len() == 1
    }

    // ========================================================================
    // Participants
    // ========================================================================

    pub fn player(&self, id: &PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Tags on `player`'s corporation and played cards. Events only contribute their event tag.
    pub fn tag_count(&self, player: &PlayerId, tag: Tag) -> Result<usize, GameError> {
        let player = self.player(player)?;
        let from_corporation = player
            .corporation_card
            .iter()
            .flat_map(|corp| corp.tags.iter())
            .filter(|&&t| t == tag)
            .count();
        let from_cards = player
            .played_cards
            .iter()
            .filter_map(|played| self.effects.get(played.name))
            .flat_map(|effect| {
                let is_event = effect.card_type() == CardType::Event;
                effect
                    .tags()
                    .iter()
                    .filter(move |&&t| !is_event || t == Tag::Event)
            })
            .filter(|&&t| t == tag)
            .count();
        Ok(from_corporation + from_cards)
    }

    // ========================================================================
    // Deck
    // ========================================================================

    /// Draw the top project card, reshuffling the discard pile when the deck runs out.
    pub fn draw_card(&mut self) -> Option<CardName> {
        if self.project_deck.is_empty() && !self.discard_pile.is_empty() {
            debug!(cards = self.discard_pile.len(), "reshuffling discard pile");
            self.project_deck.append(&mut self.discard_pile);
            self.project_deck.shuffle(&mut self.rng);
        }
        self.project_deck.pop()
    }

    /// Draw up to `count` cards; fewer when deck and discard are both exhausted.
    pub fn draw_cards(&mut self, count: usize) -> Vec<CardName> {
        (0..count).map_while(|_| self.draw_card()).collect()
    }

    pub fn discard(&mut self, cards: impl IntoIterator<Item = CardName>) {
        self.discard_pile.extend(cards);
    }

    // ========================================================================
    // Board
    // ========================================================================

    /// Place an ocean for `player`. With the board full, nothing happens.
    pub fn place_ocean(&mut self, player: &PlayerId) -> Result<(), GameError> {
        if self.oceans >= MAX_OCEANS {
            debug!(player = %player, "no oceans left to place");
            return Ok(());
        }
        self.oceans += 1;
        self.player_mut(player)?.increase_terraform_rating();
        Ok(())
    }

    /// Advance to the next generation, resetting per-generation fields.
    pub fn start_generation(&mut self) {
        self.generation += 1;
        for player in &mut self.players {
            player.start_generation();
        }
        debug!(generation = self.generation, "generation started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::player::PlayedCard;
    use crate::tests::fixtures;

    #[test]
    fn test_seeded_deck_is_reproducible() {
        let players = || vec![Player::new(PlayerId::new("p1"), "p1", Color::Blue)];
        let a = GameState::new(GameId::new("a"), players(), GameOptions::seeded(7));
        let b = GameState::new(GameId::new("b"), players(), GameOptions::seeded(7));
        assert_eq!(a.project_deck, b.project_deck);
        assert!(!a.project_deck.contains(&CardName::SaturnSystems));
        assert!(!a.project_deck.contains(&CardName::AquiferTurbines));
    }

    #[test]
    fn test_unknown_player() {
        let game = fixtures::game(&["p1"]);
        assert_eq!(
            game.player(&PlayerId::new("nobody")).unwrap_err(),
            GameError::UnknownPlayer(PlayerId::new("nobody"))
        );
    }

    #[test]
    fn test_draw_reshuffles_discard_pile() {
        let mut game = fixtures::game(&["p1"]);
        let deck_size = game.project_deck.len();
        let drawn = game.draw_cards(deck_size);
        assert_eq!(drawn.len(), deck_size);
        assert!(game.draw_card().is_none());

        game.discard(drawn);
        assert!(game.draw_card().is_some());
        assert!(game.discard_pile.is_empty());
    }

    #[test]
    fn test_tag_count_includes_corporation() {
        let mut game = fixtures::game(&["p1"]);
        let p1 = PlayerId::new("p1");
        let saturn = game
            .effects()
            .corporation_card(CardName::SaturnSystems)
            .unwrap();
        let player = game.player_mut(&p1).unwrap();
        player.corporation_card = Some(saturn);
        player.played_cards.push(PlayedCard::new(CardName::IoMiningIndustries));
        player.played_cards.push(PlayedCard::new(CardName::LunarBeam));

        assert_eq!(game.tag_count(&p1, Tag::Jovian).unwrap(), 2);
        assert_eq!(game.tag_count(&p1, Tag::Power).unwrap(), 1);
        assert_eq!(game.tag_count(&p1, Tag::Science).unwrap(), 0);
    }

    #[test]
    fn test_ocean_placement_raises_terraform_rating() {
        let mut game = fixtures::game(&["p1"]);
        let p1 = PlayerId::new("p1");
        game.place_ocean(&p1).unwrap();
        assert_eq!(game.oceans, 1);
        assert_eq!(game.player(&p1).unwrap().terraform_rating, 21);

        game.oceans = MAX_OCEANS;
        game.place_ocean(&p1).unwrap();
        assert_eq!(game.oceans, MAX_OCEANS);
        assert_eq!(game.player(&p1).unwrap().terraform_rating, 21);
    }

    #[test]
    fn test_start_generation_resets_players() {
        let mut game = fixtures::game(&["p1"]);
        let p1 = PlayerId::new("p1");
        game.player_mut(&p1)
            .unwrap()
            .add_action_this_generation(CardName::Fish);
        game.start_generation();
        assert_eq!(game.generation, 2);
        assert!(game.player(&p1).unwrap().actions_this_generation().is_empty());
    }
}
