//! Card effect catalog.
//!
//! Each card is an implementation of [`CardEffect`], defined in its own file
//! under `definitions/`. The [`EffectRegistry`] maps a [`CardName`] to its
//! implementation; the session owns one and hands it to callers through an
//! `Rc`, so an effect can mutate the session while its own definition stays
//! borrowed.

pub mod card_name;
pub mod definitions;

pub use card_name::CardName;
pub use definitions::*;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::decisions::{Continuation, DecisionNode, SelectAmount};
use crate::deferred::DeferredAction;
use crate::error::{GameError, SnapshotError};
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::types::{CardResource, CardType, Resource, Tag};

/// Behaviour shared by every card.
///
/// `can_play` is a pure eligibility check. `play` may mutate the session and
/// push deferred actions; returning `Some(node)` means the card still needs
/// input from `player`.
pub trait CardEffect {
    fn name(&self) -> CardName;

    fn card_type(&self) -> CardType;

    fn cost(&self) -> i32 {
        0
    }

    fn tags(&self) -> &'static [Tag] {
        &[]
    }

    /// Resource this card can hold, if any.
    fn resource_type(&self) -> Option<CardResource> {
        None
    }

    /// Starting megacredits, for corporations.
    fn starting_mega_credits(&self) -> i32 {
        0
    }

    fn victory_points(&self, _game: &GameState, _player: &PlayerId) -> i32 {
        0
    }

    fn can_play(&self, _game: &GameState, _player: &PlayerId) -> bool {
        true
    }

    fn play(
        &self,
        game: &mut GameState,
        player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError>;

    /// Whether the card's blue action is available.
    fn can_act(&self, _game: &GameState, _player: &PlayerId) -> bool {
        false
    }

    fn act(
        &self,
        _game: &mut GameState,
        _player: &PlayerId,
    ) -> Result<Option<DecisionNode>, GameError> {
        Err(GameError::rule(format!("{} has no action", self.name())))
    }

    /// Called on every card in play (and corporations) after any participant plays `card`.
    fn on_card_played(
        &self,
        _game: &mut GameState,
        _owner: &PlayerId,
        _played_by: &PlayerId,
        _card: CardName,
    ) -> Result<(), GameError> {
        Ok(())
    }

    /// Called on the owner's cards after `count` resources were added to `card`.
    fn on_resource_added(
        &self,
        _game: &mut GameState,
        _owner: &PlayerId,
        _card: CardName,
        _resource: CardResource,
        _count: i32,
    ) -> Result<(), GameError> {
        Ok(())
    }
}

/// The in-memory form of a corporation, rebuilt from its name on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporationCard {
    pub name: CardName,
    pub starting_mega_credits: i32,
    pub tags: Vec<Tag>,
}

/// Registry of card effects, keyed by card name.
#[derive(Default)]
pub struct EffectRegistry {
    effects: HashMap<CardName, Box<dyn CardEffect>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every card in `definitions/`.
    pub fn with_builtin_cards() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(AquiferTurbines));
        registry.register(Box::new(ArtificialPhotosynthesis));
        registry.register(Box::new(BusinessContacts));
        registry.register(Box::new(Fish));
        registry.register(Box::new(Insulation));
        registry.register(Box::new(IoMiningIndustries));
        registry.register(Box::new(LagrangeObservatory));
        registry.register(Box::new(LunarBeam));
        registry.register(Box::new(MeatIndustry));
        registry.register(Box::new(PowerSupplyConsortium));
        registry.register(Box::new(SaturnSystems));
        registry.register(Box::new(TharsisRepublic));
        registry
    }

    pub fn register(&mut self, effect: Box<dyn CardEffect>) {
        self.effects.insert(effect.name(), effect);
    }

    pub fn get(&self, name: CardName) -> Option<&dyn CardEffect> {
        self.effects.get(&name).map(|effect| effect.as_ref())
    }

    /// Like [`get`](Self::get), failing for cards without an implementation.
    pub fn require(&self, name: CardName) -> Result<&dyn CardEffect, GameError> {
        self.get(name).ok_or(GameError::UnregisteredCard(name))
    }

    /// Registered names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = CardName> + '_ {
        CardName::ALL
            .iter()
            .copied()
            .filter(|name| self.effects.contains_key(name))
    }

    /// Rebuild the full corporation record for `name`.
    pub fn corporation_card(&self, name: CardName) -> Result<CorporationCard, SnapshotError> {
        let effect = self
            .get(name)
            .ok_or_else(|| SnapshotError::UnknownCard(name.id().to_string()))?;
        if effect.card_type() != CardType::Corporation {
            return Err(SnapshotError::NotACorporation(name));
        }
        Ok(CorporationCard {
            name,
            starting_mega_credits: effect.starting_mega_credits(),
            tags: effect.tags().to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("cards", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Shared deferred actions
// ============================================================================

/// Deferred payment of `cost` megacredits.
///
/// When heat may stand in for megacredits the participant is asked how much
/// heat to spend; otherwise the megacredits are deducted directly.
pub fn pay_mega_credits(player: PlayerId, cost: i32, reason: CardName) -> DeferredAction {
    let label = format!("pay {cost} MC for {reason}");
    DeferredAction::new(player.clone(), label, move |game| {
        let payer = game.player(&player)?;
        if !payer.can_afford(cost) {
            return Err(GameError::rule(format!(
                "{player} cannot afford {cost} MC for {reason}"
            )));
        }
        if !payer.can_use_heat_as_mega_credits || payer.heat == 0 {
            game.player_mut(&player)?
                .deduct_resource(Resource::MegaCredits, cost)?;
            return Ok(Continuation::Done);
        }

        let max_heat = payer.heat.min(cost);
        let min_heat = (cost - payer.mega_credits).max(0);
        let player = player.clone();
        let node = SelectAmount::new(
            format!("Select how much heat to spend on {reason}"),
            "Spend",
            max_heat,
            move |game, heat| {
                let payer = game.player_mut(&player)?;
                let mega_credits = cost - heat;
                // Balances may have moved since the prompt was built.
                if payer.heat < heat || payer.mega_credits < mega_credits {
                    return Err(GameError::rule(format!(
                        "{player} cannot pay {heat} heat and {mega_credits} MC for {reason}"
                    )));
                }
                payer.deduct_resource(Resource::Heat, heat)?;
                payer.deduct_resource(Resource::MegaCredits, mega_credits)?;
                Ok(Continuation::Done)
            },
        )
        .with_min(min_heat);
        Ok(Continuation::next(node))
    })
}

/// Deferred ocean placement: one more ocean on the board and +1 TR for `player`.
pub fn place_ocean_tile(player: PlayerId) -> DeferredAction {
    DeferredAction::new(player.clone(), "place ocean tile", move |game| {
        game.place_ocean(&player)?;
        Ok(Continuation::Done)
    })
}
