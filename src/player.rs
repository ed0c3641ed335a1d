use serde::{Deserialize, Serialize};

use crate::cards::{CardName, CorporationCard};
use crate::color::Color;
use crate::error::GameError;
use crate::ids::PlayerId;
use crate::timer::Timer;
use crate::types::Resource;
use crate::victory_points::VictoryPointsBreakdown;

/// A card on a participant's tableau, with the resources stored on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    pub name: CardName,
    #[serde(default)]
    pub resource_count: i32,
}

impl PlayedCard {
    pub fn new(name: CardName) -> Self {
        Self {
            name,
            resource_count: 0,
        }
    }
}

/// Per-participant session state.
///
/// Field order and names follow the persisted record ([`crate::snapshot::SerializedPlayer`]);
/// the two key sets are kept identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    pub beginner: bool,
    pub handicap: i32,

    // ====== Terraform rating ======
    pub terraform_rating: i32,
    pub has_increased_terraform_rating_this_generation: bool,
    pub terraform_rating_at_generation_start: i32,

    // ====== Corporation ======
    pub picked_corporation_card: Option<CorporationCard>,
    pub corporation_card: Option<CorporationCard>,
    pub corporation_initial_action_done: bool,

    // ====== Resources ======
    pub mega_credits: i32,
    pub mega_credit_production: i32,
    pub steel: i32,
    pub steel_production: i32,
    pub titanium: i32,
    pub titanium_production: i32,
    pub plants: i32,
    pub plant_production: i32,
    pub energy: i32,
    pub energy_production: i32,
    pub heat: i32,
    pub heat_production: i32,
    pub titanium_value: i32,
    pub steel_value: i32,
    pub can_use_heat_as_mega_credits: bool,

    // ====== Actions ======
    pub actions_taken_this_round: u32,
    pub(crate) actions_this_generation: Vec<CardName>,

    // ====== Cards ======
    pub dealt_corporation_cards: Vec<CardName>,
    pub dealt_project_cards: Vec<CardName>,
    pub dealt_prelude_cards: Vec<CardName>,
    pub cards_in_hand: Vec<CardName>,
    pub prelude_cards_in_hand: Vec<CardName>,
    pub played_cards: Vec<PlayedCard>,
    pub drafted_cards: Vec<CardName>,
    pub removed_from_play_cards: Vec<CardName>,
    pub needs_to_draft: bool,
    pub used_undo: bool,

    // ====== Cost modifiers ======
    pub card_cost: i32,
    pub card_discount: i32,
    pub power_plant_cost: i32,
    pub ocean_bonus: i32,
    pub plants_needed_for_greenery: i32,

    // ====== Colonies and turmoil ======
    pub fleet_size: i32,
    pub trades_this_turn: i32,
    pub colony_trade_offset: i32,
    pub colony_trade_discount: i32,
    pub colony_victory_points: i32,
    pub turmoil_scientists_action_used: bool,

    pub removing_players: Vec<PlayerId>,
    pub science_tag_count: i32,
    pub victory_points_breakdown: VictoryPointsBreakdown,
    pub timer: Timer,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            beginner: false,
            handicap: 0,
            terraform_rating: 20,
            has_increased_terraform_rating_this_generation: false,
            terraform_rating_at_generation_start: 20,
            picked_corporation_card: None,
            corporation_card: None,
            corporation_initial_action_done: false,
            mega_credits: 0,
            mega_credit_production: 0,
            steel: 0,
            steel_production: 0,
            titanium: 0,
            titanium_production: 0,
            plants: 0,
            plant_production: 0,
            energy: 0,
            energy_production: 0,
            heat: 0,
            heat_production: 0,
            titanium_value: 3,
            steel_value: 2,
            can_use_heat_as_mega_credits: false,
            actions_taken_this_round: 0,
            actions_this_generation: Vec::new(),
            dealt_corporation_cards: Vec::new(),
            dealt_project_cards: Vec::new(),
            dealt_prelude_cards: Vec::new(),
            cards_in_hand: Vec::new(),
            prelude_cards_in_hand: Vec::new(),
            played_cards: Vec::new(),
            drafted_cards: Vec::new(),
            removed_from_play_cards: Vec::new(),
            needs_to_draft: false,
            used_undo: false,
            card_cost: 3,
            card_discount: 0,
            power_plant_cost: 11,
            ocean_bonus: 2,
            plants_needed_for_greenery: 8,
            fleet_size: 1,
            trades_this_turn: 0,
            colony_trade_offset: 0,
            colony_trade_discount: 0,
            colony_victory_points: 0,
            turmoil_scientists_action_used: false,
            removing_players: Vec::new(),
            science_tag_count: 0,
            victory_points_breakdown: VictoryPointsBreakdown::new(),
            timer: Timer::new(),
        }
    }

    // ====== Resources ======

    /// Current stock of a resource.
    pub fn resource(&self, resource: Resource) -> i32 {
        match resource {
            Resource::MegaCredits => self.mega_credits,
            Resource::Steel => self.steel,
            Resource::Titanium => self.titanium,
            Resource::Plants => self.plants,
            Resource::Energy => self.energy,
            Resource::Heat => self.heat,
        }
    }

    fn resource_mut(&mut self, resource: Resource) -> &mut i32 {
        match resource {
            Resource::MegaCredits => &mut self.mega_credits,
            Resource::Steel => &mut self.steel,
            Resource::Titanium => &mut self.titanium,
            Resource::Plants => &mut self.plants,
            Resource::Energy => &mut self.energy,
            Resource::Heat => &mut self.heat,
        }
    }

    pub fn production(&self, resource: Resource) -> i32 {
        match resource {
            Resource::MegaCredits => self.mega_credit_production,
            Resource::Steel => self.steel_production,
            Resource::Titanium => self.titanium_production,
            Resource::Plants => self.plant_production,
            Resource::Energy => self.energy_production,
            Resource::Heat => self.heat_production,
        }
    }

    fn production_mut(&mut self, resource: Resource) -> &mut i32 {
        match resource {
            Resource::MegaCredits => &mut self.mega_credit_production,
            Resource::Steel => &mut self.steel_production,
            Resource::Titanium => &mut self.titanium_production,
            Resource::Plants => &mut self.plant_production,
            Resource::Energy => &mut self.energy_production,
            Resource::Heat => &mut self.heat_production,
        }
    }

    /// Adds (or removes, if negative) stock. Stock never drops below zero.
    pub fn add_resource(&mut self, resource: Resource, amount: i32) {
        let stock = self.resource_mut(resource);
        *stock = (*stock + amount).max(0);
    }

    /// Removes exactly `amount`, failing without change if the stock is short.
    pub fn deduct_resource(&mut self, resource: Resource, amount: i32) -> Result<(), GameError> {
        let stock = self.resource(resource);
        if stock < amount {
            return Err(GameError::rule(format!(
                "{} has {stock} {resource:?}, needs {amount}",
                self.id
            )));
        }
        *self.resource_mut(resource) -= amount;
        Ok(())
    }

    /// Adjusts production, clamped at the resource's floor.
    pub fn add_production(&mut self, resource: Resource, amount: i32) {
        let floor = resource.minimum_production();
        let production = self.production_mut(resource);
        *production = (*production + amount).max(floor);
    }

    /// Whether production can drop by `amount` without hitting the floor.
    pub fn can_reduce_production(&self, resource: Resource, amount: i32) -> bool {
        self.production(resource) - amount >= resource.minimum_production()
    }

    /// Megacredits available for a payment, counting heat when it may stand in.
    pub fn spendable_mega_credits(&self) -> i32 {
        if self.can_use_heat_as_mega_credits {
            self.mega_credits + self.heat
        } else {
            self.mega_credits
        }
    }

    pub fn can_afford(&self, cost: i32) -> bool {
        self.spendable_mega_credits() >= cost
    }

    // ====== Terraforming ======

    pub fn increase_terraform_rating(&mut self) {
        self.terraform_rating += 1;
        self.has_increased_terraform_rating_this_generation = true;
    }

    // ====== Actions ======

    /// Card actions used this generation, in the order they were taken.
    pub fn actions_this_generation(&self) -> &[CardName] {
        &self.actions_this_generation
    }

    pub fn add_action_this_generation(&mut self, card: CardName) {
        if !self.actions_this_generation.contains(&card) {
            self.actions_this_generation.push(card);
        }
    }

    pub fn has_used_action(&self, card: CardName) -> bool {
        self.actions_this_generation.contains(&card)
    }

    // ====== Cards ======

    pub fn has_played(&self, card: CardName) -> bool {
        self.played_cards.iter().any(|played| played.name == card)
    }

    pub fn played_card_mut(&mut self, card: CardName) -> Option<&mut PlayedCard> {
        self.played_cards.iter_mut().find(|played| played.name == card)
    }

    /// Resources stored on a played card; zero when the card is not in play.
    pub fn card_resources(&self, card: CardName) -> i32 {
        self.played_cards
            .iter()
            .find(|played| played.name == card)
            .map_or(0, |played| played.resource_count)
    }

    /// Removes `card` from hand, returning whether it was there.
    pub fn take_from_hand(&mut self, card: CardName) -> bool {
        let hand = if self.cards_in_hand.contains(&card) {
            &mut self.cards_in_hand
        } else {
            &mut self.prelude_cards_in_hand
        };
        match hand.iter().position(|&c| c == card) {
            Some(index) => {
                hand.remove(index);
                true
            }
            None => false,
        }
    }

    /// The active corporation, if one has been played.
    pub fn corporation(&self) -> Option<CardName> {
        self.corporation_card.as_ref().map(|corp| corp.name)
    }

    /// Per-generation reset, run when a new generation starts.
    pub fn start_generation(&mut self) {
        self.actions_this_generation.clear();
        self.actions_taken_this_round = 0;
        self.has_increased_terraform_rating_this_generation = false;
        self.terraform_rating_at_generation_start = self.terraform_rating;
        self.trades_this_turn = 0;
        self.turmoil_scientists_action_used = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue() -> Player {
        Player::new(PlayerId::new("blue-id"), "player-blue", Color::Blue)
    }

    #[test]
    fn test_initializes_with_defaults() {
        let player = blue();
        assert!(player.corporation_card.is_none());
        assert_eq!(player.terraform_rating, 20);
        assert_eq!(player.timer, Timer::new());
    }

    #[test]
    fn test_production_floor() {
        let mut player = blue();
        player.add_production(Resource::Heat, -3);
        assert_eq!(player.production(Resource::Heat), 0);

        player.add_production(Resource::MegaCredits, -9);
        assert_eq!(player.production(Resource::MegaCredits), -5);
        assert!(!player.can_reduce_production(Resource::MegaCredits, 1));
    }

    #[test]
    fn test_deduct_resource_requires_stock() {
        let mut player = blue();
        player.add_resource(Resource::Steel, 2);
        assert!(player.deduct_resource(Resource::Steel, 3).is_err());
        assert_eq!(player.steel, 2);
        player.deduct_resource(Resource::Steel, 2).unwrap();
        assert_eq!(player.steel, 0);
    }

    #[test]
    fn test_actions_this_generation_are_ordered_and_unique() {
        let mut player = blue();
        player.add_action_this_generation(CardName::FoodFactory);
        player.add_action_this_generation(CardName::GeneRepair);
        player.add_action_this_generation(CardName::FoodFactory);
        assert_eq!(
            player.actions_this_generation(),
            &[CardName::FoodFactory, CardName::GeneRepair]
        );

        player.start_generation();
        assert!(player.actions_this_generation().is_empty());
    }

    #[test]
    fn test_heat_counts_toward_payment_when_allowed() {
        let mut player = blue();
        player.mega_credits = 1;
        player.heat = 4;
        assert!(!player.can_afford(3));
        player.can_use_heat_as_mega_credits = true;
        assert!(player.can_afford(3));
    }

    #[test]
    fn test_take_from_hand_checks_both_hands() {
        let mut player = blue();
        player.cards_in_hand.push(CardName::Fish);
        player.prelude_cards_in_hand.push(CardName::AquiferTurbines);
        assert!(player.take_from_hand(CardName::AquiferTurbines));
        assert!(player.take_from_hand(CardName::Fish));
        assert!(!player.take_from_hand(CardName::Fish));
    }
}
