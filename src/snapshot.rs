//! Persisted participant records.
//!
//! [`SerializedPlayer`] is the on-disk shape of a [`Player`]: the same keys,
//! with corporations stored by canonical card id. Loading goes through
//! [`load_player`], which in [`SnapshotMode::Legacy`] first runs an ordered
//! chain of migrations that rewrite older record shapes into the current one.
//! Nothing outside this module ever looks at a legacy shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cards::{CardName, EffectRegistry};
use crate::color::Color;
use crate::error::SnapshotError;
use crate::ids::PlayerId;
use crate::player::{PlayedCard, Player};
use crate::timer::Timer;
use crate::victory_points::VictoryPointsBreakdown;

/// The persisted participant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    pub beginner: bool,
    pub handicap: i32,
    pub terraform_rating: i32,
    pub has_increased_terraform_rating_this_generation: bool,
    pub terraform_rating_at_generation_start: i32,
    pub picked_corporation_card: Option<CardName>,
    pub corporation_card: Option<CardName>,
    pub corporation_initial_action_done: bool,
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
    pub actions_taken_this_round: u32,
    pub actions_this_generation: Vec<CardName>,
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
    pub card_cost: i32,
    pub card_discount: i32,
    pub power_plant_cost: i32,
    pub ocean_bonus: i32,
    pub plants_needed_for_greenery: i32,
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

/// How tolerant loading is of older record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotMode {
    /// Decode the current schema only.
    Strict,
    /// Run the migration chain first.
    #[default]
    Legacy,
}

impl Player {
    pub fn serialize(&self) -> SerializedPlayer {
        let Player {
            id,
            name,
            color,
            beginner,
            handicap,
            terraform_rating,
            has_increased_terraform_rating_this_generation,
            terraform_rating_at_generation_start,
            picked_corporation_card,
            corporation_card,
            corporation_initial_action_done,
            mega_credits,
            mega_credit_production,
            steel,
            steel_production,
            titanium,
            titanium_production,
            plants,
            plant_production,
            energy,
            energy_production,
            heat,
            heat_production,
            titanium_value,
            steel_value,
            can_use_heat_as_mega_credits,
            actions_taken_this_round,
            actions_this_generation,
            dealt_corporation_cards,
            dealt_project_cards,
            dealt_prelude_cards,
            cards_in_hand,
            prelude_cards_in_hand,
            played_cards,
            drafted_cards,
            removed_from_play_cards,
            needs_to_draft,
            used_undo,
            card_cost,
            card_discount,
            power_plant_cost,
            ocean_bonus,
            plants_needed_for_greenery,
            fleet_size,
            trades_this_turn,
            colony_trade_offset,
            colony_trade_discount,
            colony_victory_points,
            turmoil_scientists_action_used,
            removing_players,
            science_tag_count,
            victory_points_breakdown,
            timer,
        } = self.clone();

        SerializedPlayer {
            id,
            name,
            color,
            beginner,
            handicap,
            terraform_rating,
            has_increased_terraform_rating_this_generation,
            terraform_rating_at_generation_start,
            picked_corporation_card: picked_corporation_card.map(|corp| corp.name),
            corporation_card: corporation_card.map(|corp| corp.name),
            corporation_initial_action_done,
            mega_credits,
            mega_credit_production,
            steel,
            steel_production,
            titanium,
            titanium_production,
            plants,
            plant_production,
            energy,
            energy_production,
            heat,
            heat_production,
            titanium_value,
            steel_value,
            can_use_heat_as_mega_credits,
            actions_taken_this_round,
            actions_this_generation,
            dealt_corporation_cards,
            dealt_project_cards,
            dealt_prelude_cards,
            cards_in_hand,
            prelude_cards_in_hand,
            played_cards,
            drafted_cards,
            removed_from_play_cards,
            needs_to_draft,
            used_undo,
            card_cost,
            card_discount,
            power_plant_cost,
            ocean_bonus,
            plants_needed_for_greenery,
            fleet_size,
            trades_this_turn,
            colony_trade_offset,
            colony_trade_discount,
            colony_victory_points,
            turmoil_scientists_action_used,
            removing_players,
            science_tag_count,
            victory_points_breakdown,
            timer,
        }
    }

    /// Rebuild a participant, rehydrating corporations through `cards`.
    pub fn deserialize(
        record: SerializedPlayer,
        cards: &EffectRegistry,
    ) -> Result<Player, SnapshotError> {
        let SerializedPlayer {
            id,
            name,
            color,
            beginner,
            handicap,
            terraform_rating,
            has_increased_terraform_rating_this_generation,
            terraform_rating_at_generation_start,
            picked_corporation_card,
            corporation_card,
            corporation_initial_action_done,
            mega_credits,
            mega_credit_production,
            steel,
            steel_production,
            titanium,
            titanium_production,
            plants,
            plant_production,
            energy,
            energy_production,
            heat,
            heat_production,
            titanium_value,
            steel_value,
            can_use_heat_as_mega_credits,
            actions_taken_this_round,
            actions_this_generation,
            dealt_corporation_cards,
            dealt_project_cards,
            dealt_prelude_cards,
            cards_in_hand,
            prelude_cards_in_hand,
            played_cards,
            drafted_cards,
            removed_from_play_cards,
            needs_to_draft,
            used_undo,
            card_cost,
            card_discount,
            power_plant_cost,
            ocean_bonus,
            plants_needed_for_greenery,
            fleet_size,
            trades_this_turn,
            colony_trade_offset,
            colony_trade_discount,
            colony_victory_points,
            turmoil_scientists_action_used,
            removing_players,
            science_tag_count,
            victory_points_breakdown,
            timer,
        } = record;

        let corporation = |name: Option<CardName>| {
            name.map(|name| cards.corporation_card(name)).transpose()
        };

        Ok(Player {
            id,
            name,
            color,
            beginner,
            handicap,
            terraform_rating,
            has_increased_terraform_rating_this_generation,
            terraform_rating_at_generation_start,
            picked_corporation_card: corporation(picked_corporation_card)?,
            corporation_card: corporation(corporation_card)?,
            corporation_initial_action_done,
            mega_credits,
            mega_credit_production,
            steel,
            steel_production,
            titanium,
            titanium_production,
            plants,
            plant_production,
            energy,
            energy_production,
            heat,
            heat_production,
            titanium_value,
            steel_value,
            can_use_heat_as_mega_credits,
            actions_taken_this_round,
            actions_this_generation,
            dealt_corporation_cards,
            dealt_project_cards,
            dealt_prelude_cards,
            cards_in_hand,
            prelude_cards_in_hand,
            played_cards,
            drafted_cards,
            removed_from_play_cards,
            needs_to_draft,
            used_undo,
            card_cost,
            card_discount,
            power_plant_cost,
            ocean_bonus,
            plants_needed_for_greenery,
            fleet_size,
            trades_this_turn,
            colony_trade_offset,
            colony_trade_discount,
            colony_victory_points,
            turmoil_scientists_action_used,
            removing_players,
            science_tag_count,
            victory_points_breakdown,
            timer,
        })
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a participant record with the builtin card catalog.
pub fn load_player(value: Value, mode: SnapshotMode) -> Result<Player, SnapshotError> {
    load_player_with(&EffectRegistry::with_builtin_cards(), value, mode)
}

pub fn load_player_with(
    cards: &EffectRegistry,
    value: Value,
    mode: SnapshotMode,
) -> Result<Player, SnapshotError> {
    let record = decode_record(value, mode)?;
    Player::deserialize(record, cards)
}

/// Decode `value` into the current record shape, migrating first in legacy mode.
pub fn decode_record(value: Value, mode: SnapshotMode) -> Result<SerializedPlayer, SnapshotError> {
    let value = match mode {
        SnapshotMode::Strict => value,
        SnapshotMode::Legacy => {
            let Value::Object(mut record) = value else {
                return Err(SnapshotError::Malformed(
                    "player record is not an object".to_string(),
                ));
            };
            migrate(&mut record)?;
            Value::Object(record)
        }
    };
    Ok(serde_json::from_value(value)?)
}

// ============================================================================
// Migrations
// ============================================================================

/// One rewrite of an older record shape. Returns whether anything changed.
struct Migration {
    name: &'static str,
    apply: fn(&mut Map<String, Value>) -> Result<bool, SnapshotError>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "corporation card objects and names to ids",
        apply: corporation_ids,
    },
    Migration {
        name: "card display names to ids",
        apply: card_list_ids,
    },
    Migration {
        name: "missing timer",
        apply: default_timer,
    },
];

const CORPORATION_KEYS: &[&str] = &["pickedCorporationCard", "corporationCard"];

const CARD_LIST_KEYS: &[&str] = &[
    "actionsThisGeneration",
    "dealtCorporationCards",
    "dealtProjectCards",
    "dealtPreludeCards",
    "cardsInHand",
    "preludeCardsInHand",
    "draftedCards",
    "removedFromPlayCards",
];

fn migrate(record: &mut Map<String, Value>) -> Result<(), SnapshotError> {
    for migration in MIGRATIONS {
        if (migration.apply)(record)? {
            let player = record
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("?");
            warn!(
                migration = migration.name,
                player,
                "migrated legacy player record"
            );
        } else {
            debug!(migration = migration.name, "record already current");
        }
    }
    Ok(())
}

/// Rewrite a card name string in place to its canonical id.
fn canonicalize(value: &mut Value) -> Result<bool, SnapshotError> {
    let Value::String(text) = value else {
        return Ok(false);
    };
    if CardName::from_id(text).is_some() {
        return Ok(false);
    }
    let card = CardName::from_display_name(text)
        .ok_or_else(|| SnapshotError::UnknownCard(text.clone()))?;
    *value = Value::String(card.id().to_string());
    Ok(true)
}

fn corporation_ids(record: &mut Map<String, Value>) -> Result<bool, SnapshotError> {
    let mut changed = false;
    for &key in CORPORATION_KEYS {
        let Some(value) = record.get_mut(key) else {
            continue;
        };
        if let Value::Object(card) = value {
            let name = card.get("name").cloned().ok_or_else(|| {
                SnapshotError::Malformed(format!("{key} object has no name"))
            })?;
            *value = name;
            changed = true;
        }
        changed |= canonicalize(value)?;
    }
    Ok(changed)
}

fn card_list_ids(record: &mut Map<String, Value>) -> Result<bool, SnapshotError> {
    let mut changed = false;
    for &key in CARD_LIST_KEYS {
        if let Some(Value::Array(cards)) = record.get_mut(key) {
            for card in cards {
                changed |= canonicalize(card)?;
            }
        }
    }

    if let Some(Value::Array(played)) = record.get_mut("playedCards") {
        for entry in played {
            if entry.is_string() {
                canonicalize(entry)?;
                let name = entry.take();
                *entry = serde_json::json!({ "name": name, "resourceCount": 0 });
                changed = true;
            } else if let Some(name) = entry.get_mut("name") {
                changed |= canonicalize(name)?;
            }
        }
    }
    Ok(changed)
}

fn default_timer(record: &mut Map<String, Value>) -> Result<bool, SnapshotError> {
    match record.get("timer") {
        Some(value) if !value.is_null() => Ok(false),
        _ => {
            record.insert("timer".to_string(), serde_json::to_value(Timer::new())?);
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CorporationCard;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn blue() -> Player {
        Player::new(PlayerId::new("blue-id"), "player-blue", Color::Blue)
    }

    fn keys(value: Value) -> BTreeSet<String> {
        match value {
            Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("expected an object, got {other}"),
        }
    }

    fn saturn() -> CorporationCard {
        EffectRegistry::with_builtin_cards()
            .corporation_card(CardName::SaturnSystems)
            .unwrap()
    }

    #[test]
    fn test_serializes_every_property() {
        let player = blue();
        let in_memory = keys(serde_json::to_value(&player).unwrap());
        let persisted = keys(serde_json::to_value(player.serialize()).unwrap());
        assert_eq!(in_memory, persisted);
        assert_eq!(persisted.len(), 53);
    }

    #[test]
    fn test_forward_serialization_of_picked_corporation() {
        let mut player = blue();
        player.picked_corporation_card = Some(saturn());
        let json = serde_json::to_value(player.serialize()).unwrap();
        assert_eq!(json["pickedCorporationCard"], json!("saturn-systems"));
    }

    #[test]
    fn test_legacy_picked_corporation_object() {
        let mut json = serde_json::to_value(blue().serialize()).unwrap();
        json["pickedCorporationCard"] = json!({
            "name": "Saturn Systems",
            "cardType": "corporation",
            "startingMegaCredits": 42,
            "tags": ["jovian"],
        });

        let player = load_player(json.clone(), SnapshotMode::Legacy).unwrap();
        assert_eq!(player.picked_corporation_card, Some(saturn()));
        assert!(load_player(json, SnapshotMode::Strict).is_err());
    }

    #[test]
    fn test_legacy_actions_this_generation_display_names() {
        let mut json = serde_json::to_value(blue().serialize()).unwrap();
        json["actionsThisGeneration"] = json!(["Food Factory", "Gene Repair"]);

        let player = load_player(json, SnapshotMode::Legacy).unwrap();
        assert_eq!(
            player.actions_this_generation(),
            &[CardName::FoodFactory, CardName::GeneRepair]
        );
    }

    #[test]
    fn test_legacy_played_cards_display_names() {
        let mut json = serde_json::to_value(blue().serialize()).unwrap();
        json["playedCards"] = json!(["Fish", {"name": "Meat Industry", "resourceCount": 0}]);

        let player = load_player(json, SnapshotMode::Legacy).unwrap();
        assert_eq!(
            player.played_cards,
            vec![
                PlayedCard::new(CardName::Fish),
                PlayedCard::new(CardName::MeatIndustry)
            ]
        );
    }

    #[test]
    fn test_legacy_missing_timer() {
        let mut json = serde_json::to_value(blue().serialize()).unwrap();
        json.as_object_mut().unwrap().remove("timer");

        assert!(load_player(json.clone(), SnapshotMode::Strict).is_err());
        let player = load_player(json, SnapshotMode::Legacy).unwrap();
        assert_eq!(player.timer, Timer::new());

        let mut json = serde_json::to_value(blue().serialize()).unwrap();
        json["timer"] = Value::Null;
        let player = load_player(json, SnapshotMode::Legacy).unwrap();
        assert_eq!(player.timer, Timer::new());
    }

    #[test]
    fn test_unknown_card_is_surfaced() {
        let mut json = serde_json::to_value(blue().serialize()).unwrap();
        json["cardsInHand"] = json!(["Retired Card"]);
        assert_eq!(
            load_player(json, SnapshotMode::Legacy).unwrap_err(),
            SnapshotError::UnknownCard("Retired Card".into())
        );
    }

    #[test]
    fn test_non_object_record_is_malformed() {
        assert!(matches!(
            load_player(json!([1, 2]), SnapshotMode::Legacy),
            Err(SnapshotError::Malformed(_))
        ));
    }

    #[test]
    fn test_round_trip_in_both_modes() {
        let mut player = blue();
        player.corporation_card = Some(saturn());
        player.cards_in_hand.push(CardName::Fish);
        player.played_cards.push(PlayedCard {
            name: CardName::Fish,
            resource_count: 3,
        });
        player.add_action_this_generation(CardName::Fish);
        let json = serde_json::to_value(player.serialize()).unwrap();

        for mode in [SnapshotMode::Strict, SnapshotMode::Legacy] {
            let loaded = load_player(json.clone(), mode).unwrap();
            assert_eq!(loaded, player);
            assert_eq!(serde_json::to_value(loaded.serialize()).unwrap(), json);
        }
    }
}
