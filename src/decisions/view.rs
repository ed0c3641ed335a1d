//! Serializable description of a pending decision, for the API layer.

use serde::Serialize;

use crate::cards::CardName;
use crate::color::Color;
use crate::ids::PlayerId;

use super::node::DecisionNode;

/// A candidate participant as shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerChoice {
    pub id: PlayerId,
    pub color: Color,
}

/// What the client must answer. Mirrors [`DecisionNode`] without callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DecisionView {
    Option {
        title: String,
        button_label: String,
    },
    Amount {
        title: String,
        button_label: String,
        min: i32,
        max: i32,
    },
    Player {
        title: String,
        button_label: String,
        players: Vec<PlayerChoice>,
    },
    Card {
        title: String,
        button_label: String,
        cards: Vec<CardName>,
        min: usize,
        max: usize,
    },
    Value {
        title: String,
        button_label: String,
        values: Vec<String>,
    },
    And {
        title: String,
        options: Vec<DecisionView>,
    },
    Or {
        title: String,
        options: Vec<DecisionView>,
    },
}

impl DecisionNode {
    pub fn view(&self) -> DecisionView {
        match self {
            DecisionNode::Option(n) => DecisionView::Option {
                title: n.title.clone(),
                button_label: n.button_label.clone(),
            },
            DecisionNode::Amount(n) => DecisionView::Amount {
                title: n.title.clone(),
                button_label: n.button_label.clone(),
                min: n.min,
                max: n.max,
            },
            DecisionNode::Player(n) => DecisionView::Player {
                title: n.title.clone(),
                button_label: n.button_label.clone(),
                players: n
                    .players
                    .iter()
                    .map(|p| PlayerChoice {
                        id: p.id.clone(),
                        color: p.color,
                    })
                    .collect(),
            },
            DecisionNode::Card(n) => DecisionView::Card {
                title: n.title.clone(),
                button_label: n.button_label.clone(),
                cards: n.cards.clone(),
                min: n.min_cards_to_select,
                max: n.max_cards_to_select,
            },
            DecisionNode::Value(n) => DecisionView::Value {
                title: n.title.clone(),
                button_label: n.button_label.clone(),
                values: n.values.clone(),
            },
            DecisionNode::And(n) => DecisionView::And {
                title: n.title.clone(),
                options: n.options.iter().map(DecisionNode::view).collect(),
            },
            DecisionNode::Or(n) => DecisionView::Or {
                title: n.title.clone(),
                options: n.options.iter().map(DecisionNode::view).collect(),
            },
        }
    }
}
