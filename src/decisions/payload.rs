//! Answer payload parsing.
//!
//! Clients submit a flat `Vec<Vec<String>>`. Parsing checks it against the
//! shape the pending node demands and produces a structured [`Answer`]
//! without touching any state, so a rejected payload never applies partially.
//!
//! Routing rules for containers:
//! - `And`: row *i* is handed to child *i* as a one-row payload, and the row
//!   count must equal the child count.
//! - `Or`: the first entry of the first row selects the child. Trailing
//!   entries of that row, if any, become the child's first row, followed by
//!   the remaining rows; otherwise the remaining rows are the child's payload.
//!   A bare selector with nothing after it hands the child one empty row.

use std::collections::HashSet;

use tracing::trace;

use crate::cards::CardName;
use crate::error::PayloadError;
use crate::ids::PlayerId;

use super::node::DecisionNode;

/// Default bound on And/Or nesting.
pub const DEFAULT_MAX_DECISION_DEPTH: usize = 16;

/// A parsed answer, mirroring the node variant it was parsed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Option,
    Amount(i32),
    Player(PlayerId),
    Cards(Vec<CardName>),
    Value(String),
    And(Vec<Answer>),
    Or { index: usize, answer: Box<Answer> },
}

/// Parse `payload` against `node`, allowing at most `max_depth` levels of containers.
pub fn parse(
    node: &DecisionNode,
    payload: &[Vec<String>],
    max_depth: usize,
) -> Result<Answer, PayloadError> {
    trace!(kind = ?node.kind(), rows = payload.len(), "parsing payload");
    parse_at(node, payload, 0, max_depth)
}

fn parse_at(
    node: &DecisionNode,
    payload: &[Vec<String>],
    depth: usize,
    max_depth: usize,
) -> Result<Answer, PayloadError> {
    if depth > max_depth {
        return Err(PayloadError::NestedTooDeeply);
    }

    match node {
        DecisionNode::Option(_) => {
            single_row(payload)?;
            Ok(Answer::Option)
        }
        DecisionNode::Amount(select) => {
            let row = single_row(payload)?;
            let [entry] = row else {
                return Err(PayloadError::IncorrectOptions);
            };
            let amount: i32 = entry
                .trim()
                .parse()
                .map_err(|_| PayloadError::NumberNotProvided)?;
            if amount > select.max {
                return Err(PayloadError::AmountTooHigh);
            }
            if amount < select.min {
                return Err(PayloadError::AmountTooLow);
            }
            Ok(Answer::Amount(amount))
        }
        DecisionNode::Player(select) => {
            let row = single_row(payload)?;
            let [token] = row else {
                return Err(PayloadError::InvalidPlayersArray);
            };
            let found = select
                .find(token)
                .ok_or(PayloadError::PlayerNotAvailable)?;
            Ok(Answer::Player(found.id.clone()))
        }
        DecisionNode::Card(select) => {
            let row = single_row(payload)?;
            if row.len() < select.min_cards_to_select {
                return Err(PayloadError::NotEnoughCards);
            }
            if row.len() > select.max_cards_to_select {
                return Err(PayloadError::TooManyCards);
            }
            let mut seen = HashSet::new();
            let mut cards = Vec::with_capacity(row.len());
            for token in row {
                let card = CardName::from_id(token)
                    .filter(|card| select.cards.contains(card))
                    .ok_or_else(|| PayloadError::CardNotAvailable(token.clone()))?;
                if !seen.insert(card) {
                    return Err(PayloadError::DuplicateCard(token.clone()));
                }
                cards.push(card);
            }
            Ok(Answer::Cards(cards))
        }
        DecisionNode::Value(select) => {
            let row = single_row(payload)?;
            let [value] = row else {
                return Err(PayloadError::InvalidValue);
            };
            if !select.values.iter().any(|v| v == value) {
                return Err(PayloadError::ValueNotAvailable);
            }
            Ok(Answer::Value(value.clone()))
        }
        DecisionNode::And(and) => {
            if payload.len() != and.options.len() {
                return Err(PayloadError::IncorrectOptions);
            }
            and.options
                .iter()
                .zip(payload.chunks(1))
                .map(|(child, rows)| parse_at(child, rows, depth + 1, max_depth))
                .collect::<Result<Vec<_>, _>>()
                .map(Answer::And)
        }
        DecisionNode::Or(or) => {
            let (selector, rest) = payload
                .split_first()
                .ok_or(PayloadError::IncorrectOptions)?;
            let (index, trailing) = selector
                .split_first()
                .ok_or(PayloadError::InvalidOptionIndex)?;
            let index: usize = index
                .trim()
                .parse()
                .map_err(|_| PayloadError::InvalidOptionIndex)?;
            let child = or
                .options
                .get(index)
                .ok_or(PayloadError::InvalidOptionIndex)?;

            let child_payload: Vec<Vec<String>> = if !trailing.is_empty() {
                std::iter::once(trailing.to_vec())
                    .chain(rest.iter().cloned())
                    .collect()
            } else if !rest.is_empty() {
                rest.to_vec()
            } else {
                vec![Vec::new()]
            };

            let answer = parse_at(child, &child_payload, depth + 1, max_depth)?;
            Ok(Answer::Or {
                index,
                answer: Box::new(answer),
            })
        }
    }
}

fn single_row(payload: &[Vec<String>]) -> Result<&[String], PayloadError> {
    match payload {
        [row] => Ok(row.as_slice()),
        _ => Err(PayloadError::IncorrectOptions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::decisions::node::{
        AndOptions, Continuation, OrOptions, SelectAmount, SelectCard, SelectOption,
        SelectPlayer, SelectValue, SelectablePlayer,
    };

    fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn amount(min: i32, max: i32) -> DecisionNode {
        SelectAmount::new("amount", "Save", max, |_, _| Ok(Continuation::Done))
            .with_min(min)
            .into()
    }

    fn option() -> DecisionNode {
        SelectOption::new("option", "Save", |_| Ok(Continuation::Done)).into()
    }

    fn players() -> DecisionNode {
        SelectPlayer::new(
            "player",
            "Save",
            vec![
                SelectablePlayer::new(PlayerId::new("p2"), Color::Red),
                SelectablePlayer::new(PlayerId::new("p3"), Color::Yellow),
            ],
            |_, _| Ok(Continuation::Done),
        )
        .into()
    }

    fn cards(min: usize, max: usize) -> DecisionNode {
        SelectCard::new(
            "cards",
            "Save",
            vec![CardName::Fish, CardName::DustSeals, CardName::Insulation],
            |_, _| Ok(Continuation::Done),
        )
        .with_bounds(min, max)
        .into()
    }

    fn parse_default(node: &DecisionNode, payload: &[&[&str]]) -> Result<Answer, PayloadError> {
        parse(node, &rows(payload), DEFAULT_MAX_DECISION_DEPTH)
    }

    #[test]
    fn test_option_requires_one_row() {
        assert_eq!(parse_default(&option(), &[&["1"]]), Ok(Answer::Option));
        assert_eq!(parse_default(&option(), &[&[]]), Ok(Answer::Option));
        assert_eq!(
            parse_default(&option(), &[]),
            Err(PayloadError::IncorrectOptions)
        );
        assert_eq!(
            parse_default(&option(), &[&["1"], &["1"]]),
            Err(PayloadError::IncorrectOptions)
        );
    }

    #[test]
    fn test_amount_validation() {
        let node = amount(0, 2);
        assert_eq!(
            parse_default(&node, &[&[]]),
            Err(PayloadError::IncorrectOptions)
        );
        assert_eq!(parse_default(&node, &[]), Err(PayloadError::IncorrectOptions));
        assert_eq!(
            parse_default(&node, &[&["foobar"]]),
            Err(PayloadError::NumberNotProvided)
        );
        assert_eq!(
            parse_default(&node, &[&["3"]]),
            Err(PayloadError::AmountTooHigh)
        );
        assert_eq!(
            parse_default(&node, &[&["-1"]]),
            Err(PayloadError::AmountTooLow)
        );
        assert_eq!(parse_default(&node, &[&["2"]]), Ok(Answer::Amount(2)));
    }

    #[test]
    fn test_amount_respects_custom_min() {
        let node = amount(2, 5);
        assert_eq!(
            parse_default(&node, &[&["1"]]),
            Err(PayloadError::AmountTooLow)
        );
        assert_eq!(parse_default(&node, &[&["2"]]), Ok(Answer::Amount(2)));
    }

    #[test]
    fn test_player_validation() {
        let node = players();
        assert_eq!(
            parse_default(&node, &[&[]]),
            Err(PayloadError::InvalidPlayersArray)
        );
        assert_eq!(
            parse_default(&node, &[&["p2", "p3"]]),
            Err(PayloadError::InvalidPlayersArray)
        );
        assert_eq!(parse_default(&node, &[]), Err(PayloadError::IncorrectOptions));
        assert_eq!(
            parse_default(&node, &[&["nonexistent"]]),
            Err(PayloadError::PlayerNotAvailable)
        );
        assert_eq!(
            parse_default(&node, &[&["p2"]]),
            Ok(Answer::Player(PlayerId::new("p2")))
        );
    }

    #[test]
    fn test_player_can_be_named_by_color() {
        assert_eq!(
            parse_default(&players(), &[&["yellow"]]),
            Ok(Answer::Player(PlayerId::new("p3")))
        );
    }

    #[test]
    fn test_card_validation() {
        let node = cards(1, 2);
        assert_eq!(
            parse_default(&node, &[&[]]),
            Err(PayloadError::NotEnoughCards)
        );
        assert_eq!(
            parse_default(&node, &[&["fish", "dust-seals", "insulation"]]),
            Err(PayloadError::TooManyCards)
        );
        assert_eq!(
            parse_default(&node, &[&["lunar-beam"]]),
            Err(PayloadError::CardNotAvailable("lunar-beam".into()))
        );
        assert_eq!(
            parse_default(&node, &[&["not-a-card"]]),
            Err(PayloadError::CardNotAvailable("not-a-card".into()))
        );
        assert_eq!(
            parse_default(&node, &[&["fish", "fish"]]),
            Err(PayloadError::DuplicateCard("fish".into()))
        );
        assert_eq!(
            parse_default(&node, &[&["fish", "insulation"]]),
            Ok(Answer::Cards(vec![CardName::Fish, CardName::Insulation]))
        );
    }

    #[test]
    fn test_card_selection_may_be_empty_when_min_is_zero() {
        assert_eq!(
            parse_default(&cards(0, 1), &[&[]]),
            Ok(Answer::Cards(Vec::new()))
        );
    }

    #[test]
    fn test_value_validation() {
        let node: DecisionNode = SelectValue::new(
            "value",
            "Save",
            ["steel", "titanium"],
            |_, _| Ok(Continuation::Done),
        )
        .into();
        assert_eq!(parse_default(&node, &[&[]]), Err(PayloadError::InvalidValue));
        assert_eq!(
            parse_default(&node, &[&["plants"]]),
            Err(PayloadError::ValueNotAvailable)
        );
        assert_eq!(
            parse_default(&node, &[&["titanium"]]),
            Ok(Answer::Value("titanium".into()))
        );
    }

    #[test]
    fn test_and_routes_rows_positionally() {
        let node: DecisionNode = AndOptions::new("both", vec![amount(0, 5), players()]).into();
        assert_eq!(
            parse_default(&node, &[&["3"]]),
            Err(PayloadError::IncorrectOptions)
        );
        assert_eq!(
            parse_default(&node, &[&["3"], &["p3"]]),
            Ok(Answer::And(vec![
                Answer::Amount(3),
                Answer::Player(PlayerId::new("p3"))
            ]))
        );
        assert_eq!(
            parse_default(&node, &[&["3"], &["bar"]]),
            Err(PayloadError::PlayerNotAvailable)
        );
    }

    #[test]
    fn test_or_selector_routing() {
        let node: DecisionNode = OrOptions::new("either", vec![option(), amount(0, 4)]).into();

        assert_eq!(
            parse_default(&node, &[&["0"]]),
            Ok(Answer::Or {
                index: 0,
                answer: Box::new(Answer::Option)
            })
        );
        let expected = Ok(Answer::Or {
            index: 1,
            answer: Box::new(Answer::Amount(4)),
        });
        assert_eq!(parse_default(&node, &[&["1", "4"]]), expected);
        assert_eq!(parse_default(&node, &[&["1"], &["4"]]), expected);
    }

    #[test]
    fn test_or_rejects_bad_selector() {
        let node: DecisionNode = OrOptions::new("either", vec![option(), amount(0, 4)]).into();
        assert_eq!(parse_default(&node, &[]), Err(PayloadError::IncorrectOptions));
        assert_eq!(
            parse_default(&node, &[&[]]),
            Err(PayloadError::InvalidOptionIndex)
        );
        assert_eq!(
            parse_default(&node, &[&["two"]]),
            Err(PayloadError::InvalidOptionIndex)
        );
        assert_eq!(
            parse_default(&node, &[&["2"]]),
            Err(PayloadError::InvalidOptionIndex)
        );
        assert_eq!(
            parse_default(&node, &[&["1", "9"]]),
            Err(PayloadError::AmountTooHigh)
        );
    }

    #[test]
    fn test_or_nested_inside_and() {
        let inner: DecisionNode = OrOptions::new("either", vec![option(), amount(0, 4)]).into();
        let node: DecisionNode = AndOptions::new("both", vec![inner, players()]).into();
        assert_eq!(
            parse_default(&node, &[&["1", "2"], &["p2"]]),
            Ok(Answer::And(vec![
                Answer::Or {
                    index: 1,
                    answer: Box::new(Answer::Amount(2))
                },
                Answer::Player(PlayerId::new("p2")),
            ]))
        );
    }

    #[test]
    fn test_depth_bound() {
        let mut node = option();
        for _ in 0..3 {
            node = OrOptions::new("nested", vec![node]).into();
        }
        let payload = rows(&[&["0", "0", "0"]]);
        assert_eq!(
            parse(&node, &payload, 3),
            Ok(Answer::Or {
                index: 0,
                answer: Box::new(Answer::Or {
                    index: 0,
                    answer: Box::new(Answer::Or {
                        index: 0,
                        answer: Box::new(Answer::Option)
                    })
                })
            })
        );
        assert_eq!(
            parse(&node, &payload, 2),
            Err(PayloadError::NestedTooDeeply)
        );
    }
}
