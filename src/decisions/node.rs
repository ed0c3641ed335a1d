//! Pending decision nodes.
//!
//! A node describes one unit of input a participant owes the session, plus the
//! callback that consumes the parsed answer. Nodes are immutable once built;
//! the waiting registry replaces them wholesale on every chaining hop.
//!
//! Callbacks are shared `Fn`s, so a node is cheap to clone and can be put back
//! in its slot if resolving it fails.

use std::fmt;
use std::rc::Rc;

use crate::cards::CardName;
use crate::color::Color;
use crate::error::{GameError, PayloadError};
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::player::Player;

use super::payload::Answer;

/// What a completion callback asks the driver to do next.
#[derive(Debug)]
pub enum Continuation {
    /// The decision is fully applied.
    Done,
    /// The answer spawned another decision for the same participant.
    Next(DecisionNode),
}

impl Continuation {
    pub fn next(node: impl Into<DecisionNode>) -> Self {
        Continuation::Next(node.into())
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Continuation::Done)
    }

    /// The decisions this continuation still owes, in order.
    pub fn into_follow_ups(self) -> Vec<DecisionNode> {
        match self {
            Continuation::Done => Vec::new(),
            Continuation::Next(node) => vec![node],
        }
    }
}

/// Completion callback receiving the parsed answer of type `T`.
pub type Resolver<T> = Rc<dyn Fn(&mut GameState, T) -> Result<Continuation, GameError>>;

fn resolver<T>(
    f: impl Fn(&mut GameState, T) -> Result<Continuation, GameError> + 'static,
) -> Resolver<T> {
    Rc::new(f)
}

// ============================================================================
// Leaf Nodes
// ============================================================================

/// Plain confirmation.
#[derive(Clone)]
pub struct SelectOption {
    pub title: String,
    pub button_label: String,
    on_select: Resolver<()>,
}

impl SelectOption {
    pub fn new(
        title: impl Into<String>,
        button_label: impl Into<String>,
        on_select: impl Fn(&mut GameState) -> Result<Continuation, GameError> + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            button_label: button_label.into(),
            on_select: resolver(move |game, ()| on_select(game)),
        }
    }
}

/// Integer in `[min, max]`.
#[derive(Clone)]
pub struct SelectAmount {
    pub title: String,
    pub button_label: String,
    pub min: i32,
    pub max: i32,
    on_select: Resolver<i32>,
}

impl SelectAmount {
    /// Amount in `[0, max]`.
    pub fn new(
        title: impl Into<String>,
        button_label: impl Into<String>,
        max: i32,
        on_select: impl Fn(&mut GameState, i32) -> Result<Continuation, GameError> + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            button_label: button_label.into(),
            min: 0,
            max,
            on_select: resolver(on_select),
        }
    }

    pub fn with_min(mut self, min: i32) -> Self {
        self.min = min;
        self
    }
}

/// A participant that may be chosen, addressable by id or seat colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectablePlayer {
    pub id: PlayerId,
    pub color: Color,
}

impl SelectablePlayer {
    pub fn new(id: PlayerId, color: Color) -> Self {
        Self { id, color }
    }

    fn matches(&self, token: &str) -> bool {
        self.id.as_str() == token || self.color.as_str() == token
    }
}

impl From<&Player> for SelectablePlayer {
    fn from(player: &Player) -> Self {
        Self::new(player.id.clone(), player.color)
    }
}

/// Exactly one participant out of an allowed set.
#[derive(Clone)]
pub struct SelectPlayer {
    pub title: String,
    pub button_label: String,
    pub players: Vec<SelectablePlayer>,
    /// Caller policy: with a single candidate, answer without prompting.
    pub auto_resolve_single: bool,
    on_select: Resolver<PlayerId>,
}

impl SelectPlayer {
    pub fn new(
        title: impl Into<String>,
        button_label: impl Into<String>,
        players: Vec<SelectablePlayer>,
        on_select: impl Fn(&mut GameState, PlayerId) -> Result<Continuation, GameError>
        + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            button_label: button_label.into(),
            players,
            auto_resolve_single: false,
            on_select: resolver(on_select),
        }
    }

    pub fn auto_resolve_single(mut self) -> Self {
        self.auto_resolve_single = true;
        self
    }

    pub(crate) fn find(&self, token: &str) -> Option<&SelectablePlayer> {
        self.players.iter().find(|p| p.matches(token))
    }
}

/// A bounded subset of offered cards.
#[derive(Clone)]
pub struct SelectCard {
    pub title: String,
    pub button_label: String,
    pub cards: Vec<CardName>,
    pub min_cards_to_select: usize,
    pub max_cards_to_select: usize,
    on_select: Resolver<Vec<CardName>>,
}

impl SelectCard {
    /// Select exactly one card by default.
    pub fn new(
        title: impl Into<String>,
        button_label: impl Into<String>,
        cards: Vec<CardName>,
        on_select: impl Fn(&mut GameState, Vec<CardName>) -> Result<Continuation, GameError>
        + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            button_label: button_label.into(),
            cards,
            min_cards_to_select: 1,
            max_cards_to_select: 1,
            on_select: resolver(on_select),
        }
    }

    pub fn with_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_cards_to_select = min;
        self.max_cards_to_select = max;
        self
    }
}

/// One value out of an explicit list of strings.
#[derive(Clone)]
pub struct SelectValue {
    pub title: String,
    pub button_label: String,
    pub values: Vec<String>,
    on_select: Resolver<String>,
}

impl SelectValue {
    pub fn new<S: Into<String>>(
        title: impl Into<String>,
        button_label: impl Into<String>,
        values: impl IntoIterator<Item = S>,
        on_select: impl Fn(&mut GameState, String) -> Result<Continuation, GameError> + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            button_label: button_label.into(),
            values: values.into_iter().map(Into::into).collect(),
            on_select: resolver(on_select),
        }
    }
}

// ============================================================================
// Containers
// ============================================================================

/// All children must be answered, in order.
#[derive(Clone)]
pub struct AndOptions {
    pub title: String,
    pub options: Vec<DecisionNode>,
    then: Option<Resolver<()>>,
}

impl AndOptions {
    pub fn new(title: impl Into<String>, options: Vec<DecisionNode>) -> Self {
        Self {
            title: title.into(),
            options,
            then: None,
        }
    }

    /// Callback run after every child has resolved.
    pub fn then(
        mut self,
        f: impl Fn(&mut GameState) -> Result<Continuation, GameError> + 'static,
    ) -> Self {
        self.then = Some(resolver(move |game, ()| f(game)));
        self
    }
}

/// Exactly one child is answered; the payload names which.
#[derive(Clone)]
pub struct OrOptions {
    pub title: String,
    pub options: Vec<DecisionNode>,
    then: Option<Resolver<()>>,
}

impl OrOptions {
    pub fn new(title: impl Into<String>, options: Vec<DecisionNode>) -> Self {
        Self {
            title: title.into(),
            options,
            then: None,
        }
    }

    /// Callback run after the chosen child has resolved.
    pub fn then(
        mut self,
        f: impl Fn(&mut GameState) -> Result<Continuation, GameError> + 'static,
    ) -> Self {
        self.then = Some(resolver(move |game, ()| f(game)));
        self
    }
}

// ============================================================================
// Decision Node
// ============================================================================

/// Coarse shape of a node, for logging and client dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Option,
    Amount,
    Player,
    Card,
    Value,
    And,
    Or,
}

/// One pending unit of input.
#[derive(Clone)]
pub enum DecisionNode {
    Option(SelectOption),
    Amount(SelectAmount),
    Player(SelectPlayer),
    Card(SelectCard),
    Value(SelectValue),
    And(AndOptions),
    Or(OrOptions),
}

impl DecisionNode {
    pub fn title(&self) -> &str {
        match self {
            DecisionNode::Option(n) => &n.title,
            DecisionNode::Amount(n) => &n.title,
            DecisionNode::Player(n) => &n.title,
            DecisionNode::Card(n) => &n.title,
            DecisionNode::Value(n) => &n.title,
            DecisionNode::And(n) => &n.title,
            DecisionNode::Or(n) => &n.title,
        }
    }

    pub fn kind(&self) -> DecisionKind {
        match self {
            DecisionNode::Option(_) => DecisionKind::Option,
            DecisionNode::Amount(_) => DecisionKind::Amount,
            DecisionNode::Player(_) => DecisionKind::Player,
            DecisionNode::Card(_) => DecisionKind::Card,
            DecisionNode::Value(_) => DecisionKind::Value,
            DecisionNode::And(_) => DecisionKind::And,
            DecisionNode::Or(_) => DecisionKind::Or,
        }
    }

    /// Answer this node without prompting, when the caller's policy allows it.
    ///
    /// Only a player selection flagged `auto_resolve_single` with exactly one
    /// candidate qualifies.
    pub fn auto_answer(&self) -> Option<Answer> {
        match self {
            DecisionNode::Player(select)
                if select.auto_resolve_single && select.players.len() == 1 =>
            {
                Some(Answer::Player(select.players[0].id.clone()))
            }
            _ => None,
        }
    }

    /// Consume the node, feeding `answer` to its callbacks.
    ///
    /// `answer` must come from parsing a payload against this same node.
    /// Containers run their children first, in order, then their own callback.
    /// Returns every follow-up decision produced along the way, in the order
    /// they must be asked; empty means the node is fully applied.
    pub fn resolve(
        self,
        game: &mut GameState,
        answer: Answer,
    ) -> Result<Vec<DecisionNode>, GameError> {
        let continuation = match (self, answer) {
            (DecisionNode::Option(node), Answer::Option) => (node.on_select)(game, ())?,
            (DecisionNode::Amount(node), Answer::Amount(amount)) => (node.on_select)(game, amount)?,
            (DecisionNode::Player(node), Answer::Player(id)) => (node.on_select)(game, id)?,
            (DecisionNode::Card(node), Answer::Cards(cards)) => (node.on_select)(game, cards)?,
            (DecisionNode::Value(node), Answer::Value(value)) => (node.on_select)(game, value)?,
            (DecisionNode::And(node), Answer::And(answers)) => {
                if answers.len() != node.options.len() {
                    return Err(PayloadError::IncorrectOptions.into());
                }
                let mut follow_ups = Vec::new();
                for (child, answer) in node.options.into_iter().zip(answers) {
                    follow_ups.extend(child.resolve(game, answer)?);
                }
                return finish_container(game, follow_ups, node.then);
            }
            (DecisionNode::Or(node), Answer::Or { index, answer }) => {
                let child = node
                    .options
                    .into_iter()
                    .nth(index)
                    .ok_or(PayloadError::InvalidOptionIndex)?;
                let follow_ups = child.resolve(game, *answer)?;
                return finish_container(game, follow_ups, node.then);
            }
            _ => return Err(PayloadError::IncorrectOptions.into()),
        };
        Ok(continuation.into_follow_ups())
    }
}

fn finish_container(
    game: &mut GameState,
    mut follow_ups: Vec<DecisionNode>,
    then: Option<Resolver<()>>,
) -> Result<Vec<DecisionNode>, GameError> {
    if let Some(then) = then {
        follow_ups.extend(then(game, ())?.into_follow_ups());
    }
    Ok(follow_ups)
}

impl fmt::Debug for DecisionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionNode::Option(n) => f
                .debug_struct("SelectOption")
                .field("title", &n.title)
                .finish_non_exhaustive(),
            DecisionNode::Amount(n) => f
                .debug_struct("SelectAmount")
                .field("title", &n.title)
                .field("min", &n.min)
                .field("max", &n.max)
                .finish_non_exhaustive(),
            DecisionNode::Player(n) => f
                .debug_struct("SelectPlayer")
                .field("title", &n.title)
                .field("players", &n.players)
                .field("auto_resolve_single", &n.auto_resolve_single)
                .finish_non_exhaustive(),
            DecisionNode::Card(n) => f
                .debug_struct("SelectCard")
                .field("title", &n.title)
                .field("cards", &n.cards)
                .field("min_cards_to_select", &n.min_cards_to_select)
                .field("max_cards_to_select", &n.max_cards_to_select)
                .finish_non_exhaustive(),
            DecisionNode::Value(n) => f
                .debug_struct("SelectValue")
                .field("title", &n.title)
                .field("values", &n.values)
                .finish_non_exhaustive(),
            DecisionNode::And(n) => f
                .debug_struct("AndOptions")
                .field("title", &n.title)
                .field("options", &n.options)
                .finish_non_exhaustive(),
            DecisionNode::Or(n) => f
                .debug_struct("OrOptions")
                .field("title", &n.title)
                .field("options", &n.options)
                .finish_non_exhaustive(),
        }
    }
}

macro_rules! impl_into_node {
    ($($ty:ident => $variant:ident),*) => {
        $(impl From<$ty> for DecisionNode {
            fn from(node: $ty) -> Self {
                DecisionNode::$variant(node)
            }
        })*
    };
}

impl_into_node!(
    SelectOption => Option,
    SelectAmount => Amount,
    SelectPlayer => Player,
    SelectCard => Card,
    SelectValue => Value,
    AndOptions => And,
    OrOptions => Or
);
