//! Per-participant waiting slots.
//!
//! A participant is blocked on input exactly when their slot holds a
//! [`PendingDecision`]. Installing a decision overwrites the slot; the
//! previous completion hook, if any, is dropped without being run.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::decisions::DecisionNode;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;

/// Terminal consumer, run once the root chain of a pending decision bottoms out.
pub type CompletionHook = Rc<dyn Fn(&mut GameState) -> Result<(), GameError>>;

/// The decision a participant currently owes, with its terminal hook.
#[derive(Clone)]
pub struct PendingDecision {
    pub node: DecisionNode,
    pub on_complete: Option<CompletionHook>,
}

impl PendingDecision {
    pub fn new(node: DecisionNode) -> Self {
        Self {
            node,
            on_complete: None,
        }
    }

    pub fn with_completion(
        node: DecisionNode,
        on_complete: impl Fn(&mut GameState) -> Result<(), GameError> + 'static,
    ) -> Self {
        Self {
            node,
            on_complete: Some(Rc::new(on_complete)),
        }
    }
}

impl fmt::Debug for PendingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDecision")
            .field("node", &self.node)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Single-slot holder of the pending decision, per participant.
#[derive(Debug, Clone, Default)]
pub struct WaitingRegistry {
    slots: BTreeMap<PlayerId, PendingDecision>,
}

impl WaitingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `pending` for `player`, replacing whatever was there.
    pub fn set_waiting_for(&mut self, player: PlayerId, pending: PendingDecision) {
        debug!(
            player = %player,
            kind = ?pending.node.kind(),
            title = pending.node.title(),
            "waiting for input"
        );
        if let Some(previous) = self.slots.insert(player, pending) {
            debug!(title = previous.node.title(), "replaced pending decision");
        }
    }

    /// The node `player` is blocked on, if any.
    pub fn waiting_for(&self, player: &PlayerId) -> Option<&DecisionNode> {
        self.slots.get(player).map(|pending| &pending.node)
    }

    pub fn is_waiting(&self, player: &PlayerId) -> bool {
        self.slots.contains_key(player)
    }

    /// Participants currently blocked, in id order.
    pub fn waiting_players(&self) -> impl Iterator<Item = &PlayerId> {
        self.slots.keys()
    }

    /// Remove and return the slot's contents.
    pub fn take(&mut self, player: &PlayerId) -> Option<PendingDecision> {
        self.slots.remove(player)
    }

    /// Empty the slot without running its hook.
    pub fn clear(&mut self, player: &PlayerId) {
        self.slots.remove(player);
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
