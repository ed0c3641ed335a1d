//! Deferred action queue.
//!
//! Effects push already-decided work here instead of running it inline. The
//! resolution driver drains the queue once nobody is blocked on input.
//!
//! Ordering is FIFO, except that a [`Placement::Front`] push splices the action
//! right after the one currently running. Several front pushes made by the same
//! action keep their relative order. With no action running, front means head.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::decisions::{Continuation, DecisionNode};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::resolution;
use crate::waiting::CompletionHook;

/// Work run by a deferred action. Returning `Next(node)` blocks its owner on `node`.
pub type DeferredWork = Rc<dyn Fn(&mut GameState) -> Result<Continuation, GameError>>;

/// Where a newly pushed action lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Back,
    Front,
}

/// A queued unit of work, owned by the participant it acts for.
#[derive(Clone)]
pub struct DeferredAction {
    pub player: PlayerId,
    pub label: String,
    work: DeferredWork,
    /// Run once the decision chain this action starts bottoms out.
    on_complete: Option<CompletionHook>,
}

impl DeferredAction {
    pub fn new(
        player: PlayerId,
        label: impl Into<String>,
        work: impl Fn(&mut GameState) -> Result<Continuation, GameError> + 'static,
    ) -> Self {
        Self {
            player,
            label: label.into(),
            work: Rc::new(work),
            on_complete: None,
        }
    }

    /// An action whose only job is to ask `player` for `node`.
    pub fn ask(player: PlayerId, node: DecisionNode) -> Self {
        let label = format!("ask: {}", node.title());
        Self::new(player, label, move |_| Ok(Continuation::Next(node.clone())))
    }

    /// Attach a hook that runs once everything this action leads to is resolved.
    pub(crate) fn with_completion(mut self, on_complete: Option<CompletionHook>) -> Self {
        self.on_complete = on_complete;
        self
    }

    pub fn run(&self, game: &mut GameState) -> Result<Continuation, GameError> {
        (self.work)(game)
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("player", &self.player)
            .field("label", &self.label)
            .field("on_complete", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}

/// Outcome of running one queued action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The action finished without leaving anyone blocked.
    Completed,
    /// The action left this participant waiting for input.
    Waiting(PlayerId),
}

#[derive(Debug, Clone, Default)]
pub struct DeferredActionQueue {
    actions: VecDeque<DeferredAction>,
    /// Insertion index for front pushes; reset whenever an action is popped.
    front_cursor: usize,
}

impl DeferredActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: DeferredAction, placement: Placement) {
        debug!(
            player = %action.player,
            label = action.label.as_str(),
            ?placement,
            "deferring action"
        );
        match placement {
            Placement::Back => self.actions.push_back(action),
            Placement::Front => {
                let at = self.front_cursor.min(self.actions.len());
                self.actions.insert(at, action);
                self.front_cursor = at + 1;
            }
        }
    }

    /// Remove the head action, making it the one currently running.
    pub fn pop_next(&mut self) -> Option<DeferredAction> {
        self.front_cursor = 0;
        self.actions.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn peek_label(&self) -> Option<&str> {
        self.actions.front().map(|action| action.label.as_str())
    }

    /// Labels in execution order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|action| action.label.as_str())
    }
}

/// Pop and run the head action, installing any decision it produces.
///
/// Returns `Ok(None)` when the queue is empty. A failing action is consumed and
/// its error propagates unchanged.
pub fn run_next(game: &mut GameState) -> Result<Option<RunOutcome>, GameError> {
    let Some(action) = game.deferred_actions.pop_next() else {
        return Ok(None);
    };
    let owner = action.player.clone();
    debug!(player = %owner, label = action.label.as_str(), "running deferred action");

    let continuation = action.run(game)?;
    resolution::settle(game, &owner, continuation.into_follow_ups(), action.on_complete)?;

    Ok(Some(match resolution::blocked_player(game, &owner) {
        Some(player) => RunOutcome::Waiting(player),
        None => RunOutcome::Completed,
    }))
}
