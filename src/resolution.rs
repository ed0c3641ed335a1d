//! Resolution driver.
//!
//! [`process`] is the single entry point for answering a pending decision:
//! parse the payload against the participant's node, run the callbacks, then
//! either install the follow-up node (chaining) or clear the slot and drain the
//! deferred queue.
//!
//! Answering is all-or-nothing. If any callback fails, the session is put back
//! exactly as it was before the answer, pending decision included.

use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::decisions::{Answer, DecisionNode, parse};
use crate::deferred::{self, DeferredAction, Placement, RunOutcome};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::waiting::{CompletionHook, PendingDecision};

/// Where the session stands once a call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// This participant must answer before anything else happens.
    Waiting(PlayerId),
    /// Nothing is pending and the deferred queue is empty.
    Idle,
}

impl Progress {
    pub fn is_idle(&self) -> bool {
        matches!(self, Progress::Idle)
    }
}

/// Answer `player`'s pending decision with `payload`.
///
/// A payload that fails validation leaves the slot untouched. A callback error
/// rolls the session back to its state before the call, so the same decision
/// stays pending with its completion hook. Errors raised while draining the
/// deferred queue afterwards are not rolled back; the answer already stands.
pub fn process(
    game: &mut GameState,
    player: &PlayerId,
    payload: &[Vec<String>],
) -> Result<Progress, GameError> {
    let node = game
        .waiting
        .waiting_for(player)
        .ok_or(GameError::NoPendingDecision)?;
    let answer = parse(node, payload, game.options.max_decision_depth)?;

    let checkpoint = game.clone();
    if let Err(err) = answer_pending(game, player, answer) {
        warn!(player = %player, "answer rejected by callback, restoring decision: {err}");
        *game = checkpoint;
        return Err(err);
    }

    if let Some(blocked) = blocked_player(game, player) {
        return Ok(Progress::Waiting(blocked));
    }
    drain(game)
}

fn answer_pending(
    game: &mut GameState,
    player: &PlayerId,
    answer: Answer,
) -> Result<(), GameError> {
    let PendingDecision { node, on_complete } = game
        .waiting
        .take(player)
        .ok_or(GameError::NoPendingDecision)?;
    debug!(player = %player, title = node.title(), "resolving decision");

    let now = game.clock.now();
    game.player_mut(player)?.timer.stop_at(now);

    let follow_ups = node.resolve(game, answer)?;
    settle(game, player, follow_ups, on_complete)
}

/// Ask `player` for `node`. Effect collaborators call this instead of writing
/// to the registry directly, so the auto-resolve policy is applied.
pub fn request_decision(
    game: &mut GameState,
    player: &PlayerId,
    node: DecisionNode,
) -> Result<(), GameError> {
    settle(game, player, vec![node], None)
}

/// Like [`request_decision`], running `on_complete` once the whole chain resolves.
pub fn request_decision_then(
    game: &mut GameState,
    player: &PlayerId,
    node: DecisionNode,
    on_complete: impl Fn(&mut GameState) -> Result<(), GameError> + 'static,
) -> Result<(), GameError> {
    settle(game, player, vec![node], Some(Rc::new(on_complete)))
}

/// Run deferred actions until the queue is empty or someone is blocked.
pub fn drain(game: &mut GameState) -> Result<Progress, GameError> {
    if let Some(blocked) = game.waiting.waiting_players().next() {
        return Ok(Progress::Waiting(blocked.clone()));
    }
    while let Some(outcome) = deferred::run_next(game)? {
        if let RunOutcome::Waiting(player) = outcome {
            return Ok(Progress::Waiting(player));
        }
    }
    Ok(Progress::Idle)
}

/// Ask `player` for `follow_ups`, in order.
///
/// Nodes pass through the auto-resolve policy first. The first one left
/// unanswered is installed; the rest are queued at the front as ask actions.
/// `on_complete` travels with whichever of them is asked last, and runs right
/// away when there is nothing left to ask.
pub(crate) fn settle(
    game: &mut GameState,
    player: &PlayerId,
    follow_ups: Vec<DecisionNode>,
    on_complete: Option<CompletionHook>,
) -> Result<(), GameError> {
    let mut pending = VecDeque::from(follow_ups);
    while let Some(node) = pending.pop_front() {
        if let Some(answer) = node.auto_answer() {
            debug!(player = %player, title = node.title(), "auto-resolving single candidate");
            let produced = node.resolve(game, answer)?;
            for next in produced.into_iter().rev() {
                pending.push_front(next);
            }
            continue;
        }

        let mut hook = on_complete;
        let later = pending.len();
        for (index, next) in pending.into_iter().enumerate() {
            let mut ask = DeferredAction::ask(player.clone(), next);
            if index + 1 == later {
                ask = ask.with_completion(hook.take());
            }
            game.deferred_actions.push(ask, Placement::Front);
        }

        let now = game.clock.now();
        let timer = &mut game.player_mut(player)?.timer;
        if !timer.running {
            timer.start_at(now);
        }
        game.waiting.set_waiting_for(
            player.clone(),
            PendingDecision {
                node,
                on_complete: hook,
            },
        );
        return Ok(());
    }

    if let Some(hook) = on_complete {
        hook(game)?;
    }
    Ok(())
}

/// The participant currently blocked, preferring `preferred`.
pub(crate) fn blocked_player(game: &GameState, preferred: &PlayerId) -> Option<PlayerId> {
    if game.waiting.is_waiting(preferred) {
        return Some(preferred.clone());
    }
    game.waiting.waiting_players().next().cloned()
}
