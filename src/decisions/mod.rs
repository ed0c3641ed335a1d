//! Pending participant decisions.
//!
//! This module provides:
//! - The decision tree and its continuation type (`node` module)
//! - The pure, depth-bounded payload parser (`payload` module)
//! - A serializable description of a pending decision (`view` module)
//!
//! ## Example
//!
//! ```ignore
//! use crate::decisions::{Continuation, SelectAmount};
//!
//! let node = SelectAmount::new("Select amount of heat production to decrease", "Decrease", 2,
//!     move |game, amount| {
//!         let player = game.player_mut(&id)?;
//!         player.add_production(Resource::Heat, -amount);
//!         player.add_production(Resource::MegaCredits, amount);
//!         Ok(Continuation::Done)
//!     });
//! request_decision(game, &id, node.into())?;
//! ```

pub mod node;
pub mod payload;
pub mod view;

pub use node::{
    AndOptions, Continuation, DecisionKind, DecisionNode, OrOptions, Resolver, SelectAmount,
    SelectCard, SelectOption, SelectPlayer, SelectValue, SelectablePlayer,
};
pub use payload::{Answer, DEFAULT_MAX_DECISION_DEPTH, parse};
pub use view::{DecisionView, PlayerChoice};
