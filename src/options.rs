use serde::{Deserialize, Serialize};

use crate::decisions::DEFAULT_MAX_DECISION_DEPTH;

/// Session-level knobs.
///
/// Missing keys fall back to [`GameOptions::default`], so a partial JSON file
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptions {
    /// Seed for the project deck shuffle. `None` draws from the thread RNG.
    pub seed: Option<u64>,
    /// Upper bound on And/Or nesting accepted by the payload parser.
    pub max_decision_depth: usize,
    /// Megacredits each participant starts with before a corporation is chosen.
    pub starting_megacredits: i32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_decision_depth: DEFAULT_MAX_DECISION_DEPTH,
            starting_megacredits: 0,
        }
    }
}

impl GameOptions {
    /// Options with a fixed shuffle seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_use_defaults() {
        let options: GameOptions = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.max_decision_depth, DEFAULT_MAX_DECISION_DEPTH);
        assert_eq!(options.starting_megacredits, 0);
    }

    #[test]
    fn test_empty_object_is_default() {
        let options: GameOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, GameOptions::default());
    }
}
