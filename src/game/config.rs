//! Battle tuning knobs

use crate::core::MIN_DECK_SIZE;
use crate::{BattleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine tuning; every field falls back to its default when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BattleConfig {
    /// Cards drawn at the start of each player turn
    pub hand_size: usize,
    /// Deck floor enforced by out-of-battle removal
    pub min_deck_size: usize,
    /// Critical-hit chance in percent
    pub crit_chance: f64,
    /// Critical-hit chance while over-encumbered
    pub encumbered_crit_chance: f64,
    /// Turn cap for automated battle loops
    pub max_turns: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        BattleConfig {
            hand_size: 5,
            min_deck_size: MIN_DECK_SIZE,
            crit_chance: 15.0,
            encumbered_crit_chance: 5.0,
            max_turns: 100,
        }
    }
}

impl BattleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BattleConfig =
            serde_json::from_str(json).map_err(|e| BattleError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, chance) in [
            ("critChance", self.crit_chance),
            ("encumberedCritChance", self.encumbered_crit_chance),
        ] {
            if !(0.0..=100.0).contains(&chance) {
                return Err(BattleError::ConfigError(format!(
                    "{name} must be between 0 and 100, got {chance}"
                )));
            }
        }
        if self.max_turns == 0 {
            return Err(BattleError::ConfigError("maxTurns must be positive".into()));
        }
        Ok(())
    }

    /// Crit chance for a player with the given encumbrance
    pub fn crit_chance_for(&self, over_encumbered: bool) -> f64 {
        if over_encumbered {
            self.encumbered_crit_chance
        } else {
            self.crit_chance
        }
    }
}
