//! Battle phases

use serde::{Deserialize, Serialize};

/// Whose turn it is, or how the battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    PlayerTurn,
    EnemyTurn,
    BattleWon,
    BattleLost,
    Fled,
}

/// How a finished battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Won,
    Lost,
    Fled,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        self.terminal().is_some()
    }

    pub fn terminal(&self) -> Option<Terminal> {
        match self {
            BattlePhase::BattleWon => Some(Terminal::Won),
            BattlePhase::BattleLost => Some(Terminal::Lost),
            BattlePhase::Fled => Some(Terminal::Fled),
            BattlePhase::PlayerTurn | BattlePhase::EnemyTurn => None,
        }
    }
}

impl std::fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BattlePhase::PlayerTurn => "player turn",
            BattlePhase::EnemyTurn => "enemy turn",
            BattlePhase::BattleWon => "battle won",
            BattlePhase::BattleLost => "battle lost",
            BattlePhase::Fled => "fled",
        };
        write!(f, "{s}")
    }
}
