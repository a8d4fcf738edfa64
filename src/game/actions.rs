//! Battle actions and the events they produce

use crate::core::{CardId, Effect, EffectKind, Intent};
use crate::game::phase::Terminal;
use crate::game::state::{BattleState, Side};
use crate::journal::PileChange;
use serde::{Deserialize, Serialize};

/// Inputs to the turn state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    /// Play a card from hand. `critical` forces or suppresses the crit roll.
    PlayCard {
        card_id: CardId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        critical: Option<bool>,
    },

    /// End the player's turn
    EndTurn,

    /// Let the enemy carry out its telegraphed move
    ResolveEnemyIntent,

    /// Leave the battle
    Flee,
}

impl BattleAction {
    pub fn play(card_id: impl Into<CardId>) -> Self {
        BattleAction::PlayCard {
            card_id: card_id.into(),
            critical: None,
        }
    }

    /// Play with the critical roll pinned
    pub fn play_with_crit(card_id: impl Into<CardId>, critical: bool) -> Self {
        BattleAction::PlayCard {
            card_id: card_id.into(),
            critical: Some(critical),
        }
    }
}

impl std::fmt::Display for BattleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleAction::PlayCard { card_id, .. } => write!(f, "play {card_id}"),
            BattleAction::EndTurn => write!(f, "end turn"),
            BattleAction::ResolveEnemyIntent => write!(f, "resolve enemy intent"),
            BattleAction::Flee => write!(f, "flee"),
        }
    }
}

/// Something observable that happened while an action resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    CardPlayed {
        card_id: CardId,
        energy_spent: u32,
        critical: bool,
    },
    DamageDealt {
        target: Side,
        amount: i32,
        blocked: i32,
    },
    /// Health lost to burn at the end of a turn
    BurnDamage {
        target: Side,
        amount: i32,
    },
    BlockGained {
        target: Side,
        amount: i32,
    },
    Healed {
        target: Side,
        amount: i32,
    },
    EnergyGained {
        amount: u32,
    },
    EffectApplied {
        target: Side,
        effect: Effect,
    },
    EffectExpired {
        target: Side,
        kind: EffectKind,
    },
    CardsDrawn {
        card_ids: Vec<CardId>,
    },
    CardsDiscarded {
        card_ids: Vec<CardId>,
    },
    IntentRevealed {
        move_name: String,
        intent: Intent,
        value: i32,
    },
    EnemyActed {
        move_name: String,
    },
    TurnStarted {
        turn: u32,
    },
    Victory,
    Defeat,
    Fled,
}

/// Everything one step produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Battle state after the step
    pub state: BattleState,
    /// Pile movements in the order they happened
    pub pile_changes: Vec<PileChange>,
    pub events: Vec<BattleEvent>,
    /// Set once the battle has ended
    pub terminal: Option<Terminal>,
}

impl StepOutcome {
    /// Total damage to `target`'s health in this step, burn included
    pub fn damage_to(&self, target: Side) -> i32 {
        self.events
            .iter()
            .map(|e| match e {
                BattleEvent::DamageDealt { target: t, amount, .. }
                | BattleEvent::BurnDamage { target: t, amount } if *t == target => *amount,
                _ => 0,
            })
            .sum()
    }
}
