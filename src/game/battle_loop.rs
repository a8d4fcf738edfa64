//! Battle loop
//!
//! Drives a battle to completion: asks the controller for player actions,
//! resolves enemy turns, and reports the outcome to an injected handler.

/// Conditional logging that compiles away when the verbose-logging feature
/// is disabled
macro_rules! log_if_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.event(LogCategory::Outcome, format_args!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

use crate::core::EnemyId;
use crate::game::actions::{BattleAction, BattleEvent};
use crate::game::battle::Battle;
use crate::game::controller::{BattleController, BattleView};
use crate::game::logger::{LogCategory, VerbosityLevel};
use crate::game::phase::{BattlePhase, Terminal};
use crate::game::rng::RandomSource;
use crate::game::state::Side;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Player actions allowed in one turn before the loop ends it
const MAX_ACTIONS_PER_TURN: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleEndReason {
    Victory,
    Defeat,
    Fled,
    /// Stopped by the loop's turn cap
    TurnLimit,
}

impl From<Terminal> for BattleEndReason {
    fn from(terminal: Terminal) -> Self {
        match terminal {
            Terminal::Won => BattleEndReason::Victory,
            Terminal::Lost => BattleEndReason::Defeat,
            Terminal::Fled => BattleEndReason::Fled,
        }
    }
}

/// Summary handed to the outcome handler when a battle ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub enemy_id: EnemyId,
    pub end_reason: BattleEndReason,
    pub turns_played: u32,
    pub cards_played: u32,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub player_health: i32,
    pub enemy_health: i32,
}

impl BattleReport {
    pub fn won(&self) -> bool {
        self.end_reason == BattleEndReason::Victory
    }
}

/// Receives battle outcomes (rewards, persistence, statistics)
pub trait BattleOutcomeHandler {
    fn on_battle_end(&mut self, report: &BattleReport);
}

/// Handler that ignores outcomes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOutcomeHandler;

impl BattleOutcomeHandler for NoopOutcomeHandler {
    fn on_battle_end(&mut self, _report: &BattleReport) {}
}

/// Keeps every report, for tests and batch runs
#[derive(Debug, Default, Clone)]
pub struct CollectingHandler {
    pub reports: Vec<BattleReport>,
}

impl BattleOutcomeHandler for CollectingHandler {
    fn on_battle_end(&mut self, report: &BattleReport) {
        self.reports.push(report.clone());
    }
}

pub struct BattleLoop<'a, R: RandomSource + Clone> {
    pub battle: &'a mut Battle<R>,
    max_turns: u32,
    cards_played: u32,
    damage_dealt: i32,
    damage_taken: i32,
}

impl<'a, R: RandomSource + Clone> BattleLoop<'a, R> {
    pub fn new(battle: &'a mut Battle<R>) -> Self {
        let max_turns = battle.config.max_turns;
        BattleLoop {
            battle,
            max_turns,
            cards_played: 0,
            damage_dealt: 0,
            damage_taken: 0,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Sets the verbosity on the battle's logger
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.battle.logger_mut().set_verbosity(verbosity);
        self
    }

    /// Run until the battle ends or the turn cap is hit
    pub fn run(
        &mut self,
        controller: &mut dyn BattleController,
        handler: &mut dyn BattleOutcomeHandler,
    ) -> Result<BattleReport> {
        let mut actions_this_turn = 0;
        let end_reason = loop {
            if let Some(terminal) = self.battle.phase.terminal() {
                break BattleEndReason::from(terminal);
            }
            if self.battle.turn_number > self.max_turns {
                log_if_verbose!(
                    self.battle.logger(),
                    "Turn limit of {} reached",
                    self.max_turns
                );
                break BattleEndReason::TurnLimit;
            }

            let action = match self.battle.phase {
                BattlePhase::EnemyTurn => {
                    actions_this_turn = 0;
                    BattleAction::ResolveEnemyIntent
                }
                _ if actions_this_turn >= MAX_ACTIONS_PER_TURN => BattleAction::EndTurn,
                _ => {
                    actions_this_turn += 1;
                    self.choose(controller)
                }
            };
            self.step(action)?;
        };

        let report = BattleReport {
            enemy_id: self.battle.enemy.id.clone(),
            end_reason,
            turns_played: self.battle.turn_number.min(self.max_turns),
            cards_played: self.cards_played,
            damage_dealt: self.damage_dealt,
            damage_taken: self.damage_taken,
            player_health: self.battle.state.player_health,
            enemy_health: self.battle.state.enemy_health,
        };

        let view = BattleView::new(&*self.battle);
        controller.on_battle_end(&view, report.won());
        handler.on_battle_end(&report);
        Ok(report)
    }

    fn choose(&self, controller: &mut dyn BattleController) -> BattleAction {
        let available = self.battle.legal_actions();
        let view = BattleView::new(&*self.battle);
        let action = controller
            .choose_action(&view, &available)
            .unwrap_or(BattleAction::EndTurn);

        self.battle.logger().event(
            LogCategory::Choice,
            format_args!("{} chose {action}", controller.name()),
        );
        action
    }

    fn step(&mut self, action: BattleAction) -> Result<()> {
        let outcome = self.battle.apply(action)?;
        self.cards_played += outcome
            .events
            .iter()
            .filter(|e| matches!(e, BattleEvent::CardPlayed { .. }))
            .count() as u32;
        self.damage_dealt += outcome.damage_to(Side::Enemy);
        self.damage_taken += outcome.damage_to(Side::Player);
        Ok(())
    }
}
