//! Batch simulation: run many independent battles in parallel and collect
//! statistics
//!
//! Every battle owns its own `Battle`, RNG, and controller, so battles are
//! spread across the rayon pool without shared state. Battle `i` is seeded
//! from the batch seed and `i`, which makes a batch reproducible regardless
//! of scheduling.

use crate::core::{Character, Enemy};
use crate::game::{
    Battle, BattleConfig, BattleController, BattleEndReason, BattleLoop, BattleReport,
    GreedyController, NoopOutcomeHandler, RandomController, SeededRandom, VerbosityLevel,
};
use crate::Result;
use rayon::prelude::*;
use std::fmt;
use std::time::{Duration, Instant};

/// Controller driving the player side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ControllerType {
    /// Plays the best-scoring card, lethal first
    #[default]
    Greedy,
    /// Picks uniformly among legal actions
    Random,
}

impl ControllerType {
    pub fn build(self, seed: u64) -> Box<dyn BattleController> {
        match self {
            ControllerType::Greedy => Box::new(GreedyController::new()),
            ControllerType::Random => Box::new(RandomController::with_seed(seed)),
        }
    }
}

/// Everything a battle starts from; cloned for every battle in a batch
#[derive(Debug, Clone)]
pub struct SimulationSetup {
    pub character: Character,
    pub enemy: Enemy,
    pub config: BattleConfig,
}

/// Seed of battle `index` within a batch
pub fn battle_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Run one silent battle to completion
pub fn run_battle(
    setup: &SimulationSetup,
    controller_type: ControllerType,
    seed: u64,
) -> Result<BattleReport> {
    let mut battle = Battle::start(
        setup.character.clone(),
        setup.enemy.clone(),
        setup.config.clone(),
        SeededRandom::new(seed),
    );
    let mut controller = controller_type.build(seed.wrapping_add(0x1234_5678_9ABC_DEF0));
    BattleLoop::new(&mut battle)
        .with_verbosity(VerbosityLevel::Silent)
        .run(&mut *controller, &mut NoopOutcomeHandler)
}

/// Run `battles` battles in parallel and aggregate their reports
pub fn simulate(
    setup: &SimulationSetup,
    battles: usize,
    controller_type: ControllerType,
    seed: u64,
) -> Result<SimulationSummary> {
    let start = Instant::now();
    let reports = (0..battles)
        .into_par_iter()
        .map(|i| run_battle(setup, controller_type, battle_seed(seed, i)))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = SimulationSummary::default();
    for report in &reports {
        summary.record(report);
    }
    summary.elapsed = start.elapsed();
    Ok(summary)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationSummary {
    pub battles: usize,
    pub victories: usize,
    pub defeats: usize,
    pub fled: usize,
    pub turn_limit: usize,
    pub total_turns: u64,
    pub total_damage_dealt: i64,
    pub total_damage_taken: i64,
    pub elapsed: Duration,
}

impl SimulationSummary {
    pub fn record(&mut self, report: &BattleReport) {
        self.battles += 1;
        match report.end_reason {
            BattleEndReason::Victory => self.victories += 1,
            BattleEndReason::Defeat => self.defeats += 1,
            BattleEndReason::Fled => self.fled += 1,
            BattleEndReason::TurnLimit => self.turn_limit += 1,
        }
        self.total_turns += u64::from(report.turns_played);
        self.total_damage_dealt += i64::from(report.damage_dealt);
        self.total_damage_taken += i64::from(report.damage_taken);
    }

    fn average(&self, total: f64) -> f64 {
        if self.battles == 0 {
            0.0
        } else {
            total / self.battles as f64
        }
    }

    /// Percentage of battles won
    pub fn win_rate(&self) -> f64 {
        self.average(100.0 * self.victories as f64)
    }

    pub fn average_turns(&self) -> f64 {
        self.average(self.total_turns as f64)
    }

    pub fn average_damage_dealt(&self) -> f64 {
        self.average(self.total_damage_dealt as f64)
    }

    pub fn average_damage_taken(&self) -> f64 {
        self.average(self.total_damage_taken as f64)
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Battles: {}", self.battles)?;
        writeln!(f, "Victories: {} ({:.1}%)", self.victories, self.win_rate())?;
        writeln!(f, "Defeats: {}", self.defeats)?;
        writeln!(f, "Fled: {}", self.fled)?;
        writeln!(f, "Turn limit: {}", self.turn_limit)?;
        writeln!(f, "Average turns: {:.2}", self.average_turns())?;
        writeln!(f, "Average damage dealt: {:.2}", self.average_damage_dealt())?;
        write!(f, "Average damage taken: {:.2}", self.average_damage_taken())
    }
}
