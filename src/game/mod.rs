//! Battle state, turn structure, and the machinery that drives it

pub mod actions;
pub mod battle;
pub mod battle_loop;
pub mod config;
pub mod controller;
pub mod damage;
pub mod effects;
pub mod greedy_controller;
pub mod intent;
pub mod logger;
pub mod phase;
pub mod random_controller;
pub mod rng;
pub mod state;
pub mod state_hash;

pub use actions::{BattleAction, BattleEvent, StepOutcome};
pub use battle::Battle;
pub use battle_loop::{
    BattleEndReason, BattleLoop, BattleOutcomeHandler, BattleReport, CollectingHandler,
    NoopOutcomeHandler,
};
pub use config::BattleConfig;
pub use controller::{BattleController, BattleView};
pub use damage::DamageResult;
pub use effects::EffectApplicator;
pub use greedy_controller::GreedyController;
pub use logger::{BattleLogger, LogCategory, OutputMode, VerbosityLevel};
pub use phase::{BattlePhase, Terminal};
pub use random_controller::RandomController;
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use state::{BattleState, Side};
pub use state_hash::{compute_state_hash, short_hash};
