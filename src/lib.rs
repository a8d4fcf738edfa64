//! Deckbattle - deterministic battle engine for a deck-building battler
//!
//! Takes a character's piles, an enemy's telegraphed move, and a player
//! action, and computes the next battle state. No storage, network, or
//! rendering concerns live here.

pub mod core;
pub mod error;
pub mod game;
pub mod journal;
pub mod loader;
pub mod simulation;
pub mod zones;

pub use error::{BattleError, Result};
