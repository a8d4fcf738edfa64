//! Core battle data types

pub mod card;
pub mod character;
pub mod effects;
pub mod enemy;
pub mod status;
pub mod types;

pub use card::{Card, CardType, Rarity};
pub use character::{Character, MIN_DECK_SIZE};
pub use effects::{Condition, Effect, EffectKind, EffectList, EffectTarget};
pub use enemy::{fallback_moves, Enemy, EnemyMove, Intent};
pub use status::StatusTable;
pub use types::{CardId, CardName, EnemyId};
