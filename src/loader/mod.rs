//! Loaders for the battle engine's data collaborators
//!
//! Card-definition tables and enemy-template tables (JSON), deck lists
//! (.dck), and the built-in starter catalog.

pub mod card;
pub mod catalog;
pub mod deck;
pub mod enemy;

pub use card::CardDatabase;
pub use deck::{DeckEntry, DeckList, DeckLoader};
pub use enemy::{EnemyDatabase, EnemyTemplate};
