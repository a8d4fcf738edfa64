//! Error types for the battle engine

use crate::core::CardId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Invalid battle action: {0}")]
    InvalidAction(String),

    #[error("Insufficient energy: card costs {required}, {available} available")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("Card already upgraded: {0}")]
    AlreadyUpgraded(CardId),

    #[error("Deck would drop below minimum size: {size} < {minimum}")]
    DeckBelowMinimum { size: usize, minimum: usize },

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Invalid enemy format: {0}")]
    InvalidEnemyFormat(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BattleError {
    fn from(e: serde_json::Error) -> Self {
        BattleError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;
