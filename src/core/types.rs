//! Strongly-typed wrappers for battle concepts
//!
//! Card instance ids, card names, and enemy template ids are all strings on
//! the wire. Wrapping them keeps a card id from being passed where a name
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one card instance in a deck (e.g. "strike#2")
///
/// Copies of the same card definition get distinct instance ids when a deck
/// is built from a deck list, but duplicate ids are tolerated: lookups
/// always act on the first match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(s: impl Into<String>) -> Self {
        CardId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Definition part of an instance id ("strike#2" -> "strike")
    pub fn definition(&self) -> &str {
        self.0.split_once('#').map(|(def, _)| def).unwrap_or(&self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

/// Card display name (distinct from the instance id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name an upgraded copy carries ("Strike" -> "Strike+")
    pub fn upgraded(&self) -> Self {
        CardName(format!("{}+", self.0))
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

/// Enemy template id (e.g. "jaw_worm")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(String);

impl EnemyId {
    pub fn new(s: impl Into<String>) -> Self {
        EnemyId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EnemyId {
    fn from(s: &str) -> Self {
        EnemyId(s.to_string())
    }
}

impl From<String> for EnemyId {
    fn from(s: String) -> Self {
        EnemyId(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_definition() {
        assert_eq!(CardId::new("strike#2").definition(), "strike");
        assert_eq!(CardId::new("bash").definition(), "bash");
    }

    #[test]
    fn test_card_name_upgraded() {
        let name = CardName::new("Strike");
        assert_eq!(name.upgraded().as_str(), "Strike+");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = CardId::new("defend#1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"defend#1\"");
        let enemy: EnemyId = serde_json::from_str("\"cultist\"").unwrap();
        assert_eq!(enemy.as_str(), "cultist");
    }
}
