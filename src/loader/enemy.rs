//! Enemy-template table

use crate::core::{Enemy, EnemyId, EnemyMove};
use crate::{BattleError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Stats an enemy starts each battle with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub max_health: i32,
    /// Base attack, used to synthesize a move table when `moves` is empty
    pub damage: i32,
    #[serde(default)]
    pub moves: Vec<EnemyMove>,
}

impl EnemyTemplate {
    /// Fresh enemy at full health
    pub fn instantiate(&self) -> Enemy {
        let mut enemy = Enemy::new(self.id.clone(), self.name.clone(), self.max_health, self.damage);
        enemy.moves = self.moves.clone();
        enemy.ensure_moves();
        enemy
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnemyDatabase {
    templates: FxHashMap<String, EnemyTemplate>,
}

impl EnemyDatabase {
    pub fn new() -> Self {
        EnemyDatabase {
            templates: FxHashMap::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let templates: Vec<EnemyTemplate> = serde_json::from_str(json)
            .map_err(|e| BattleError::InvalidEnemyFormat(e.to_string()))?;
        let mut db = EnemyDatabase::new();
        for template in templates {
            db.insert(template)?;
        }
        Ok(db)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }

    pub fn insert(&mut self, template: EnemyTemplate) -> Result<()> {
        if template.max_health <= 0 {
            return Err(BattleError::InvalidEnemyFormat(format!(
                "enemy '{}' needs positive maxHealth",
                template.id
            )));
        }
        let key = template.id.as_str().to_string();
        if self.templates.contains_key(&key) {
            return Err(BattleError::InvalidEnemyFormat(format!(
                "duplicate enemy id '{key}'"
            )));
        }
        self.templates.insert(key, template);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.get(id)
    }

    /// Fresh enemy for `id`
    pub fn spawn(&self, id: &str) -> Result<Enemy> {
        self.get(id)
            .map(EnemyTemplate::instantiate)
            .ok_or_else(|| BattleError::InvalidEnemyFormat(format!("unknown enemy '{id}'")))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
