//! Enemy representation and move tables

use crate::core::{Effect, EffectKind, EffectList, EffectTarget, EnemyId};
use serde::{Deserialize, Serialize};

/// The enemy's telegraphed next action category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Attack,
    Defend,
    Buff,
    Debuff,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Intent::Attack => "attack",
            Intent::Defend => "defend",
            Intent::Buff => "buff",
            Intent::Debuff => "debuff",
        };
        write!(f, "{s}")
    }
}

/// One entry of an enemy's weighted move table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyMove {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<i32>,

    #[serde(default)]
    pub effects: EffectList,

    pub weight: u32,
}

impl EnemyMove {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        EnemyMove {
            name: name.into(),
            damage: None,
            block: None,
            effects: EffectList::new(),
            weight,
        }
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_block(mut self, block: i32) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Intent category shown to the player
    pub fn intent(&self) -> Intent {
        if self.damage.is_some_and(|d| d > 0) {
            Intent::Attack
        } else if self.block.is_some_and(|b| b > 0) {
            Intent::Defend
        } else if self
            .effects
            .iter()
            .any(|e| e.kind.target() == EffectTarget::Opponent)
        {
            Intent::Debuff
        } else {
            Intent::Buff
        }
    }

    /// Magnitude shown alongside the intent
    pub fn intent_value(&self) -> i32 {
        match self.intent() {
            Intent::Attack => self.damage.unwrap_or(0),
            Intent::Defend => self.block.unwrap_or(0),
            Intent::Buff | Intent::Debuff => self.effects.iter().map(|e| e.value).sum(),
        }
    }
}

/// Move table for enemies that only define a base damage stat
///
/// Weights 70/20/10 reproduce the attack/defend/buff percentage roll.
pub fn fallback_moves(damage: i32) -> Vec<EnemyMove> {
    let defend = (damage * 4 + 4).div_euclid(5); // ceil(damage * 0.8)
    let buff = (damage * 3 + 9).div_euclid(10); // ceil(damage * 0.3)
    vec![
        EnemyMove::new("Attack", 70).with_damage(damage),
        EnemyMove::new("Defend", 20).with_block(defend),
        EnemyMove::new("Buff", 10).with_effect(Effect::new(EffectKind::Strength, buff).permanent()),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub id: EnemyId,

    pub name: String,

    pub current_health: i32,
    pub max_health: i32,

    /// Base attack value
    pub damage: i32,

    #[serde(default = "default_intent")]
    pub intent: Intent,

    #[serde(default)]
    pub intent_value: i32,

    #[serde(default)]
    pub moves: Vec<EnemyMove>,

    /// Index into `moves` of the telegraphed move
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_move: Option<usize>,
}

fn default_intent() -> Intent {
    Intent::Attack
}

impl Enemy {
    pub fn new(id: impl Into<EnemyId>, name: impl Into<String>, max_health: i32, damage: i32) -> Self {
        Enemy {
            id: id.into(),
            name: name.into(),
            current_health: max_health,
            max_health,
            damage,
            intent: Intent::Attack,
            intent_value: damage,
            moves: Vec::new(),
            current_move: None,
        }
    }

    pub fn with_move(mut self, enemy_move: EnemyMove) -> Self {
        self.moves.push(enemy_move);
        self
    }

    /// Fill in the percentage-roll table when no moves are defined
    pub fn ensure_moves(&mut self) {
        if self.moves.is_empty() {
            self.moves = fallback_moves(self.damage);
        }
    }

    /// Telegraph the move at `idx`
    pub fn set_move(&mut self, idx: usize) {
        if let Some(m) = self.moves.get(idx) {
            self.intent = m.intent();
            self.intent_value = m.intent_value();
            self.current_move = Some(idx);
        }
    }

    pub fn telegraphed_move(&self) -> Option<&EnemyMove> {
        self.current_move.and_then(|idx| self.moves.get(idx))
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_intents() {
        let chomp = EnemyMove::new("Chomp", 25).with_damage(11);
        assert_eq!(chomp.intent(), Intent::Attack);
        assert_eq!(chomp.intent_value(), 11);

        let bellow = EnemyMove::new("Bellow", 45)
            .with_block(6)
            .with_effect(Effect::new(EffectKind::Strength, 3).permanent());
        assert_eq!(bellow.intent(), Intent::Defend);
        assert_eq!(bellow.intent_value(), 6);

        let lick = EnemyMove::new("Lick", 30).with_effect(Effect::new(EffectKind::Weak, 1));
        assert_eq!(lick.intent(), Intent::Debuff);

        let ritual = EnemyMove::new("Incantation", 10)
            .with_effect(Effect::new(EffectKind::Strength, 3).permanent());
        assert_eq!(ritual.intent(), Intent::Buff);
        assert_eq!(ritual.intent_value(), 3);
    }

    #[test]
    fn test_fallback_moves_match_percentage_roll() {
        let moves = fallback_moves(10);
        assert_eq!(moves.len(), 3);
        assert_eq!(moves.iter().map(|m| m.weight).sum::<u32>(), 100);
        assert_eq!(moves[0].damage, Some(10));
        assert_eq!(moves[1].block, Some(8));
        assert_eq!(moves[2].effects[0].value, 3);

        let moves = fallback_moves(7);
        assert_eq!(moves[1].block, Some(6)); // ceil(5.6)
        assert_eq!(moves[2].effects[0].value, 3); // ceil(2.1)
    }

    #[test]
    fn test_set_move_updates_intent() {
        let mut enemy = Enemy::new("gremlin", "Gremlin", 20, 5);
        enemy.ensure_moves();
        enemy.set_move(1);
        assert_eq!(enemy.intent, Intent::Defend);
        assert_eq!(enemy.intent_value, 4);
        assert_eq!(enemy.telegraphed_move().map(|m| m.name.as_str()), Some("Defend"));

        enemy.set_move(99);
        assert_eq!(enemy.current_move, Some(1));
    }
}
