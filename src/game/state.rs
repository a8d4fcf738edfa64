//! Battle state snapshot
//!
//! The numbers the engine rewrites on every step: health, block, energy,
//! and active effects for both combatants. Piles live in `CardPiles`.

use crate::core::{Character, Effect, EffectKind, EffectList, Enemy, StatusTable};
use crate::game::damage::DamageResult;
use serde::{Deserialize, Serialize};

/// One of the two combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub player_health: i32,
    pub player_max_health: i32,
    pub player_block: i32,
    pub player_energy: u32,
    pub player_max_energy: u32,
    pub player_effects: EffectList,

    pub enemy_health: i32,
    pub enemy_max_health: i32,
    pub enemy_block: i32,
    pub enemy_effects: EffectList,
}

/// What ticking a combatant's effects did at the end of its turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectTick {
    /// Health lost to burn (ignores block)
    pub burn_damage: i32,
    /// Effects whose duration ran out
    pub expired: Vec<Effect>,
}

impl BattleState {
    /// Fresh state at battle start: no block, full energy, equipment effects
    /// on the player, nothing on the enemy.
    pub fn new(character: &Character, enemy: &Enemy) -> Self {
        BattleState {
            player_health: character.current_health.clamp(0, character.max_health),
            player_max_health: character.max_health,
            player_block: 0,
            player_energy: character.max_energy,
            player_max_energy: character.max_energy,
            player_effects: character
                .equipment_effects
                .iter()
                .map(|e| e.to_applied())
                .collect(),
            enemy_health: enemy.current_health.clamp(0, enemy.max_health),
            enemy_max_health: enemy.max_health,
            enemy_block: 0,
            enemy_effects: EffectList::new(),
        }
    }

    pub fn health(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_health,
            Side::Enemy => self.enemy_health,
        }
    }

    pub fn max_health(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_max_health,
            Side::Enemy => self.enemy_max_health,
        }
    }

    pub fn block(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_block,
            Side::Enemy => self.enemy_block,
        }
    }

    pub fn effects(&self, side: Side) -> &[Effect] {
        match side {
            Side::Player => &self.player_effects,
            Side::Enemy => &self.enemy_effects,
        }
    }

    pub fn effects_mut(&mut self, side: Side) -> &mut EffectList {
        match side {
            Side::Player => &mut self.player_effects,
            Side::Enemy => &mut self.enemy_effects,
        }
    }

    pub fn status(&self, side: Side) -> StatusTable<'_> {
        StatusTable::new(self.effects(side))
    }

    fn health_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Player => &mut self.player_health,
            Side::Enemy => &mut self.enemy_health,
        }
    }

    fn block_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Player => &mut self.player_block,
            Side::Enemy => &mut self.enemy_block,
        }
    }

    pub fn is_defeated(&self, side: Side) -> bool {
        self.health(side) <= 0
    }

    /// Write a resolved hit back: block becomes the remainder, health drops
    /// (floored at 0)
    pub fn apply_hit(&mut self, side: Side, hit: DamageResult) {
        *self.block_mut(side) = hit.remaining_block;
        let health = self.health_mut(side);
        *health = (*health - hit.damage).max(0);
    }

    /// Health loss that bypasses block
    pub fn lose_health(&mut self, side: Side, amount: i32) {
        let health = self.health_mut(side);
        *health = (*health - amount.max(0)).max(0);
    }

    pub fn heal(&mut self, side: Side, amount: i32) {
        let max = self.max_health(side);
        let health = self.health_mut(side);
        *health = health.saturating_add(amount.max(0)).min(max);
    }

    pub fn add_block(&mut self, side: Side, amount: i32) {
        let block = self.block_mut(side);
        *block = block.saturating_add(amount).max(0);
    }

    pub fn clear_block(&mut self, side: Side) {
        *self.block_mut(side) = 0;
    }

    pub fn push_effect(&mut self, side: Side, effect: Effect) {
        self.effects_mut(side).push(effect);
    }

    pub fn gain_energy(&mut self, amount: u32) {
        self.player_energy = self.player_energy.saturating_add(amount);
    }

    pub fn spend_energy(&mut self, amount: u32) {
        self.player_energy = self.player_energy.saturating_sub(amount);
    }

    pub fn reset_energy(&mut self) {
        self.player_energy = self.player_max_energy;
    }

    /// End-of-turn bookkeeping for `side`: burn deals its damage, then every
    /// timed effect loses one turn and those reaching zero are removed.
    /// Permanent effects are untouched.
    pub fn tick_effects(&mut self, side: Side) -> EffectTick {
        let burn_damage = self.status(side).burn().max(0);
        if burn_damage > 0 {
            self.lose_health(side, burn_damage);
        }

        let mut expired = Vec::new();
        let effects = self.effects_mut(side);
        for effect in effects.iter_mut() {
            if let Some(turns) = effect.duration.as_mut() {
                *turns = turns.saturating_sub(1);
            }
        }
        effects.retain(|e| {
            if e.duration == Some(0) {
                expired.push(e.clone());
                false
            } else {
                true
            }
        });

        EffectTick {
            burn_damage,
            expired,
        }
    }

    /// Whether `side` carries an effect of this kind
    pub fn has_effect(&self, side: Side, kind: EffectKind) -> bool {
        self.status(side).has(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> BattleState {
        let character = Character::new("Ironclad", 100, 3);
        let enemy = Enemy::new("slime", "Slime", 20, 5);
        BattleState::new(&character, &enemy)
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(s.player_health, 100);
        assert_eq!(s.player_energy, 3);
        assert_eq!(s.enemy_health, 20);
        assert_eq!(s.player_block, 0);
        assert!(s.player_effects.is_empty());
    }

    #[test]
    fn test_equipment_effects_are_permanent() {
        let character = Character::new("Ironclad", 100, 3)
            .with_equipment_effect(Effect::new(EffectKind::Strength, 1));
        let enemy = Enemy::new("slime", "Slime", 20, 5);
        let mut s = BattleState::new(&character, &enemy);
        assert_eq!(s.status(Side::Player).strength(), 1);
        s.tick_effects(Side::Player);
        assert_eq!(s.status(Side::Player).strength(), 1);
    }

    #[test]
    fn test_health_stays_in_bounds() {
        let mut s = state();
        s.apply_hit(
            Side::Enemy,
            DamageResult {
                damage: 50,
                remaining_block: 0,
            },
        );
        assert_eq!(s.enemy_health, 0);
        assert!(s.is_defeated(Side::Enemy));

        s.player_health = 95;
        s.heal(Side::Player, 30);
        assert_eq!(s.player_health, 100);
    }

    #[test]
    fn test_tick_expires_effects() {
        let mut s = state();
        s.push_effect(Side::Enemy, Effect::new(EffectKind::Weak, 1).with_duration(2));
        s.push_effect(Side::Enemy, Effect::new(EffectKind::Vulnerable, 1).with_duration(1));

        let tick = s.tick_effects(Side::Enemy);
        assert_eq!(tick.expired.len(), 1);
        assert_eq!(tick.expired[0].kind, EffectKind::Vulnerable);
        assert!(s.has_effect(Side::Enemy, EffectKind::Weak));

        let tick = s.tick_effects(Side::Enemy);
        assert_eq!(tick.expired[0].kind, EffectKind::Weak);
        assert!(s.enemy_effects.is_empty());
    }

    #[test]
    fn test_block_and_heal_saturate() {
        let mut s = state();
        s.add_block(Side::Player, i32::MAX);
        s.add_block(Side::Player, 5);
        assert_eq!(s.player_block, i32::MAX);

        s.player_health = 50;
        s.heal(Side::Player, i32::MAX);
        assert_eq!(s.player_health, s.player_max_health);
    }

    #[test]
    fn test_burn_ignores_block() {
        let mut s = state();
        s.enemy_block = 10;
        s.push_effect(Side::Enemy, Effect::new(EffectKind::Burn, 3).with_duration(2));
        let tick = s.tick_effects(Side::Enemy);
        assert_eq!(tick.burn_damage, 3);
        assert_eq!(s.enemy_health, 17);
        assert_eq!(s.enemy_block, 10);
    }

    #[test]
    fn test_energy() {
        let mut s = state();
        s.spend_energy(2);
        assert_eq!(s.player_energy, 1);
        s.spend_energy(5);
        assert_eq!(s.player_energy, 0);
        s.reset_energy();
        assert_eq!(s.player_energy, 3);
    }
}
