//! Status effect table
//!
//! Read-only aggregate queries over a combatant's active effects. Values of
//! the same kind stack additively; WEAK and VULNERABLE only matter by
//! presence.

use crate::core::{Effect, EffectKind};

pub struct StatusTable<'a> {
    effects: &'a [Effect],
}

impl<'a> StatusTable<'a> {
    pub fn new(effects: &'a [Effect]) -> Self {
        StatusTable { effects }
    }

    /// Sum of `value` across every effect of this kind
    pub fn total(&self, kind: EffectKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .fold(0i32, |sum, e| sum.saturating_add(e.value))
    }

    /// Present with a positive value
    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind && e.value > 0)
    }

    pub fn strength(&self) -> i32 {
        self.total(EffectKind::Strength)
    }

    pub fn dexterity(&self) -> i32 {
        self.total(EffectKind::Dexterity)
    }

    pub fn burn(&self) -> i32 {
        self.total(EffectKind::Burn)
    }

    pub fn is_weak(&self) -> bool {
        self.has(EffectKind::Weak)
    }

    pub fn is_vulnerable(&self) -> bool {
        self.has(EffectKind::Vulnerable)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_stacks_additively() {
        let effects = [
            Effect::new(EffectKind::Strength, 2).with_duration(1),
            Effect::new(EffectKind::Strength, 3).with_duration(2),
            Effect::new(EffectKind::Dexterity, 1),
        ];
        let table = StatusTable::new(&effects);
        assert_eq!(table.strength(), 5);
        assert_eq!(table.dexterity(), 1);
        assert_eq!(table.burn(), 0);
    }

    #[test]
    fn test_weak_is_presence_based() {
        let effects = [Effect::new(EffectKind::Weak, 1).with_duration(2)];
        assert!(StatusTable::new(&effects).is_weak());
        assert!(!StatusTable::new(&effects).is_vulnerable());

        let zeroed = [Effect::new(EffectKind::Weak, 0).with_duration(2)];
        assert!(!StatusTable::new(&zeroed).is_weak());
    }

    #[test]
    fn test_empty_table() {
        let table = StatusTable::new(&[]);
        assert!(table.is_empty());
        assert_eq!(table.strength(), 0);
        assert!(!table.has(EffectKind::Vulnerable));
    }
}
