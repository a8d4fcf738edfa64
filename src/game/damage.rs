//! Damage resolution
//!
//! Multiplier order is fixed: attacker strength (+10% per point), then
//! defender weak (x0.75), then defender vulnerable (x1.5), then floor, then
//! block. The multiplier is tracked in exact integer fractions so the floor
//! never lands one short on float drift.

use crate::core::{Effect, StatusTable};
use serde::{Deserialize, Serialize};

/// Outcome of one hit against a defender's block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Health lost after block
    pub damage: i32,
    /// Defender block left over
    pub remaining_block: i32,
}

/// Damage after attacker and defender modifiers, before block
pub fn modified_damage(base: i32, attacker: &[Effect], defender: &[Effect]) -> i32 {
    let attacker = StatusTable::new(attacker);
    let defender = StatusTable::new(defender);

    // multiplier = tenths / 10, times 3/4 for weak, times 3/2 for vulnerable
    let tenths = 10 + attacker.strength() as i64;
    if base <= 0 || tenths <= 0 {
        return 0;
    }

    let mut numerator = base as i64 * tenths;
    let mut denominator: i64 = 10;
    if defender.is_weak() {
        numerator *= 3;
        denominator *= 4;
    }
    if defender.is_vulnerable() {
        numerator *= 3;
        denominator *= 2;
    }

    (numerator / denominator).clamp(0, i32::MAX as i64) as i32
}

/// Resolve one hit of `base` damage against a defender holding `defender_block`
pub fn resolve(
    base: i32,
    attacker: &[Effect],
    defender: &[Effect],
    defender_block: i32,
) -> DamageResult {
    let final_damage = modified_damage(base, attacker, defender);
    absorb(final_damage, defender_block)
}

/// Apply already-modified damage against block
pub fn absorb(final_damage: i32, defender_block: i32) -> DamageResult {
    let final_damage = final_damage.max(0);
    let block = defender_block.max(0);
    if block >= final_damage {
        DamageResult {
            damage: 0,
            remaining_block: block - final_damage,
        }
    } else {
        DamageResult {
            damage: final_damage - block,
            remaining_block: 0,
        }
    }
}

/// Block gained from a card or move: base plus dexterity, never negative
pub fn block_gain(base: i32, actor: &[Effect]) -> i32 {
    base.saturating_add(StatusTable::new(actor).dexterity()).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EffectKind;

    fn weak() -> Effect {
        Effect::new(EffectKind::Weak, 1).with_duration(2)
    }

    #[test]
    fn test_block_absorbs_before_health() {
        assert_eq!(
            resolve(6, &[], &[], 10),
            DamageResult {
                damage: 0,
                remaining_block: 4
            }
        );
        assert_eq!(
            resolve(10, &[], &[], 4),
            DamageResult {
                damage: 6,
                remaining_block: 0
            }
        );
    }

    #[test]
    fn test_weak_multiplier() {
        assert_eq!(resolve(10, &[], &[weak()], 0).damage, 7);
    }

    #[test]
    fn test_strength_stacking() {
        let strength = [Effect::new(EffectKind::Strength, 3)];
        assert_eq!(resolve(10, &strength, &[], 0).damage, 13);
    }

    #[test]
    fn test_strength_then_weak_order() {
        // 10 * 1.2 = 12, * 0.75 = 9
        let strength = [Effect::new(EffectKind::Strength, 2)];
        assert_eq!(resolve(10, &strength, &[weak()], 0).damage, 9);
        // 7 * 1.1 = 7.7, * 0.75 = 5.775 -> 5
        let strength = [Effect::new(EffectKind::Strength, 1)];
        assert_eq!(resolve(7, &strength, &[weak()], 0).damage, 5);
    }

    #[test]
    fn test_vulnerable_multiplier() {
        let vulnerable = [Effect::new(EffectKind::Vulnerable, 1).with_duration(1)];
        assert_eq!(resolve(6, &[], &vulnerable, 0).damage, 9);
        assert_eq!(resolve(5, &[], &vulnerable, 0).damage, 7);
    }

    #[test]
    fn test_negative_strength_clamps_at_zero() {
        let sapped = [Effect::new(EffectKind::Strength, -15)];
        let result = resolve(10, &sapped, &[], 3);
        assert_eq!(result.damage, 0);
        assert_eq!(result.remaining_block, 3);
    }

    #[test]
    fn test_never_negative() {
        let attackers = [
            vec![],
            vec![Effect::new(EffectKind::Strength, 4)],
            vec![Effect::new(EffectKind::Strength, -12)],
        ];
        let defenders = [
            vec![],
            vec![weak()],
            vec![weak(), Effect::new(EffectKind::Vulnerable, 1)],
        ];
        for base in [0, 1, 5, 13, 40] {
            for attacker in &attackers {
                for defender in &defenders {
                    for block in [0, 3, 50] {
                        let r = resolve(base, attacker, defender, block);
                        assert!(r.damage >= 0);
                        assert!(r.remaining_block >= 0);
                        assert!(r.remaining_block <= block);
                    }
                }
            }
        }
    }

    #[test]
    fn test_block_gain_uses_dexterity() {
        let dex = [Effect::new(EffectKind::Dexterity, 2)];
        assert_eq!(block_gain(5, &dex), 7);
        let frail = [Effect::new(EffectKind::Dexterity, -9)];
        assert_eq!(block_gain(5, &frail), 0);
    }
}
