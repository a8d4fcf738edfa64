//! Enemy intent selection

use crate::core::{Enemy, EnemyMove};
use crate::game::rng::RandomSource;

/// Pick a move index from a weighted table
///
/// Draws `r = next_float * total_weight` and walks the table subtracting
/// weights until the remainder drops to zero or below. A table whose weights
/// sum to zero yields its first move.
pub fn select_move(moves: &[EnemyMove], rng: &mut dyn RandomSource) -> Option<usize> {
    if moves.is_empty() {
        return None;
    }

    let total: u64 = moves.iter().map(|m| m.weight as u64).sum();
    if total == 0 {
        return Some(0);
    }

    let mut remainder = rng.next_float() * total as f64;
    for (idx, m) in moves.iter().enumerate() {
        if m.weight == 0 {
            continue;
        }
        remainder -= m.weight as f64;
        if remainder <= 0.0 {
            return Some(idx);
        }
    }

    // Only reachable through float rounding at the top of the range
    moves.iter().rposition(|m| m.weight > 0)
}

/// Choose and telegraph the enemy's next move
pub fn reveal_next(enemy: &mut Enemy, rng: &mut dyn RandomSource) {
    enemy.ensure_moves();
    if let Some(idx) = select_move(&enemy.moves, rng) {
        enemy.set_move(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EffectKind, Intent};
    use crate::game::rng::ScriptedRandom;

    fn table() -> Vec<EnemyMove> {
        vec![
            EnemyMove::new("Chomp", 25).with_damage(11),
            EnemyMove::new("Thrash", 30).with_damage(7).with_block(5),
            EnemyMove::new("Bellow", 45).with_block(6),
        ]
    }

    #[test]
    fn test_weighted_walk() {
        let moves = table();
        // total 100: [0,25] Chomp, (25,55] Thrash, (55,100) Bellow
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.0)), Some(0));
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.25)), Some(0));
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.3)), Some(1));
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.6)), Some(2));
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.99)), Some(2));
    }

    #[test]
    fn test_zero_weights_pick_first() {
        let moves = vec![EnemyMove::new("A", 0), EnemyMove::new("B", 0)];
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.7)), Some(0));
        assert_eq!(select_move(&[], &mut ScriptedRandom::constant(0.7)), None);
    }

    #[test]
    fn test_zero_weight_move_never_selected() {
        let moves = vec![EnemyMove::new("Sleep", 0), EnemyMove::new("Bite", 3)];
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.0)), Some(1));
        assert_eq!(select_move(&moves, &mut ScriptedRandom::constant(0.99)), Some(1));
    }

    #[test]
    fn test_reveal_uses_fallback_table() {
        let mut enemy = Enemy::new("slime", "Slime", 20, 10);
        reveal_next(&mut enemy, &mut ScriptedRandom::constant(0.95));
        assert_eq!(enemy.moves.len(), 3);
        assert_eq!(enemy.intent, Intent::Buff);
        let buff = enemy.telegraphed_move().unwrap();
        assert_eq!(buff.effects[0].kind, EffectKind::Strength);
        assert_eq!(buff.effects[0].value, 3);

        reveal_next(&mut enemy, &mut ScriptedRandom::constant(0.8));
        assert_eq!(enemy.intent, Intent::Defend);
        assert_eq!(enemy.intent_value, 8);

        reveal_next(&mut enemy, &mut ScriptedRandom::constant(0.1));
        assert_eq!(enemy.intent, Intent::Attack);
        assert_eq!(enemy.intent_value, 10);
    }
}
