//! Random controller, a baseline for balancing runs

use crate::game::actions::BattleAction;
use crate::game::controller::{BattleController, BattleView};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Picks uniformly among playable cards and ending the turn. Never flees.
pub struct RandomController {
    rng: Xoshiro256PlusPlus,
}

impl RandomController {
    pub fn new() -> Self {
        RandomController {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Seeded, for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        RandomController {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for RandomController {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleController for RandomController {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(
        &mut self,
        _view: &BattleView,
        available: &[BattleAction],
    ) -> Option<BattleAction> {
        let choices: Vec<&BattleAction> = available
            .iter()
            .filter(|a| !matches!(a, BattleAction::Flee))
            .collect();
        if choices.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..choices.len());
        Some(choices[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardType, Character, Enemy};
    use crate::game::battle::Battle;
    use crate::game::config::BattleConfig;
    use crate::game::rng::SeededRandom;

    fn battle() -> Battle {
        let deck = (0..10)
            .map(|i| Card::new(format!("strike#{i}"), "Strike", CardType::Attack, 1).with_damage(6))
            .collect();
        Battle::start(
            Character::new("Ironclad", 80, 3).with_deck(deck),
            Enemy::new("slime", "Slime", 30, 6),
            BattleConfig::default(),
            SeededRandom::new(1),
        )
    }

    #[test]
    fn test_choose_from_empty_actions() {
        let b = battle();
        let view = BattleView::new(&b);
        let mut controller = RandomController::with_seed(42);
        assert_eq!(controller.choose_action(&view, &[]), None);
        assert_eq!(controller.choose_action(&view, &[BattleAction::Flee]), None);
    }

    #[test]
    fn test_choice_is_legal() {
        let b = battle();
        let view = BattleView::new(&b);
        let actions = b.legal_actions();
        let mut controller = RandomController::with_seed(42);
        for _ in 0..20 {
            let action = controller.choose_action(&view, &actions).unwrap();
            assert!(actions.contains(&action));
            assert_ne!(action, BattleAction::Flee);
        }
    }

    #[test]
    fn test_seeded_determinism() {
        let b = battle();
        let view = BattleView::new(&b);
        let actions = b.legal_actions();
        let mut c1 = RandomController::with_seed(7);
        let mut c2 = RandomController::with_seed(7);
        for _ in 0..10 {
            assert_eq!(
                c1.choose_action(&view, &actions),
                c2.choose_action(&view, &actions)
            );
        }
    }
}
