//! Greedy controller
//!
//! Scores each playable card by what it does this turn and plays the best
//! one. A lethal attack always wins, cheapest first. Ties go to the card
//! earliest in hand, so the choice is deterministic.

use crate::core::{Card, EffectKind};
use crate::game::actions::BattleAction;
use crate::game::controller::{BattleController, BattleView};
use crate::game::damage;
use crate::game::state::Side;

#[derive(Debug, Clone, Default)]
pub struct GreedyController;

impl GreedyController {
    pub fn new() -> Self {
        GreedyController
    }

    /// Health the card takes off the enemy right now
    fn expected_damage(view: &BattleView, card: &Card) -> i32 {
        let Some(base) = card.damage else {
            return 0;
        };
        let state = view.state();
        let per_hit = damage::modified_damage(
            base,
            state.effects(Side::Player),
            state.effects(Side::Enemy),
        );
        let total = per_hit * card.hit_count() as i32;
        (total - state.enemy_block).max(0)
    }

    fn score(view: &BattleView, card: &Card) -> i32 {
        let utility: i32 = card
            .effects
            .iter()
            .map(|e| match e.kind {
                EffectKind::Strength | EffectKind::Vulnerable => e.value * 3,
                EffectKind::Weak | EffectKind::Burn | EffectKind::ConditionalDamage => e.value * 2,
                EffectKind::Draw | EffectKind::Energy | EffectKind::ZeroCostNext => e.value * 2,
                EffectKind::Discard => -e.value,
                EffectKind::Block
                | EffectKind::Dexterity
                | EffectKind::Heal
                | EffectKind::ConditionalEnergy => e.value,
                EffectKind::Aoe | EffectKind::MultiHit | EffectKind::MultiTarget => 0,
            })
            .sum();
        let spent = view.cost_of(card) as i32;
        Self::expected_damage(view, card) * 2 + utility - spent
    }
}

impl BattleController for GreedyController {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_action(
        &mut self,
        view: &BattleView,
        available: &[BattleAction],
    ) -> Option<BattleAction> {
        let playable: Vec<(&BattleAction, &Card)> = available
            .iter()
            .filter_map(|a| match a {
                BattleAction::PlayCard { card_id, .. } => view.card(card_id).map(|c| (a, c)),
                _ => None,
            })
            .collect();

        let enemy_health = view.state().enemy_health;
        let lethal = playable
            .iter()
            .filter(|(_, c)| Self::expected_damage(view, c) >= enemy_health)
            .min_by_key(|(_, c)| view.cost_of(c));
        if let Some((action, _)) = lethal {
            return Some((*action).clone());
        }

        let mut best: Option<(&BattleAction, i32)> = None;
        for (action, card) in &playable {
            let score = Self::score(view, card);
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((*action, score));
            }
        }
        best.map(|(action, _)| action.clone())
    }
}
