//! Card and enemy-move resolution
//!
//! A card or move resolves as damage, then block, then its effect list in
//! order. Effects route by kind: buffs and resource effects land on the
//! actor, debuffs on the opponent.

use crate::core::{Card, Condition, Effect, EffectKind, EffectTarget, EnemyMove};
use crate::game::actions::BattleEvent;
use crate::game::damage;
use crate::game::rng::RandomSource;
use crate::game::state::{BattleState, Side};
use crate::zones::CardPiles;

/// Mutable view of a battle while one card or move resolves
pub struct EffectApplicator<'a> {
    pub state: &'a mut BattleState,
    pub piles: &'a mut CardPiles,
    pub rng: &'a mut dyn RandomSource,
    /// Pending "next card costs 0"
    pub zero_cost_next: &'a mut bool,
    pub events: &'a mut Vec<BattleEvent>,
}

impl<'a> EffectApplicator<'a> {
    /// Resolve a played card for the player. `critical` doubles base damage.
    pub fn resolve_card(&mut self, card: &Card, critical: bool) {
        if let Some(base) = card.damage {
            let base = if critical { base.saturating_mul(2) } else { base };
            for _ in 0..card.hit_count() {
                self.strike(Side::Player, base);
            }
        }

        if let Some(block) = card.block {
            self.gain_block(Side::Player, block);
        }

        self.apply(&card.effects, Side::Player);
    }

    /// Resolve an enemy move against the player
    pub fn resolve_move(&mut self, enemy_move: &EnemyMove) {
        if let Some(base) = enemy_move.damage {
            self.strike(Side::Enemy, base);
        }

        if let Some(block) = enemy_move.block {
            self.gain_block(Side::Enemy, block);
        }

        self.apply(&enemy_move.effects, Side::Enemy);
    }

    /// Apply an effect list on behalf of `actor`, in list order
    pub fn apply(&mut self, effects: &[Effect], actor: Side) {
        for effect in effects {
            self.apply_one(effect, actor);
        }
    }

    fn apply_one(&mut self, effect: &Effect, actor: Side) {
        let target = match effect.kind.target() {
            EffectTarget::Actor => actor,
            EffectTarget::Opponent => actor.opponent(),
        };

        match effect.kind {
            EffectKind::Block => self.gain_block(actor, effect.value),

            EffectKind::Strength
            | EffectKind::Dexterity
            | EffectKind::Weak
            | EffectKind::Vulnerable
            | EffectKind::Burn => {
                let applied = effect.to_applied();
                self.state.push_effect(target, applied.clone());
                self.events.push(BattleEvent::EffectApplied {
                    target,
                    effect: applied,
                });
            }

            EffectKind::Draw => {
                if actor == Side::Player {
                    self.draw(effect.value);
                }
            }

            // Folded into the card's hit count
            EffectKind::Aoe | EffectKind::MultiHit | EffectKind::MultiTarget => {}

            EffectKind::ConditionalDamage => {
                if self.condition_holds(effect.condition.unwrap_or_default(), actor) {
                    self.strike(actor, effect.value);
                }
            }

            EffectKind::ConditionalEnergy => {
                if actor == Side::Player
                    && self.condition_holds(effect.condition.unwrap_or_default(), actor)
                {
                    self.gain_energy(effect.value);
                }
            }

            EffectKind::ZeroCostNext => {
                if actor == Side::Player {
                    *self.zero_cost_next = true;
                }
            }

            EffectKind::Discard => {
                if actor == Side::Player && effect.value > 0 {
                    let card_ids = self.piles.discard_from_hand_end(effect.value as usize);
                    if !card_ids.is_empty() {
                        self.events.push(BattleEvent::CardsDiscarded { card_ids });
                    }
                }
            }

            EffectKind::Heal => {
                let before = self.state.health(actor);
                self.state.heal(actor, effect.value);
                let amount = self.state.health(actor) - before;
                self.events.push(BattleEvent::Healed {
                    target: actor,
                    amount,
                });
            }

            EffectKind::Energy => {
                if actor == Side::Player {
                    self.gain_energy(effect.value);
                }
            }
        }
    }

    /// One hit of `base` damage from `attacker` into its opponent
    fn strike(&mut self, attacker: Side, base: i32) {
        let defender = attacker.opponent();
        let block = self.state.block(defender);
        let hit = damage::resolve(
            base,
            self.state.effects(attacker),
            self.state.effects(defender),
            block,
        );
        self.state.apply_hit(defender, hit);
        self.events.push(BattleEvent::DamageDealt {
            target: defender,
            amount: hit.damage,
            blocked: block - hit.remaining_block,
        });
    }

    fn gain_block(&mut self, side: Side, base: i32) {
        let amount = damage::block_gain(base, self.state.effects(side));
        self.state.add_block(side, amount);
        self.events.push(BattleEvent::BlockGained {
            target: side,
            amount,
        });
    }

    fn gain_energy(&mut self, value: i32) {
        let amount = value.max(0) as u32;
        self.state.gain_energy(amount);
        self.events.push(BattleEvent::EnergyGained { amount });
    }

    fn draw(&mut self, value: i32) {
        if value <= 0 {
            return;
        }
        let card_ids = self.piles.draw(value as usize, &mut *self.rng);
        if !card_ids.is_empty() {
            self.events.push(BattleEvent::CardsDrawn { card_ids });
        }
    }

    /// Predicate check at resolution time, from `actor`'s point of view
    fn condition_holds(&self, condition: Condition, actor: Side) -> bool {
        let opponent = actor.opponent();
        match condition {
            Condition::TargetHasNoBlock => self.state.block(opponent) == 0,
            Condition::TargetHasEffect { effect } => self.state.has_effect(opponent, effect),
            Condition::ActorHealthBelow { percent } => {
                let health = self.state.health(actor) as i64;
                let max = self.state.max_health(actor) as i64;
                health * 100 < max * percent as i64
            }
            Condition::HandEmpty => self.piles.hand.is_empty(),
        }
    }
}
