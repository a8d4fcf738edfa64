//! Turn state machine
//!
//! A `Battle` owns the battle state, the card piles, the enemy, and the
//! random source. Each action is computed on a copy and committed only when
//! it succeeds, so a rejected action never leaves a half-applied state.

use crate::core::{CardId, Character, Enemy};
use crate::game::actions::{BattleAction, BattleEvent, StepOutcome};
use crate::game::config::BattleConfig;
use crate::game::effects::EffectApplicator;
use crate::game::intent;
use crate::game::logger::{BattleLogger, LogCategory};
use crate::game::phase::BattlePhase;
use crate::game::rng::{RandomSource, SeededRandom};
use crate::game::state::{BattleState, EffectTick, Side};
use crate::zones::CardPiles;
use crate::{BattleError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battle<R: RandomSource + Clone = SeededRandom> {
    pub state: BattleState,
    pub piles: CardPiles,
    /// Character metadata; its deck lives in `piles.deck` until `finish`
    pub character: Character,
    pub enemy: Enemy,
    pub phase: BattlePhase,
    pub turn_number: u32,
    /// Next card played costs 0
    pub zero_cost_next: bool,
    pub config: BattleConfig,
    rng: R,

    #[serde(skip)]
    logger: BattleLogger,
}

impl<R: RandomSource + Clone> Battle<R> {
    /// Set up a battle: shuffle the deck into the draw pile, draw the opening
    /// hand, and telegraph the enemy's first move.
    pub fn start(mut character: Character, mut enemy: Enemy, config: BattleConfig, mut rng: R) -> Self {
        enemy.ensure_moves();
        let state = BattleState::new(&character, &enemy);
        let deck = std::mem::take(&mut character.deck);
        character.current_energy = character.max_energy;

        let mut piles = CardPiles::new(deck);
        piles.initialize_from_deck(&mut rng);
        piles.draw(config.hand_size, &mut rng);
        intent::reveal_next(&mut enemy, &mut rng);
        piles.drain_changes();

        let phase = if state.is_defeated(Side::Enemy) {
            BattlePhase::BattleWon
        } else if state.is_defeated(Side::Player) {
            BattlePhase::BattleLost
        } else {
            BattlePhase::PlayerTurn
        };

        Battle {
            state,
            piles,
            character,
            enemy,
            phase,
            turn_number: 1,
            zero_cost_next: false,
            config,
            rng,
            logger: BattleLogger::new(),
        }
    }

    pub fn logger(&self) -> &BattleLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut BattleLogger {
        &mut self.logger
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Ids of the cards in hand, in hand order
    pub fn hand(&self) -> Vec<CardId> {
        self.piles.hand.ids().cloned().collect()
    }

    /// Energy the given card would cost right now
    pub fn effective_cost(&self, card_id: &CardId) -> Option<u32> {
        let card = self.piles.hand.get(card_id)?;
        Some(if self.zero_cost_next { 0 } else { card.energy_cost })
    }

    /// Actions the state machine would accept in the current phase
    pub fn legal_actions(&self) -> Vec<BattleAction> {
        match self.phase {
            BattlePhase::PlayerTurn => {
                let mut actions: Vec<BattleAction> = self
                    .piles
                    .hand
                    .cards
                    .iter()
                    .filter(|c| {
                        let cost = if self.zero_cost_next { 0 } else { c.energy_cost };
                        cost <= self.state.player_energy
                    })
                    .map(|c| BattleAction::play(c.id.clone()))
                    .collect();
                actions.push(BattleAction::EndTurn);
                actions.push(BattleAction::Flee);
                actions
            }
            BattlePhase::EnemyTurn => vec![BattleAction::ResolveEnemyIntent],
            _ => Vec::new(),
        }
    }

    /// Pure step: the battle after `action`, leaving `self` untouched
    pub fn step(&self, action: &BattleAction) -> Result<(Battle<R>, StepOutcome)> {
        let mut next = self.clone();
        let outcome = next.execute(action)?;
        Ok((next, outcome))
    }

    /// Apply `action` in place. On error nothing changes.
    pub fn apply(&mut self, action: BattleAction) -> Result<StepOutcome> {
        let (mut next, outcome) = match self.step(&action) {
            Ok(stepped) => stepped,
            Err(e) => {
                self.logger
                    .event(LogCategory::Rejected, format_args!("rejected {action}: {e}"));
                return Err(e);
            }
        };
        next.logger = std::mem::take(&mut self.logger);
        *self = next;
        self.log_outcome(&outcome);
        Ok(outcome)
    }

    /// End the battle and hand the character back with its deck and health
    pub fn finish(self) -> Character {
        let mut character = self.character;
        character.deck = self.piles.deck;
        character.current_health = self.state.player_health;
        character.current_energy = character.max_energy;
        character
    }

    fn execute(&mut self, action: &BattleAction) -> Result<StepOutcome> {
        if let Some(terminal) = self.phase.terminal() {
            return Err(BattleError::InvalidAction(format!(
                "battle is over ({terminal:?}), cannot {action}"
            )));
        }

        let mut events = Vec::new();
        match action {
            BattleAction::PlayCard { card_id, critical } => {
                self.expect_phase(BattlePhase::PlayerTurn, action)?;
                self.play_card(card_id, *critical, &mut events)?;
            }
            BattleAction::EndTurn => {
                self.expect_phase(BattlePhase::PlayerTurn, action)?;
                self.end_turn(&mut events);
            }
            BattleAction::ResolveEnemyIntent => {
                self.expect_phase(BattlePhase::EnemyTurn, action)?;
                self.resolve_enemy_intent(&mut events);
            }
            BattleAction::Flee => {
                self.expect_phase(BattlePhase::PlayerTurn, action)?;
                self.phase = BattlePhase::Fled;
                events.push(BattleEvent::Fled);
            }
        }

        self.enemy.current_health = self.state.enemy_health;
        self.character.current_energy = self.state.player_energy;

        Ok(StepOutcome {
            state: self.state.clone(),
            pile_changes: self.piles.drain_changes(),
            events,
            terminal: self.phase.terminal(),
        })
    }

    fn expect_phase(&self, phase: BattlePhase, action: &BattleAction) -> Result<()> {
        if self.phase != phase {
            return Err(BattleError::InvalidAction(format!(
                "cannot {action} during {}",
                self.phase
            )));
        }
        Ok(())
    }

    fn applicator<'a>(&'a mut self, events: &'a mut Vec<BattleEvent>) -> EffectApplicator<'a> {
        EffectApplicator {
            state: &mut self.state,
            piles: &mut self.piles,
            rng: &mut self.rng,
            zero_cost_next: &mut self.zero_cost_next,
            events,
        }
    }

    fn play_card(
        &mut self,
        card_id: &CardId,
        critical: Option<bool>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<()> {
        let card = self
            .piles
            .hand
            .get(card_id)
            .cloned()
            .ok_or_else(|| BattleError::CardNotFound(card_id.clone()))?;

        let cost = if self.zero_cost_next { 0 } else { card.energy_cost };
        if cost > self.state.player_energy {
            return Err(BattleError::InsufficientEnergy {
                required: cost,
                available: self.state.player_energy,
            });
        }

        self.zero_cost_next = false;
        self.state.spend_energy(cost);

        let can_crit = card.is_attack() && card.damage.is_some_and(|d| d > 0);
        let critical = can_crit && critical.unwrap_or_else(|| self.roll_crit());

        events.push(BattleEvent::CardPlayed {
            card_id: card_id.clone(),
            energy_spent: cost,
            critical,
        });
        self.applicator(events).resolve_card(&card, critical);

        // The card's own DISCARD may already have moved it
        if self.piles.hand.contains(card_id) {
            self.piles.discard(card_id)?;
        }

        self.check_defeat(events);
        Ok(())
    }

    fn roll_crit(&mut self) -> bool {
        let chance = self.config.crit_chance_for(self.character.over_encumbered);
        self.rng.roll_percent() < chance
    }

    fn end_turn(&mut self, events: &mut Vec<BattleEvent>) {
        let tick = self.state.tick_effects(Side::Player);
        push_tick_events(Side::Player, tick, events);

        self.state.clear_block(Side::Player);
        self.piles.discard_hand();

        if !self.check_defeat(events) {
            self.phase = BattlePhase::EnemyTurn;
        }
    }

    fn resolve_enemy_intent(&mut self, events: &mut Vec<BattleEvent>) {
        if let Some(enemy_move) = self.enemy.telegraphed_move().cloned() {
            events.push(BattleEvent::EnemyActed {
                move_name: enemy_move.name.clone(),
            });
            self.applicator(events).resolve_move(&enemy_move);
        }
        self.state.clear_block(Side::Enemy);
        if self.check_defeat(events) {
            return;
        }

        let tick = self.state.tick_effects(Side::Enemy);
        push_tick_events(Side::Enemy, tick, events);
        if self.check_defeat(events) {
            return;
        }

        intent::reveal_next(&mut self.enemy, &mut self.rng);
        if let Some(next) = self.enemy.telegraphed_move() {
            events.push(BattleEvent::IntentRevealed {
                move_name: next.name.clone(),
                intent: self.enemy.intent,
                value: self.enemy.intent_value,
            });
        }

        self.state.reset_energy();
        self.turn_number += 1;
        events.push(BattleEvent::TurnStarted {
            turn: self.turn_number,
        });

        let card_ids = self.piles.draw(self.config.hand_size, &mut self.rng);
        if !card_ids.is_empty() {
            events.push(BattleEvent::CardsDrawn { card_ids });
        }
        self.phase = BattlePhase::PlayerTurn;
    }

    /// Move to a terminal phase if either side is down. Enemy death is
    /// checked first, so a simultaneous knockout counts as a win.
    fn check_defeat(&mut self, events: &mut Vec<BattleEvent>) -> bool {
        if self.state.is_defeated(Side::Enemy) {
            self.phase = BattlePhase::BattleWon;
            events.push(BattleEvent::Victory);
            true
        } else if self.state.is_defeated(Side::Player) {
            self.phase = BattlePhase::BattleLost;
            events.push(BattleEvent::Defeat);
            true
        } else {
            false
        }
    }

    fn log_outcome(&self, outcome: &StepOutcome) {
        if !self.logger.enabled(LogCategory::Outcome) {
            return;
        }
        for event in &outcome.events {
            match event {
                BattleEvent::CardPlayed {
                    card_id, critical, ..
                } => {
                    let name = self
                        .piles
                        .discard_pile
                        .get(card_id)
                        .map(|c| c.name.as_str())
                        .unwrap_or(card_id.as_str());
                    let crit = if *critical { " (critical)" } else { "" };
                    self.logger
                        .event(LogCategory::Action, format_args!("Player plays {name}{crit}"));
                }
                BattleEvent::DamageDealt {
                    target,
                    amount,
                    blocked,
                } => self.logger.event(
                    LogCategory::Detail,
                    format_args!("{target} takes {amount} damage ({blocked} blocked)"),
                ),
                BattleEvent::BurnDamage { target, amount } => self.logger.event(
                    LogCategory::Detail,
                    format_args!("{target} burns for {amount}"),
                ),
                BattleEvent::BlockGained { target, amount } => self.logger.event(
                    LogCategory::Detail,
                    format_args!("{target} gains {amount} block"),
                ),
                BattleEvent::EffectApplied { target, effect } => self.logger.event(
                    LogCategory::Detail,
                    format_args!("{target} gains {:?} {}", effect.kind, effect.value),
                ),
                BattleEvent::EffectExpired { target, kind } => self.logger.event(
                    LogCategory::Detail,
                    format_args!("{kind:?} on {target} wears off"),
                ),
                BattleEvent::EnemyActed { move_name } => self.logger.event(
                    LogCategory::Action,
                    format_args!("{} uses {move_name}", self.enemy.name),
                ),
                BattleEvent::IntentRevealed {
                    move_name,
                    intent,
                    value,
                } => self.logger.event(
                    LogCategory::Detail,
                    format_args!("{} intends to {intent} ({move_name}, {value})", self.enemy.name),
                ),
                BattleEvent::TurnStarted { turn } => self.logger.event(
                    LogCategory::Turn,
                    format_args!(
                        "Turn {turn}: player {}/{} HP, {} {}/{} HP",
                        self.state.player_health,
                        self.state.player_max_health,
                        self.enemy.name,
                        self.state.enemy_health,
                        self.state.enemy_max_health
                    ),
                ),
                BattleEvent::Victory => self.logger.event(
                    LogCategory::Outcome,
                    format_args!("Victory over {} on turn {}", self.enemy.name, self.turn_number),
                ),
                BattleEvent::Defeat => self.logger.event(
                    LogCategory::Outcome,
                    format_args!("Defeated by {} on turn {}", self.enemy.name, self.turn_number),
                ),
                BattleEvent::Fled => self.logger.event(
                    LogCategory::Outcome,
                    format_args!("Fled from {}", self.enemy.name),
                ),
                BattleEvent::Healed { .. }
                | BattleEvent::EnergyGained { .. }
                | BattleEvent::CardsDrawn { .. }
                | BattleEvent::CardsDiscarded { .. } => {}
            }
        }
    }
}

fn push_tick_events(side: Side, tick: EffectTick, events: &mut Vec<BattleEvent>) {
    if tick.burn_damage > 0 {
        events.push(BattleEvent::BurnDamage {
            target: side,
            amount: tick.burn_damage,
        });
    }
    for effect in tick.expired {
        events.push(BattleEvent::EffectExpired {
            target: side,
            kind: effect.kind,
        });
    }
}
