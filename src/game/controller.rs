//! Battle controller trait and battle view
//!
//! The battle loop asks a controller for the player's next action. The
//! controller inspects a read-only view and picks one of the legal actions
//! the engine offers.

use crate::core::{Card, CardId, Enemy, EnemyMove};
use crate::game::actions::BattleAction;
use crate::game::battle::Battle;
use crate::game::phase::BattlePhase;
use crate::game::rng::RandomSource;
use crate::game::state::BattleState;

/// Read-only view of a battle from the player's side
pub struct BattleView<'a> {
    state: &'a BattleState,
    hand: &'a [Card],
    enemy: &'a Enemy,
    phase: BattlePhase,
    turn_number: u32,
    zero_cost_next: bool,
    draw_pile_len: usize,
    discard_pile_len: usize,
}

impl<'a> BattleView<'a> {
    pub fn new<R: RandomSource + Clone>(battle: &'a Battle<R>) -> Self {
        BattleView {
            state: &battle.state,
            hand: &battle.piles.hand.cards,
            enemy: &battle.enemy,
            phase: battle.phase,
            turn_number: battle.turn_number,
            zero_cost_next: battle.zero_cost_next,
            draw_pile_len: battle.piles.draw_pile.len(),
            discard_pile_len: battle.piles.discard_pile.len(),
        }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn hand(&self) -> &[Card] {
        self.hand
    }

    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.hand.iter().find(|c| &c.id == card_id)
    }

    pub fn enemy(&self) -> &Enemy {
        self.enemy
    }

    /// The move the enemy will make on its next turn
    pub fn enemy_intent(&self) -> Option<&EnemyMove> {
        self.enemy.telegraphed_move()
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn energy(&self) -> u32 {
        self.state.player_energy
    }

    /// Energy the card costs right now
    pub fn cost_of(&self, card: &Card) -> u32 {
        if self.zero_cost_next {
            0
        } else {
            card.energy_cost
        }
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile_len
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile_len
    }
}

/// Decides the player's actions
///
/// Only consulted during the player's turn; enemy turns resolve on their
/// own.
pub trait BattleController {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Pick one of `available`. `None` ends the turn.
    fn choose_action(
        &mut self,
        view: &BattleView,
        available: &[BattleAction],
    ) -> Option<BattleAction>;

    /// Called once when the battle ends
    fn on_battle_end(&mut self, _view: &BattleView, _won: bool) {}
}
