//! Card and enemy-move effects
//!
//! An `Effect` is both a definition (an entry in a card's effect list) and,
//! for timed kinds, the record attached to a combatant once applied.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Effect list stored on cards, moves, and combatants
pub type EffectList = SmallVec<[Effect; 4]>;

/// Kinds of effect a card or enemy move can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    Block,
    Strength,
    Dexterity,
    Weak,
    Vulnerable,
    Draw,
    Aoe,
    MultiHit,
    MultiTarget,
    Burn,
    ConditionalDamage,
    ConditionalEnergy,
    ZeroCostNext,
    Discard,
    Heal,
    Energy,
}

/// Which combatant an effect lands on, relative to the one resolving it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    Actor,
    Opponent,
}

impl EffectKind {
    /// Routing by effect semantics: buffs land on the caster, debuffs on the
    /// opponent, regardless of which side is acting.
    pub fn target(&self) -> EffectTarget {
        match self {
            EffectKind::Weak
            | EffectKind::Vulnerable
            | EffectKind::Burn
            | EffectKind::ConditionalDamage
            | EffectKind::Aoe
            | EffectKind::MultiHit
            | EffectKind::MultiTarget => EffectTarget::Opponent,
            EffectKind::Block
            | EffectKind::Strength
            | EffectKind::Dexterity
            | EffectKind::Draw
            | EffectKind::ConditionalEnergy
            | EffectKind::ZeroCostNext
            | EffectKind::Discard
            | EffectKind::Heal
            | EffectKind::Energy => EffectTarget::Actor,
        }
    }

    /// Kinds that attach to a combatant and count down
    pub fn is_timed(&self) -> bool {
        matches!(
            self,
            EffectKind::Strength
                | EffectKind::Dexterity
                | EffectKind::Weak
                | EffectKind::Vulnerable
                | EffectKind::Burn
        )
    }

    /// Kinds that repeat a card's base damage instead of acting on their own
    pub fn is_hit_multiplier(&self) -> bool {
        matches!(
            self,
            EffectKind::Aoe | EffectKind::MultiHit | EffectKind::MultiTarget
        )
    }

    pub fn is_debuff(&self) -> bool {
        matches!(
            self,
            EffectKind::Weak | EffectKind::Vulnerable | EffectKind::Burn
        )
    }

    /// Whether an upgrade may raise this effect's value
    pub fn scales_on_upgrade(&self) -> bool {
        !matches!(self, EffectKind::ZeroCostNext)
    }
}

/// Predicate checked when a conditional effect resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    /// The opponent currently has no block
    TargetHasNoBlock,
    /// The opponent carries an active effect of this kind
    TargetHasEffect { effect: EffectKind },
    /// The acting combatant is below this share of max health (percent)
    ActorHealthBelow { percent: u32 },
    /// The player's hand is empty
    HandEmpty,
}

impl Default for Condition {
    fn default() -> Self {
        Condition::TargetHasNoBlock
    }
}

/// A single effect entry
///
/// `duration` is measured in turns of the combatant the effect is attached
/// to. On a definition, an absent duration on a timed kind means one turn
/// unless `permanent` is set; on an applied record, `None` means permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,

    #[serde(default)]
    pub value: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub permanent: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Effect {
    pub fn new(kind: EffectKind, value: i32) -> Self {
        Effect {
            kind,
            value,
            duration: None,
            permanent: false,
            condition: None,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self.duration = None;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Record attached to a combatant when this definition resolves
    pub fn to_applied(&self) -> Effect {
        let duration = if self.permanent {
            None
        } else {
            Some(self.duration.unwrap_or(1))
        };
        Effect {
            kind: self.kind,
            value: self.value,
            duration,
            permanent: self.permanent,
            condition: None,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.duration.is_none()
    }
}
