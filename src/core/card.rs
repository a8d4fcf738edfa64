//! Card types and definitions

use crate::core::{CardId, CardName, Effect, EffectList};
use crate::{BattleError, Result};
use serde::{Deserialize, Serialize};

/// Card types
///
/// Older card tables use attack/defense/special/buff/debuff; those names
/// are accepted on input and folded into the three current types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[serde(alias = "attack", alias = "ATTACK")]
    Attack,
    #[serde(alias = "skill", alias = "defense", alias = "debuff")]
    Skill,
    #[serde(alias = "power", alias = "special", alias = "buff")]
    Power,
}

/// Card rarity (drives upgrade scaling)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Starter,
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Amount an upgrade adds to each effect value
    pub fn effect_upgrade_step(&self) -> i32 {
        match self {
            Rarity::Starter | Rarity::Common => 1,
            _ => 2,
        }
    }

    /// Rare and above shed one energy on upgrade
    pub fn upgrade_reduces_cost(&self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Epic | Rarity::Legendary)
    }
}

/// One card instance
///
/// Decks hold these by value; the same struct is the card-table definition
/// before instance ids are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,

    pub name: CardName,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(default)]
    pub rarity: Rarity,

    pub energy_cost: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<i32>,

    #[serde(default)]
    pub effects: EffectList,

    #[serde(default)]
    pub upgraded: bool,
}

impl Card {
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<CardName>,
        card_type: CardType,
        energy_cost: u32,
    ) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            card_type,
            rarity: Rarity::Common,
            energy_cost,
            damage: None,
            block: None,
            effects: EffectList::new(),
            upgraded: false,
        }
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_block(mut self, block: i32) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Copy of this card under a new instance id
    pub fn instance(&self, id: impl Into<CardId>) -> Self {
        Card {
            id: id.into(),
            ..self.clone()
        }
    }

    pub fn is_attack(&self) -> bool {
        self.card_type == CardType::Attack
    }

    /// Number of times the card's base damage lands
    pub fn hit_count(&self) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind.is_hit_multiplier())
            .map(|e| e.value.max(1) as u32)
            .max()
            .unwrap_or(1)
    }

    /// Upgraded copy of this card
    ///
    /// Damage and block scale by 1.5 (rounded up), effect values grow by the
    /// rarity step, and rare-or-better cards lose one energy.
    pub fn upgraded_variant(&self) -> Result<Card> {
        if self.upgraded {
            return Err(BattleError::AlreadyUpgraded(self.id.clone()));
        }

        let step = self.rarity.effect_upgrade_step();
        let mut effects = self.effects.clone();
        for effect in effects.iter_mut().filter(|e| e.kind.scales_on_upgrade()) {
            effect.value += step;
        }

        let energy_cost = if self.rarity.upgrade_reduces_cost() {
            self.energy_cost.saturating_sub(1)
        } else {
            self.energy_cost
        };

        Ok(Card {
            id: self.id.clone(),
            name: self.name.upgraded(),
            description: self.description.clone(),
            card_type: self.card_type,
            rarity: self.rarity,
            energy_cost,
            damage: self.damage.map(scale_up),
            block: self.block.map(scale_up),
            effects,
            upgraded: true,
        })
    }
}

/// x * 1.5, rounded up, saturating at `i32::MAX`
fn scale_up(value: i32) -> i32 {
    let scaled = (value as i64 * 3 + 1).div_euclid(2);
    scaled.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EffectKind;

    #[test]
    fn test_card_creation() {
        let card = Card::new("strike#1", "Strike", CardType::Attack, 1).with_damage(6);
        assert_eq!(card.id.as_str(), "strike#1");
        assert_eq!(card.name.as_str(), "Strike");
        assert!(card.is_attack());
        assert_eq!(card.hit_count(), 1);
        assert!(!card.upgraded);
    }

    #[test]
    fn test_upgrade_scales_numbers() {
        let card = Card::new("bash", "Bash", CardType::Attack, 2)
            .with_damage(8)
            .with_block(5)
            .with_rarity(Rarity::Starter)
            .with_effect(Effect::new(EffectKind::Vulnerable, 2).with_duration(2));

        let up = card.upgraded_variant().unwrap();
        assert_eq!(up.damage, Some(12));
        assert_eq!(up.block, Some(8)); // ceil(7.5)
        assert_eq!(up.effects[0].value, 3);
        assert_eq!(up.effects[0].duration, Some(2));
        assert_eq!(up.energy_cost, 2);
        assert_eq!(up.name.as_str(), "Bash+");
        assert!(up.upgraded);
    }

    #[test]
    fn test_upgrade_saturates_large_numbers() {
        let card = Card::new("smash", "Smash", CardType::Attack, 3)
            .with_damage(1_000_000_000)
            .with_block(i32::MAX);
        let up = card.upgraded_variant().unwrap();
        assert_eq!(up.damage, Some(i32::MAX));
        assert_eq!(up.block, Some(i32::MAX));
    }

    #[test]
    fn test_upgrade_rare_reduces_cost() {
        let card = Card::new("bludgeon", "Bludgeon", CardType::Attack, 3)
            .with_damage(32)
            .with_rarity(Rarity::Rare)
            .with_effect(Effect::new(EffectKind::Weak, 1));
        let up = card.upgraded_variant().unwrap();
        assert_eq!(up.energy_cost, 2);
        assert_eq!(up.effects[0].value, 3);

        let free = Card::new("flash", "Flash", CardType::Skill, 0).with_rarity(Rarity::Legendary);
        assert_eq!(free.upgraded_variant().unwrap().energy_cost, 0);
    }

    #[test]
    fn test_upgrade_rejects_second_upgrade() {
        let card = Card::new("strike", "Strike", CardType::Attack, 1).with_damage(6);
        let up = card.upgraded_variant().unwrap();
        let err = up.upgraded_variant().unwrap_err();
        assert!(matches!(err, BattleError::AlreadyUpgraded(_)));
        assert_eq!(up.damage, Some(9));
    }

    #[test]
    fn test_zero_cost_next_does_not_scale() {
        let card = Card::new("prep", "Preparation", CardType::Skill, 1)
            .with_effect(Effect::new(EffectKind::ZeroCostNext, 1))
            .with_effect(Effect::new(EffectKind::Draw, 1));
        let up = card.upgraded_variant().unwrap();
        assert_eq!(up.effects[0].value, 1);
        assert_eq!(up.effects[1].value, 2);
    }

    #[test]
    fn test_hit_count_uses_largest_multiplier() {
        let card = Card::new("twin", "Twin Strike", CardType::Attack, 1)
            .with_damage(5)
            .with_effect(Effect::new(EffectKind::MultiHit, 2))
            .with_effect(Effect::new(EffectKind::Aoe, 3));
        assert_eq!(card.hit_count(), 3);
    }

    #[test]
    fn test_legacy_type_names() {
        let json = r#"{"id":"guard","name":"Guard","type":"defense","energyCost":1,"block":5}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.card_type, CardType::Skill);
        assert_eq!(card.rarity, Rarity::Common);
        assert_eq!(card.block, Some(5));

        let json = r#"{"id":"rage","name":"Rage","type":"buff","energyCost":0}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.card_type, CardType::Power);
    }
}
