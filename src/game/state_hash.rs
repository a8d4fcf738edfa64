//! Battle fingerprints
//!
//! Two battles that will resolve every future action identically (same
//! state, piles, enemy, RNG position) produce the same hash. Card
//! descriptions are flavour text and are left out.

use crate::game::battle::Battle;
use crate::game::rng::RandomSource;
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const FLAVOUR_FIELDS: &[&str] = &["description"];

/// Canonical JSON form of a battle with flavour fields removed
pub fn canonical_state<R>(battle: &Battle<R>) -> Result<String>
where
    R: RandomSource + Clone + Serialize,
{
    let mut value = serde_json::to_value(battle)?;
    drop_flavour(&mut value);
    Ok(serde_json::to_string(&value)?)
}

/// Hash of `canonical_state`; 0 if the battle cannot be serialized
pub fn compute_state_hash<R>(battle: &Battle<R>) -> u64
where
    R: RandomSource + Clone + Serialize,
{
    canonical_state(battle)
        .map(|canonical| {
            let mut hasher = DefaultHasher::new();
            canonical.hash(&mut hasher);
            hasher.finish()
        })
        .unwrap_or(0)
}

fn drop_flavour(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|key, _| !FLAVOUR_FIELDS.contains(&key.as_str()));
            map.values_mut().for_each(drop_flavour);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_flavour),
        _ => {}
    }
}

/// High 32 bits in hex, short enough for a log line
pub fn short_hash(hash: u64) -> String {
    format!("{:08x}", hash >> 32)
}
