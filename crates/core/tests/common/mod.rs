//! Randomized JSON mutation for robustness tests.
//!
//! Takes a well-formed record and derives structurally damaged variants:
//! dropped keys, retyped leaves, emptied arrays, sign flips. The engine's
//! contract toward such input is narrow -- construct a valid rule or return
//! `None`, never panic.

use rand::prelude::*;
use serde_json::{Map, Value};

pub fn mutate(value: &Value, rng: &mut StdRng) -> Value {
    match value {
        Value::Object(map) => mutate_object(map, rng),
        Value::Array(items) => mutate_array(items, rng),
        leaf => mutate_leaf(leaf, rng),
    }
}

fn mutate_object(map: &Map<String, Value>, rng: &mut StdRng) -> Value {
    let mut out = Map::new();
    for (key, value) in map {
        match rng.gen_range(0..10) {
            // Drop the field entirely.
            0 => {}
            // Replace the value with a random wrong-typed leaf.
            1 => {
                out.insert(key.clone(), random_leaf(rng));
            }
            // Keep the field, possibly mutating below.
            _ => {
                out.insert(key.clone(), mutate(value, rng));
            }
        }
    }
    Value::Object(out)
}

fn mutate_array(items: &[Value], rng: &mut StdRng) -> Value {
    if rng.gen_range(0..10) == 0 {
        return Value::Array(vec![]);
    }
    Value::Array(items.iter().map(|item| mutate(item, rng)).collect())
}

fn mutate_leaf(leaf: &Value, rng: &mut StdRng) -> Value {
    match rng.gen_range(0..4) {
        0 => random_leaf(rng),
        _ => leaf.clone(),
    }
}

fn random_leaf(rng: &mut StdRng) -> Value {
    match rng.gen_range(0..6) {
        0 => Value::Null,
        1 => Value::Bool(rng.gen()),
        2 => Value::from(rng.gen_range(-1000i64..1000)),
        3 => Value::from(rng.gen_range(-100.0f64..100.0)),
        4 => Value::String("USD".to_string()),
        _ => Value::String(format!("junk_{}", rng.gen_range(0..100))),
    }
}
