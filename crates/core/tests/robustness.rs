//! Robustness against malformed input: construction must either produce a
//! valid rule or fail cleanly. Seeded so failures reproduce.

mod common;

use convrule_core::{MatchContext, Rule};
use rand::prelude::*;
use serde_json::json;

fn sample_rule() -> serde_json::Value {
    json!({
        "conversion_value": 2,
        "priority": 7,
        "events": [
            {
                "event_name": "purchase",
                "values": [
                    { "currency": "USD", "amount": 100 },
                    { "currency": "EUR", "amount": 100 }
                ]
            },
            { "event_name": "app_activate" }
        ]
    })
}

fn sample_context() -> serde_json::Value {
    json!({
        "events": ["app_activate", "purchase"],
        "values": { "purchase": { "USD": 1000 } }
    })
}

#[test]
fn mutated_rules_never_panic() {
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..100 {
            let mutated = common::mutate(&sample_rule(), &mut rng);
            // Some or None are both acceptable; panicking is not.
            let _ = Rule::from_json(&mutated);
        }
    }
}

#[test]
fn mutated_contexts_never_panic() {
    let rule = Rule::from_json(&sample_rule()).unwrap();
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..100 {
            let mutated = common::mutate(&sample_context(), &mut rng);
            if let Some(ctx) = MatchContext::from_json(&mutated) {
                // Matching is total over whatever survived validation.
                let _ = rule.is_matched(&ctx);
            }
        }
    }
}

#[test]
fn unmutated_sample_still_parses() {
    // Guard against the fixtures drifting out of the valid schema.
    assert!(Rule::from_json(&sample_rule()).is_some());
    assert!(MatchContext::from_json(&sample_context()).is_some());
}

#[test]
fn accepted_mutants_hold_construction_invariants() {
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..100 {
            let mutated = common::mutate(&sample_rule(), &mut rng);
            if let Some(rule) = Rule::from_json(&mutated) {
                assert!(!rule.events().is_empty());
                for event in rule.events() {
                    assert!(!event.event_name().is_empty());
                    for t in event.values().unwrap_or(&[]) {
                        assert!(t.amount >= 0.0);
                    }
                }
            }
        }
    }
}
