//! Conversion rules: strict construction from untyped records and the
//! matching predicate.
//!
//! Construction is all-or-nothing schema validation: a missing field, a
//! wrong-typed field, or an empty events list rejects the whole record.
//! Matching is a pure, total predicate -- it can never fail, only answer
//! true or false.

use serde_json::Value;

use crate::context::MatchContext;
use crate::event::EventDescriptor;
use crate::keys;

/// A conversion rule: required events and value thresholds mapped to a
/// conversion-value code.
///
/// `priority` ranks rules when several match; that tie-breaking happens in
/// an external aggregation layer and is never consulted by `is_matched`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    conversion_value: u64,
    priority: i64,
    events: Vec<EventDescriptor>,
}

impl Rule {
    /// Build a rule, enforcing the one structural invariant construction
    /// cannot derive from field types: `events` must be non-empty.
    pub fn new(conversion_value: u64, priority: i64, events: Vec<EventDescriptor>) -> Option<Rule> {
        if events.is_empty() {
            return None;
        }
        Some(Rule {
            conversion_value,
            priority,
            events,
        })
    }

    /// Build a rule from a loosely-typed record.
    ///
    /// Required fields: `conversion_value` (non-negative integer),
    /// `priority` (integer), `events` (non-empty array of event records).
    /// Any violation yields `None` -- callers learn that construction
    /// failed, not why, and there is no partially-valid rule.
    pub fn from_json(record: &Value) -> Option<Rule> {
        let conversion_value = record.get(keys::CONVERSION_VALUE)?.as_u64()?;
        let priority = record.get(keys::PRIORITY)?.as_i64()?;
        let raw_events = record.get(keys::EVENTS)?.as_array()?;

        let mut events = Vec::with_capacity(raw_events.len());
        for raw in raw_events {
            events.push(EventDescriptor::from_json(raw)?);
        }
        Rule::new(conversion_value, priority, events)
    }

    pub fn conversion_value(&self) -> u64 {
        self.conversion_value
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn events(&self) -> &[EventDescriptor] {
        &self.events
    }

    /// Decide whether an observation snapshot satisfies this rule.
    ///
    /// Two checks, both over immutable state:
    /// 1. Coverage -- every required event name is in the observed set.
    ///    Extra or duplicate observed events are irrelevant.
    /// 2. Value thresholds -- every event carrying thresholds must have at
    ///    least one `(currency, amount)` pair met by the recorded amounts
    ///    (OR within an event, AND across events). Absent recorded values
    ///    read as zero.
    pub fn is_matched(&self, ctx: &MatchContext) -> bool {
        let covered = self.events.iter().all(|e| ctx.contains_event(e.event_name()));
        if !covered {
            return false;
        }
        self.events
            .iter()
            .all(|e| e.is_value_satisfied(ctx.values_for(e.event_name())))
    }
}
