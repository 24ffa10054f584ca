//! Event descriptors: one required event name plus optional per-currency
//! minimum-amount requirements.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::keys;

/// A single currency/minimum-amount requirement on an event.
///
/// Currency codes are compared by exact string equality -- no conversion
/// or normalization. Duplicate currencies within one event are kept and
/// considered independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueThreshold {
    pub currency: String,
    pub amount: f64,
}

/// One required event within a rule.
///
/// `values` being absent and being an empty list are behaviorally the same
/// (no value requirement), but the distinction is preserved so that
/// re-serialization reproduces the input shape.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDescriptor {
    event_name: String,
    values: Option<Vec<ValueThreshold>>,
}

impl EventDescriptor {
    /// Build a descriptor, enforcing its invariants: the event name must be
    /// non-empty and every threshold amount non-negative.
    pub fn new(
        event_name: impl Into<String>,
        values: Option<Vec<ValueThreshold>>,
    ) -> Option<EventDescriptor> {
        let event_name = event_name.into();
        if event_name.is_empty() {
            return None;
        }
        if let Some(thresholds) = &values {
            if thresholds.iter().any(|t| !(t.amount >= 0.0)) {
                return None;
            }
        }
        Some(EventDescriptor { event_name, values })
    }

    /// Build a descriptor from a loosely-typed event record.
    ///
    /// Requires an `event_name` string field. The optional `values` field
    /// must be an array of `{currency, amount}` pairs with a string currency
    /// and a non-negative numeric amount; one malformed pair rejects the
    /// whole record -- there is no best-effort recovery.
    pub fn from_json(record: &Value) -> Option<EventDescriptor> {
        let name = record.get(keys::EVENT_NAME)?.as_str()?;
        let values = match record.get(keys::VALUES) {
            None => None,
            Some(raw) => Some(parse_thresholds(raw)?),
        };
        EventDescriptor::new(name, values)
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn values(&self) -> Option<&[ValueThreshold]> {
        self.values.as_deref()
    }

    /// True when the recorded per-currency amounts meet at least one of this
    /// event's thresholds (OR across the threshold list). An absent currency
    /// reads as `0.0`, so a zero threshold is always met. Events without
    /// thresholds are trivially satisfied.
    pub(crate) fn is_value_satisfied(&self, recorded: Option<&BTreeMap<String, f64>>) -> bool {
        let thresholds = match self.values.as_deref() {
            None | Some([]) => return true,
            Some(t) => t,
        };
        thresholds.iter().any(|t| {
            let observed = recorded
                .and_then(|amounts| amounts.get(&t.currency))
                .copied()
                .unwrap_or(0.0);
            observed >= t.amount
        })
    }
}

fn parse_thresholds(raw: &Value) -> Option<Vec<ValueThreshold>> {
    let pairs = raw.as_array()?;
    let mut out = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let currency = pair.get(keys::CURRENCY)?.as_str()?;
        let amount = pair.get(keys::AMOUNT)?.as_f64()?;
        if !(amount >= 0.0) {
            return None;
        }
        out.push(ValueThreshold {
            currency: currency.to_string(),
            amount,
        });
    }
    Some(out)
}
