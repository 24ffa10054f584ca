//! Caller-supplied observation snapshot for a single match call.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// Observed event names plus recorded per-event, per-currency amounts.
///
/// A context is supplied fresh for every `Rule::is_matched` call and never
/// retained by the engine. `values` being absent is equivalent to every
/// per-currency lookup reading `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchContext {
    events: BTreeSet<String>,
    values: Option<BTreeMap<String, BTreeMap<String, f64>>>,
}

impl MatchContext {
    pub fn new<I, S>(events: I) -> MatchContext
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MatchContext {
            events: events.into_iter().map(Into::into).collect(),
            values: None,
        }
    }

    pub fn with_values(
        mut self,
        values: BTreeMap<String, BTreeMap<String, f64>>,
    ) -> MatchContext {
        self.values = Some(values);
        self
    }

    /// Record one observed amount, creating the values map on first use.
    pub fn record_value(&mut self, event: &str, currency: &str, amount: f64) {
        self.values
            .get_or_insert_with(BTreeMap::new)
            .entry(event.to_string())
            .or_default()
            .insert(currency.to_string(), amount);
    }

    /// Strict decode from `{"events": [...], "values": {...}}`.
    ///
    /// Same rejection discipline as rule construction: `events` must be an
    /// array of strings, and `values` (when present) an object of objects
    /// mapping currency codes to non-negative numbers. Any type mismatch
    /// rejects the whole context.
    pub fn from_json(record: &Value) -> Option<MatchContext> {
        let raw_events = record.get("events")?.as_array()?;
        let mut events = BTreeSet::new();
        for raw in raw_events {
            events.insert(raw.as_str()?.to_string());
        }

        let values = match record.get("values") {
            None => None,
            Some(raw) => Some(parse_values(raw)?),
        };

        Some(MatchContext { events, values })
    }

    pub fn contains_event(&self, name: &str) -> bool {
        self.events.contains(name)
    }

    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(String::as_str)
    }

    pub(crate) fn values_for(&self, event: &str) -> Option<&BTreeMap<String, f64>> {
        self.values.as_ref()?.get(event)
    }
}

fn parse_values(raw: &Value) -> Option<BTreeMap<String, BTreeMap<String, f64>>> {
    let by_event = raw.as_object()?;
    let mut out = BTreeMap::new();
    for (event, amounts) in by_event {
        let by_currency = amounts.as_object()?;
        let mut parsed = BTreeMap::new();
        for (currency, amount) in by_currency {
            let amount = amount.as_f64()?;
            if !(amount >= 0.0) {
                return None;
            }
            parsed.insert(currency.clone(), amount);
        }
        out.insert(event.clone(), parsed);
    }
    Some(out)
}
