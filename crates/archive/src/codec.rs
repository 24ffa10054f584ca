//! Archive codecs for the rule model.
//!
//! Field keys match the construction schema exactly, so an archived rule is
//! also a valid construction record and vice versa. Decoding re-enforces
//! the construction invariants (non-empty events, non-empty event names,
//! non-negative amounts) rather than trusting the archive.

use convrule_core::{keys, EventDescriptor, Rule, ValueThreshold};

use crate::coder::{Archive, Decoder, Encoder};

impl Archive for ValueThreshold {
    fn encode(&self, enc: &mut Encoder) {
        enc.encode_str(keys::CURRENCY, &self.currency);
        enc.encode_f64(keys::AMOUNT, self.amount);
    }

    fn decode(dec: &Decoder<'_>) -> Option<Self> {
        let currency = dec.decode_str(keys::CURRENCY)?.to_string();
        let amount = dec.decode_f64(keys::AMOUNT)?;
        if !(amount >= 0.0) {
            return None;
        }
        Some(ValueThreshold { currency, amount })
    }
}

impl Archive for EventDescriptor {
    fn encode(&self, enc: &mut Encoder) {
        enc.encode_str(keys::EVENT_NAME, self.event_name());
        // An absent threshold list stays absent; an empty one stays empty.
        if let Some(thresholds) = self.values() {
            enc.encode_items(keys::VALUES, thresholds);
        }
    }

    fn decode(dec: &Decoder<'_>) -> Option<Self> {
        let name = dec.decode_str(keys::EVENT_NAME)?;
        let values = if dec.contains(keys::VALUES) {
            Some(dec.decode_items::<ValueThreshold>(keys::VALUES)?)
        } else {
            None
        };
        EventDescriptor::new(name, values)
    }
}

impl Archive for Rule {
    fn encode(&self, enc: &mut Encoder) {
        enc.encode_u64(keys::CONVERSION_VALUE, self.conversion_value());
        enc.encode_i64(keys::PRIORITY, self.priority());
        enc.encode_items(keys::EVENTS, self.events());
    }

    fn decode(dec: &Decoder<'_>) -> Option<Self> {
        let conversion_value = dec.decode_u64(keys::CONVERSION_VALUE)?;
        let priority = dec.decode_i64(keys::PRIORITY)?;
        let events = dec.decode_items::<EventDescriptor>(keys::EVENTS)?;
        Rule::new(conversion_value, priority, events)
    }
}
