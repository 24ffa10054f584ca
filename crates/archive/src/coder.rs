//! Typed key/value archiver over a JSON object map.
//!
//! The decoder side is a security boundary: an archive may come from an
//! untrusted store, so every read enforces the expected JSON type for its
//! key and answers `None` on any violation. Declared types are never
//! trusted without enforcement, and nothing is coerced.

use serde_json::{Map, Value};

/// Types that archive themselves under fixed string keys.
pub trait Archive: Sized {
    fn encode(&self, enc: &mut Encoder);

    /// Rebuild from decoded fields. `None` means the archive was missing a
    /// field, carried a wrong-typed payload, or violated a construction
    /// invariant.
    fn decode(dec: &Decoder<'_>) -> Option<Self>;
}

/// Serialize a value to an archive document.
pub fn to_archive<T: Archive>(value: &T) -> Value {
    let mut enc = Encoder::new();
    value.encode(&mut enc);
    enc.finish()
}

/// Deserialize a value from an archive document, enforcing field types.
pub fn from_archive<T: Archive>(archive: &Value) -> Option<T> {
    let dec = Decoder::from_value(archive)?;
    T::decode(&dec)
}

/// Writes typed fields under string keys into a JSON object.
#[derive(Default)]
pub struct Encoder {
    fields: Map<String, Value>,
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder::default()
    }

    pub fn encode_u64(&mut self, key: &str, value: u64) {
        self.fields.insert(key.to_string(), Value::from(value));
    }

    pub fn encode_i64(&mut self, key: &str, value: i64) {
        self.fields.insert(key.to_string(), Value::from(value));
    }

    pub fn encode_f64(&mut self, key: &str, value: f64) {
        self.fields.insert(key.to_string(), Value::from(value));
    }

    pub fn encode_str(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), Value::from(value));
    }

    /// Encode a homogeneous list of archivable items.
    pub fn encode_items<T: Archive>(&mut self, key: &str, items: &[T]) {
        let encoded = items.iter().map(to_archive).collect::<Vec<_>>();
        self.fields.insert(key.to_string(), Value::Array(encoded));
    }

    pub fn finish(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Reads typed fields back out of an archive document.
pub struct Decoder<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Decoder<'a> {
    /// An archive document must be a JSON object; anything else is rejected
    /// outright.
    pub fn from_value(archive: &'a Value) -> Option<Decoder<'a>> {
        Some(Decoder {
            fields: archive.as_object()?,
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn decode_u64(&self, key: &str) -> Option<u64> {
        self.fields.get(key)?.as_u64()
    }

    pub fn decode_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key)?.as_i64()
    }

    pub fn decode_f64(&self, key: &str) -> Option<f64> {
        self.fields.get(key)?.as_f64()
    }

    pub fn decode_str(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key)?.as_str()
    }

    /// Decode a homogeneous list of archivable items. One bad element
    /// rejects the whole list -- no partial recovery.
    pub fn decode_items<T: Archive>(&self, key: &str) -> Option<Vec<T>> {
        let raw = self.fields.get(key)?.as_array()?;
        let mut items = Vec::with_capacity(raw.len());
        for item in raw {
            items.push(from_archive(item)?);
        }
        Some(items)
    }
}
