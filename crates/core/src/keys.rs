//! Fixed field keys shared by JSON construction and the archive codec.
//!
//! These are wire-format constants: changing any of them breaks
//! compatibility with recorded rule payloads.

pub const CONVERSION_VALUE: &str = "conversion_value";
pub const PRIORITY: &str = "priority";
pub const EVENTS: &str = "events";
pub const EVENT_NAME: &str = "event_name";
pub const VALUES: &str = "values";
pub const CURRENCY: &str = "currency";
pub const AMOUNT: &str = "amount";
