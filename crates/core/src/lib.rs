//! convrule-core: attribution conversion-rule model and matching.
//!
//! A rule names the events a user must trigger, with optional per-currency
//! minimum amounts, and maps them to a conversion-value code. The engine
//! answers one question: does an observation snapshot (event names seen plus
//! recorded amounts) satisfy a rule?
//!
//! Rules are built from loosely-typed JSON records through strict,
//! all-or-nothing validation ([`Rule::from_json`]) and are immutable
//! afterwards. Matching ([`Rule::is_matched`]) is a pure function over the
//! rule's own fields and a caller-supplied [`MatchContext`]; independent
//! calls share no state and may run concurrently.
//!
//! Picking a winner among several matched rules (the `priority` field's
//! consumer) is an external aggregation concern, not part of this crate.

pub mod context;
pub mod event;
pub mod keys;
pub mod rule;

pub use context::MatchContext;
pub use event::{EventDescriptor, ValueThreshold};
pub use rule::Rule;
