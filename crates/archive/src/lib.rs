//! convrule-archive: symmetric typed serialization for conversion rules.
//!
//! Rules cross an archive boundary when an app stores them between
//! launches. The archive document is JSON-shaped but untrusted on the way
//! back in, so decoding enforces the expected type of every field and
//! returns an absence signal on any mismatch instead of coercing.
//!
//! [`to_archive`] / [`from_archive`] round-trip any [`Archive`] type;
//! codecs for [`convrule_core::Rule`] and its parts live in [`codec`].

pub mod codec;
pub mod coder;

pub use coder::{from_archive, to_archive, Archive, Decoder, Encoder};
