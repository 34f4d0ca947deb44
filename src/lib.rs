// ABOUTME: Bounded decoder for the TBinary tag-length-value wire format.
// ABOUTME: Refuses "resize bombs": declared list counts are validated before they cost anything.

//! # bounded_tbinary
//!
//! A decoder for the subset of the Thrift binary protocol (TBinary) made of
//! structs, `i64` fields, and lists, hardened against declared-count
//! amplification in untrusted input.
//!
//! A TBinary list header declares its element count up front. A naive
//! decoder pre-sizes its container from that count, so a 20 byte message
//! claiming two billion struct elements asks for 64 GB. This crate validates
//! every declared count with a [`SizePolicy`] before doing any work that
//! scales with it, and never trusts a count that the remaining bytes could
//! not possibly satisfy.
//!
//! ## Quick Start
//!
//! ```rust
//! use bounded_tbinary::{decode_message, Value};
//!
//! // { 1: i64 = 42 }
//! let bytes = [0x0a, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 42, 0x00];
//! let message = decode_message(&bytes).unwrap();
//! assert_eq!(message.get(1).and_then(Value::as_i64), Some(42));
//! ```
//!
//! ## Rejecting a resize bomb
//!
//! ```rust
//! use bounded_tbinary::{decode_message_with_config, DecoderConfig, Error};
//!
//! let bomb = [
//!     0x0a, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x49, 0x96, 0x02, 0xd2, // 1: i64
//!     0x0f, 0x00, 0x02, 0x0c, 0x77, 0x35, 0x94, 0x00, // 2: list<struct>, 2 billion
//!     0x00,
//! ];
//!
//! let err = decode_message_with_config(&bomb, DecoderConfig::default()).unwrap_err();
//! assert!(matches!(err, Error::SizeLimitExceeded { declared: 2_000_000_000, .. }));
//!
//! // The unguarded behaviour, modelled rather than performed.
//! let err = decode_message_with_config(&bomb, DecoderConfig::unchecked()).unwrap_err();
//! assert!(err.is_fatal());
//! ```
//!
//! ## Resource Limits
//!
//! Defaults:
//! - Maximum list size: 16,777,216 elements (bounded policy)
//! - Survivable allocation for the unchecked policy: 1 GiB
//! - Maximum nesting depth: unbounded unless `max_depth` is set
//!
//! Nesting is decoded recursively, and a nested list header costs only five
//! bytes. Without a depth ceiling, a list-of-list chain of about a megabyte
//! overflows the native stack. Callers decoding untrusted input should set
//! one:
//!
//! ```rust
//! use bounded_tbinary::DecoderConfig;
//!
//! let config = DecoderConfig::default().with_max_depth(64);
//! assert_eq!(config.max_depth, Some(64));
//! ```
//!
//! List storage grows with the elements actually decoded. A declared count
//! never sizes an allocation, so heap use stays proportional to the bytes
//! received.
//!
//! Decoding is synchronous and keeps no state outside the [`Decoder`]; a
//! [`DecoderConfig`] can be shared freely between threads.

pub mod cursor;
pub mod decoder;
pub mod error;
pub mod estimator;
pub mod policy;
pub mod types;
pub mod value;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod value_tests;

// Re-export commonly used items at the crate root
pub use cursor::Cursor;
pub use decoder::{DecodeStats, Decoder, DecoderConfig};
pub use error::{Error, ErrorClass, Result};
pub use estimator::ResourceEstimator;
pub use policy::SizePolicy;
pub use types::{limits, type_code, FieldHeader, ListHeader, WireType};
pub use value::{Field, List, Struct, Value};

/// Decode one complete message (a top-level struct) with the default
/// configuration.
///
/// # Example
///
/// ```rust
/// use bounded_tbinary::decode_message;
///
/// let message = decode_message(&[0x00]).unwrap();
/// assert!(message.is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if the message is malformed, exceeds a limit, or is
/// followed by trailing bytes.
pub fn decode_message(data: &[u8]) -> Result<Struct> {
    decode_message_with_config(data, DecoderConfig::default())
}

/// Decode one complete message with custom configuration.
///
/// # Errors
///
/// See [`decode_message`]; trailing bytes are allowed when
/// `allow_trailing_bytes` is set.
pub fn decode_message_with_config(data: &[u8], config: DecoderConfig) -> Result<Struct> {
    let mut decoder = Decoder::with_config(data, config);
    let message = decoder.decode_struct()?;
    decoder.finish()?;
    Ok(message)
}
