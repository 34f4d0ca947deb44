// ABOUTME: Bounded recursive decoder for TBinary structs and lists.
// ABOUTME: Declared list counts are validated before they drive any allocation, loop, or recursion.

#![allow(clippy::missing_errors_doc)]

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::estimator::ResourceEstimator;
use crate::policy::SizePolicy;
use crate::types::{FieldHeader, ListHeader, WireType};
use crate::value::{List, Struct, Value};
use serde::{Deserialize, Serialize};

/// Configuration options for the decoder.
///
/// Immutable for the lifetime of a decode; a single config may be shared by
/// any number of concurrent decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Rule applied to every declared list count (default: bounded at 16 Mi)
    pub policy: SizePolicy,
    /// Memory model used for the unchecked policy's survivability check
    pub estimator: ResourceEstimator,
    /// Maximum struct/list nesting depth (default: unbounded)
    pub max_depth: Option<usize>,
    /// Allow trailing bytes after the message (default: false)
    pub allow_trailing_bytes: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            policy: SizePolicy::default(),
            estimator: ResourceEstimator::default(),
            max_depth: None,
            allow_trailing_bytes: false,
        }
    }
}

impl DecoderConfig {
    /// Bounded policy with the given maximum element count.
    #[must_use]
    pub fn bounded(max_count: u32) -> Self {
        Self {
            policy: SizePolicy::Bounded { max_count },
            ..Self::default()
        }
    }

    /// Unchecked policy: reproduces an unguarded decoder.
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            policy: SizePolicy::Unchecked,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Counters describing the work a decoder has done so far.
///
/// Available after success and after failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    /// Bytes consumed from the input
    pub bytes_consumed: usize,
    /// Struct fields decoded
    pub fields_decoded: usize,
    /// List elements fully decoded
    pub elements_visited: usize,
    /// Lists whose declared count passed validation
    pub lists_accepted: usize,
    /// Deepest nesting level entered
    pub max_depth_reached: usize,
    /// Sum of naive allocation estimates for accepted lists
    pub committed_bytes: u64,
}

impl DecodeStats {
    /// Committed bytes per byte received.
    #[must_use]
    pub fn amplification(&self) -> f64 {
        ResourceEstimator::amplification(self.committed_bytes, self.bytes_consumed)
    }
}

/// A TBinary decoder that reads one message from a byte slice.
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
    config: DecoderConfig,
    stats: DecodeStats,
    /// Set once a fatal error has been returned; the decoder is then dead.
    fatal: Option<Error>,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder with the default configuration.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, DecoderConfig::default())
    }

    /// Create a new decoder with custom configuration.
    #[must_use]
    pub fn with_config(data: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            cursor: Cursor::new(data),
            config,
            stats: DecodeStats::default(),
            fatal: None,
        }
    }

    /// Get the current position in the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Get the remaining bytes.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.cursor.remaining()
    }

    /// Check if we've reached the end of input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Get the decoder configuration.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Snapshot of the work done so far.
    #[must_use]
    pub fn stats(&self) -> DecodeStats {
        DecodeStats {
            bytes_consumed: self.cursor.position(),
            ..self.stats
        }
    }

    /// Decode a struct: fields up to and including the stop marker.
    pub fn decode_struct(&mut self) -> Result<Struct> {
        self.guard(|dec| dec.read_struct(0))
    }

    /// Decode a bare list: header followed by its elements.
    pub fn decode_list(&mut self) -> Result<List> {
        self.guard(|dec| dec.read_list(0))
    }

    /// Finish decoding and check for trailing bytes.
    pub fn finish(&self) -> Result<()> {
        if let Some(err) = &self.fatal {
            return Err(err.clone());
        }
        if !self.config.allow_trailing_bytes && !self.cursor.is_empty() {
            return Err(Error::TrailingBytes);
        }
        Ok(())
    }

    /// Run a decode step, refusing to run at all after a fatal error and
    /// remembering any new one.
    fn guard<T>(&mut self, step: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if let Some(err) = &self.fatal {
            return Err(err.clone());
        }
        let result = step(self);
        if let Err(err) = &result {
            if err.is_fatal() {
                self.fatal = Some(err.clone());
            }
        }
        result
    }

    // =========================================================================
    // Headers
    // =========================================================================

    /// Read a field header. Returns `None` at the stop marker, which has no id.
    ///
    /// # Errors
    ///
    /// `UnexpectedEndOfData` if the tag or id is cut short.
    pub fn read_field_header(&mut self) -> Result<Option<FieldHeader>> {
        let wire_type = WireType::from_code(self.cursor.read_u8()?);
        if wire_type == WireType::Stop {
            return Ok(None);
        }
        let id = self.cursor.read_i16()?;
        Ok(Some(FieldHeader { wire_type, id }))
    }

    /// Read a list header. O(1) whatever count it declares.
    ///
    /// # Errors
    ///
    /// `UnexpectedEndOfData` if fewer than five bytes remain. The count is
    /// returned unvalidated.
    pub fn read_list_header(&mut self) -> Result<ListHeader> {
        let element_type = WireType::from_code(self.cursor.read_u8()?);
        let declared_count = self.cursor.read_i32()?;
        Ok(ListHeader {
            element_type,
            declared_count,
        })
    }

    // =========================================================================
    // Internal methods
    // =========================================================================

    /// Record entry into a nesting level, enforcing the depth ceiling.
    fn enter(&mut self, depth: usize) -> Result<()> {
        if let Some(max) = self.config.max_depth {
            if depth > max {
                return Err(Error::MaxDepthExceeded { depth, max });
            }
        }
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        Ok(())
    }

    fn read_struct(&mut self, depth: usize) -> Result<Struct> {
        self.enter(depth)?;

        let mut s = Struct::new();
        while let Some(header) = self.read_field_header()? {
            let value = self.read_value(header.wire_type, depth)?;
            self.stats.fields_decoded += 1;
            s.push(header.id, value);
        }
        Ok(s)
    }

    fn read_list(&mut self, depth: usize) -> Result<List> {
        self.enter(depth)?;

        let header = self.read_list_header()?;

        // Nothing below may depend on declared_count until it is validated.
        let count = self.config.policy.validate(header.declared_count)?;

        let estimator = &self.config.estimator;
        let estimate = if self.config.policy.is_unchecked() {
            estimator.commit(header.element_type, count)?
        } else {
            estimator.estimate(header.element_type, count)
        };

        let Some(min_size) = header.element_type.min_element_size() else {
            return Err(Error::UnknownFieldType(header.element_type.code()));
        };

        // A declared count is a claim. Refuse it outright if the remaining
        // bytes cannot hold that many elements.
        let budget = self.cursor.remaining_len() / min_size;
        if count > budget {
            return Err(Error::UnexpectedEndOfData);
        }

        self.stats.lists_accepted += 1;
        self.stats.committed_bytes = self.stats.committed_bytes.saturating_add(estimate);

        // Grow with the elements actually decoded. The budget above is shared
        // with every enclosing list, so it cannot size this one.
        let mut list = List::new(header.element_type);
        for _ in 0..count {
            list.elements.push(self.read_value(header.element_type, depth)?);
            self.stats.elements_visited += 1;
        }

        Ok(list)
    }

    /// Decode one value of the given type. `depth` is the level of the
    /// containing struct or list.
    fn read_value(&mut self, wire_type: WireType, depth: usize) -> Result<Value> {
        match wire_type {
            WireType::Int64 => Ok(Value::I64(self.cursor.read_i64()?)),
            WireType::List => Ok(Value::List(self.read_list(depth + 1)?)),
            WireType::Struct => Ok(Value::Struct(self.read_struct(depth + 1)?)),
            WireType::Stop | WireType::Unknown(_) => {
                Err(Error::UnknownFieldType(wire_type.code()))
            }
        }
    }
}
