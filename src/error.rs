// ABOUTME: Error types for bounded TBinary decoding.
// ABOUTME: Each variant has a stable snake_case name used by the conformance vectors.

use std::fmt;

/// The result type for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a message.
///
/// Every error abandons the current decode operation. Use [`Error::class`]
/// to tell malformed input and safe rejections apart from the fatal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The buffer ran out in the middle of a field, or a list declared more
    /// elements than the remaining bytes could hold.
    UnexpectedEndOfData,

    /// A type tag outside the recognized set.
    UnknownFieldType(u8),

    /// A list header declared a negative element count.
    NegativeSize(i32),

    /// Unconsumed bytes after a complete message.
    TrailingBytes,

    /// A list declared more elements than the bounded policy allows.
    /// Raised before any work proportional to `declared`.
    SizeLimitExceeded {
        /// The element count claimed by the sender.
        declared: i32,
        /// The configured ceiling.
        max: u32,
    },

    /// Struct/list nesting exceeded the configured depth ceiling.
    MaxDepthExceeded {
        /// Depth at which the ceiling was hit.
        depth: usize,
        /// The configured ceiling.
        max: usize,
    },

    /// The unchecked policy accepted a count whose naive allocation would
    /// not survive. Models a process crash: the decoder must not be reused.
    SimulatedAllocationFailure {
        /// Bytes a naive implementation would have tried to allocate.
        requested_bytes: u64,
        /// The survivable allocation threshold.
        survivable_bytes: u64,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The bytes do not form a valid message.
    Malformed,
    /// The message was refused by a configured limit before any proportional
    /// work was done. The caller is fully recoverable.
    Rejected,
    /// The irrecoverable outcome of an unguarded decode.
    Fatal,
}

impl Error {
    /// Returns the standardized error type name for test matching.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::UnexpectedEndOfData => "unexpected_end_of_data",
            Error::UnknownFieldType(_) => "unknown_field_type",
            Error::NegativeSize(_) => "negative_size",
            Error::TrailingBytes => "trailing_bytes",
            Error::SizeLimitExceeded { .. } => "size_limit_exceeded",
            Error::MaxDepthExceeded { .. } => "max_depth_exceeded",
            Error::SimulatedAllocationFailure { .. } => "simulated_allocation_failure",
        }
    }

    /// Returns the class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::UnexpectedEndOfData
            | Error::UnknownFieldType(_)
            | Error::NegativeSize(_)
            | Error::TrailingBytes => ErrorClass::Malformed,
            Error::SizeLimitExceeded { .. } | Error::MaxDepthExceeded { .. } => {
                ErrorClass::Rejected
            }
            Error::SimulatedAllocationFailure { .. } => ErrorClass::Fatal,
        }
    }

    /// Returns true for the catastrophic outcome.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Fatal
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEndOfData => write!(f, "unexpected end of data"),
            Error::UnknownFieldType(code) => write!(f, "unknown field type: {code}"),
            Error::NegativeSize(n) => write!(f, "negative list size: {n}"),
            Error::TrailingBytes => write!(f, "trailing bytes after message"),
            Error::SizeLimitExceeded { declared, max } => {
                write!(f, "list size exceeds maximum: {declared} > {max}")
            }
            Error::MaxDepthExceeded { depth, max } => {
                write!(f, "nesting depth {depth} exceeds maximum {max}")
            }
            Error::SimulatedAllocationFailure {
                requested_bytes,
                survivable_bytes,
            } => write!(
                f,
                "cannot allocate {requested_bytes} bytes (survivable limit {survivable_bytes})"
            ),
        }
    }
}

impl std::error::Error for Error {}
