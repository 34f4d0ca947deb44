// ABOUTME: Defines TBinary type codes, the WireType enum, and field/list headers.
// ABOUTME: Type codes map directly to the TBinary protocol byte values.

/// Type codes for the supported subset of TBinary.
/// These match the Thrift `TType` values exactly.
pub mod type_code {
    /// Struct terminator.
    pub const STOP: u8 = 0;

    /// Big-endian signed 64-bit integer.
    pub const I64: u8 = 10;

    /// Nested struct.
    pub const STRUCT: u8 = 12;

    /// Homogeneous list with a declared element count.
    pub const LIST: u8 = 15;
}

/// Wire sizes of the fixed-width parts of the format, in bytes.
pub mod wire_size {
    /// Type tag.
    pub const TYPE_TAG: usize = 1;

    /// Field id following every non-stop tag.
    pub const FIELD_ID: usize = 2;

    /// Int64 value.
    pub const I64: usize = 8;

    /// Element type + declared count.
    pub const LIST_HEADER: usize = 1 + 4;

    /// An empty struct is a lone stop tag.
    pub const EMPTY_STRUCT: usize = TYPE_TAG;
}

/// How a field or list element is encoded.
///
/// Any tag outside the recognized set decodes to [`WireType::Unknown`]
/// rather than being undefined; the decoder refuses it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Stop,
    Int64,
    List,
    Struct,
    Unknown(u8),
}

impl WireType {
    /// Map a wire tag to its type.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            type_code::STOP => WireType::Stop,
            type_code::I64 => WireType::Int64,
            type_code::LIST => WireType::List,
            type_code::STRUCT => WireType::Struct,
            other => WireType::Unknown(other),
        }
    }

    /// The wire tag for this type.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            WireType::Stop => type_code::STOP,
            WireType::Int64 => type_code::I64,
            WireType::List => type_code::LIST,
            WireType::Struct => type_code::STRUCT,
            WireType::Unknown(code) => code,
        }
    }

    /// Smallest number of bytes one list element of this type can occupy.
    /// Returns `None` for types that cannot be list elements.
    #[inline]
    #[must_use]
    pub const fn min_element_size(self) -> Option<usize> {
        match self {
            WireType::Int64 => Some(wire_size::I64),
            WireType::List => Some(wire_size::LIST_HEADER),
            WireType::Struct => Some(wire_size::EMPTY_STRUCT),
            WireType::Stop | WireType::Unknown(_) => None,
        }
    }
}

/// The header preceding every struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub wire_type: WireType,
    pub id: i16,
}

/// The header preceding every list's elements.
///
/// `declared_count` is sender-controlled and is only a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub element_type: WireType,
    pub declared_count: i32,
}

/// Default resource limits.
pub mod limits {
    /// Maximum elements in a single list under the bounded policy (16 Mi).
    pub const DEFAULT_MAX_CONTAINER_SIZE: u32 = 16 * 1024 * 1024;

    /// Largest allocation an unguarded process is assumed to survive (1 GiB).
    pub const SURVIVABLE_ALLOCATION_BYTES: u64 = 1 << 30;

    /// Estimated in-memory size of one decoded struct element.
    pub const STRUCT_ELEMENT_BYTES: u64 = 32;

    /// Estimated in-memory size of one decoded i64 element.
    pub const I64_ELEMENT_BYTES: u64 = 8;

    /// Estimated in-memory size of one decoded nested list element.
    pub const LIST_ELEMENT_BYTES: u64 = 24;
}
