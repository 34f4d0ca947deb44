// ABOUTME: Decoded message model: structs of id-tagged fields, lists, and i64 values.
// ABOUTME: Serializes to a serde data model with structs as maps keyed by field id.

use crate::types::WireType;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A decoded TBinary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer
    I64(i64),
    /// A homogeneous list
    List(List),
    /// A nested struct
    Struct(Struct),
}

/// One decoded struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: i16,
    pub value: Value,
}

/// A decoded struct: fields in wire order.
///
/// Field ids are not required to be unique or ordered on the wire, and no
/// such requirement is imposed here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Struct {
    pub fields: Vec<Field>,
}

/// A decoded list. `elements.len()` always equals the declared count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub element_type: WireType,
    pub elements: Vec<Value>,
}

impl Value {
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl Struct {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields decoded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The first field with the given id.
    #[must_use]
    pub fn get(&self, id: i16) -> Option<&Value> {
        self.fields.iter().find(|f| f.id == id).map(|f| &f.value)
    }

    pub fn push(&mut self, id: i16, value: Value) {
        self.fields.push(Field { id, value });
    }
}

impl List {
    #[must_use]
    pub fn new(element_type: WireType) -> Self {
        Self {
            element_type,
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Struct> for Value {
    fn from(s: Struct) -> Self {
        Value::Struct(s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::I64(n) => serializer.serialize_i64(*n),
            Value::List(l) => l.serialize(serializer),
            Value::Struct(s) => s.serialize(serializer),
        }
    }
}

impl Serialize for Struct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            m.serialize_entry(&field.id, &field.value)?;
        }
        m.end()
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for item in &self.elements {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
