// ABOUTME: Unit tests for the value module.
// ABOUTME: Tests accessors, struct field lookup, and JSON rendering through serde.

use crate::types::WireType;
use crate::value::{List, Struct, Value};
use serde_json::json;

fn sample() -> Struct {
    let mut inner = Struct::new();
    inner.push(1, Value::I64(-5));

    let mut list = List::new(WireType::Struct);
    list.elements.push(inner.into());
    list.elements.push(Struct::new().into());

    let mut outer = Struct::new();
    outer.push(1, 1_234_567_890i64.into());
    outer.push(2, list.into());
    outer
}

#[test]
fn test_value_accessors() {
    assert_eq!(Value::I64(42).as_i64(), Some(42));
    assert!(Value::I64(42).as_list().is_none());
    assert!(Value::Struct(Struct::new()).as_struct().is_some());
    let empty = Value::List(List::new(WireType::Int64));
    assert_eq!(empty.as_list().map(List::len), Some(0));
    assert!(empty.as_i64().is_none());
}

#[test]
fn test_struct_lookup() {
    let s = sample();
    assert_eq!(s.len(), 2);
    assert_eq!(s.get(1).and_then(Value::as_i64), Some(1_234_567_890));

    let list = s.get(2).and_then(Value::as_list).unwrap();
    assert_eq!(list.element_type, WireType::Struct);
    assert_eq!(list.len(), 2);
    assert!(list.get(1).and_then(Value::as_struct).unwrap().is_empty());
    assert!(s.get(3).is_none());
}

#[test]
fn test_duplicate_ids_keep_wire_order() {
    let mut s = Struct::new();
    s.push(7, Value::I64(1));
    s.push(7, Value::I64(2));
    assert_eq!(s.len(), 2);
    assert_eq!(s.get(7).and_then(Value::as_i64), Some(1));
}

#[test]
fn test_json_rendering() {
    let rendered = serde_json::to_value(sample()).unwrap();
    assert_eq!(rendered, json!({"1": 1_234_567_890, "2": [{"1": -5}, {}]}));
}
