// ABOUTME: Byte builder for hand-assembled TBinary test payloads.
// ABOUTME: Test-only; the crate itself has no encode path.

use crate::types::type_code;

/// Assembles wire bytes field by field.
#[derive(Debug, Default)]
pub(crate) struct Payload(Vec<u8>);

impl Payload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn i64(mut self, value: i64) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn field_header(mut self, code: u8, id: i16) -> Self {
        self.0.push(code);
        self.0.extend_from_slice(&id.to_be_bytes());
        self
    }

    pub(crate) fn list_header(mut self, element_code: u8, count: i32) -> Self {
        self.0.push(element_code);
        self.0.extend_from_slice(&count.to_be_bytes());
        self
    }

    pub(crate) fn i64_field(self, id: i16, value: i64) -> Self {
        self.field_header(type_code::I64, id).i64(value)
    }

    pub(crate) fn list_field(self, id: i16, element_code: u8, count: i32) -> Self {
        self.field_header(type_code::LIST, id)
            .list_header(element_code, count)
    }

    pub(crate) fn struct_field(self, id: i16) -> Self {
        self.field_header(type_code::STRUCT, id)
    }

    pub(crate) fn stop(mut self) -> Self {
        self.0.push(type_code::STOP);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.0
    }
}

#[test]
fn test_reference_payload_bytes() {
    let data = Payload::new()
        .i64_field(1, 1_234_567_890)
        .list_field(2, type_code::STRUCT, 2_000_000_000)
        .stop()
        .build();
    assert_eq!(
        data,
        [
            0x0a, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x49, 0x96, 0x02, 0xd2, 0x0f, 0x00, 0x02,
            0x0c, 0x77, 0x35, 0x94, 0x00, 0x00
        ]
    );
}
