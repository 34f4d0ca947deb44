// ABOUTME: Bounded big-endian primitive reader over a borrowed byte slice.
// ABOUTME: Reads are all-or-nothing, so the position is also the count of bytes consumed.

use crate::error::{Error, Result};

/// Read position over one message's bytes.
///
/// A cursor belongs to exactly one decode operation. A failed read returns
/// [`Error::UnexpectedEndOfData`] and leaves the position untouched; callers
/// treat the failure as terminal for that decode.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline]
    #[must_use]
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The unread bytes.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read exactly `N` bytes.
    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos.checked_add(N).ok_or(Error::UnexpectedEndOfData)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(Error::UnexpectedEndOfData)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }
}
