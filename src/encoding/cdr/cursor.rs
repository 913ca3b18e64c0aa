// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR cursor for reading CDR-encoded data with proper alignment.

use crate::core::{FixtureError, Result};

/// Size of the CDR encapsulation header (4 bytes).
pub const CDR_HEADER_SIZE: usize = 4;

/// CDR cursor that tracks the read position.
///
/// Alignment is calculated as `(offset - origin) % size`, with the origin
/// at the end of the encapsulation header.
///
/// # Example
///
/// ```
/// use robofixture::encoding::cdr::CdrCursor;
///
/// let data = vec![0x00, 0x01, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00];
/// let mut cursor = CdrCursor::new(&data).unwrap();
/// assert_eq!(cursor.read_u32().unwrap(), 42);
/// ```
pub struct CdrCursor<'a> {
    /// The data buffer (includes CDR header)
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Origin offset for alignment calculation
    origin: usize,
    /// Whether the data uses little endian encoding
    little_endian: bool,
}

impl<'a> CdrCursor<'a> {
    /// Create a new CDR cursor from CDR-encoded data.
    ///
    /// The CDR header is 4 bytes:
    /// - Byte 0: Unused (always 0)
    /// - Byte 1: Encapsulation kind (endianness flag)
    /// - Bytes 2-3: Options (unused, set to 0)
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if data.len() < CDR_HEADER_SIZE {
            return Err(FixtureError::decode(
                "CDR",
                format!(
                    "Invalid CDR data size {}, must contain at least a 4-byte header",
                    data.len()
                ),
            ));
        }

        Ok(Self {
            data,
            offset: CDR_HEADER_SIZE,
            origin: CDR_HEADER_SIZE,
            little_endian: data[1] & 0x01 == 0x01,
        })
    }

    /// Get the current position relative to the data start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Align to the specified boundary, relative to the origin.
    pub fn align(&mut self, size: usize) -> Result<()> {
        let alignment = (self.offset - self.origin) % size;
        if alignment > 0 {
            self.take(size - alignment)?;
        }
        Ok(())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(FixtureError::buffer_too_short(
                count,
                self.remaining(),
                self.offset,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.align(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.take(N)?);
        Ok(bytes)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take_array::<4>()?;
        Ok(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.take_array::<8>()?;
        Ok(if self.little_endian {
            f64::from_le_bytes(bytes)
        } else {
            f64::from_be_bytes(bytes)
        })
    }

    /// Read a sequence length, checked against the bytes left.
    ///
    /// `min_element_size` is the smallest encoded size of one element.
    pub fn read_sequence_length(&mut self, min_element_size: usize) -> Result<usize> {
        let len = self.read_u32()? as usize;
        if len.saturating_mul(min_element_size) > self.remaining() {
            return Err(FixtureError::buffer_too_short(
                len.saturating_mul(min_element_size),
                self.remaining(),
                self.offset,
            ));
        }
        Ok(len)
    }

    /// Read a null-terminated, length-prefixed string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_sequence_length(1)?;
        let bytes = self.take(len)?;
        let text = match bytes.split_last() {
            Some((0, text)) => text,
            _ => {
                return Err(FixtureError::decode(
                    "CDR",
                    format!("string at {} is not null-terminated", self.offset - len),
                ))
            }
        };
        String::from_utf8(text.to_vec()).map_err(|e| FixtureError::decode("CDR", e.to_string()))
    }

    /// Read a length-prefixed sequence of f64 values.
    pub fn read_f64_sequence(&mut self) -> Result<Vec<f64>> {
        let len = self.read_sequence_length(8)?;
        (0..len).map(|_| self.read_f64()).collect()
    }
}
