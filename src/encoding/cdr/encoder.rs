// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR encoder for writing CDR-encoded data.
//!
//! Implements classic (XCDR1) CDR as used by ROS 2 and plain OMG IDL
//! channels: a 4-byte encapsulation header, then primitives aligned to their
//! own size relative to the end of the header.

use super::CDR_HEADER_SIZE;
use crate::core::{FixtureError, Result};

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 64;

/// CDR encapsulation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum EncapsulationKind {
    /// CDR, Big Endian
    CdrBe = 0x00,
    /// CDR, Little Endian
    #[default]
    CdrLe = 0x01,
}

impl EncapsulationKind {
    /// Check if this encapsulation uses little endian byte order.
    #[must_use]
    pub const fn is_little_endian(self) -> bool {
        matches!(self, Self::CdrLe)
    }
}

/// CDR encoder.
///
/// Writes are infallible except where a length does not fit the 32-bit
/// length prefix CDR uses for strings and sequences.
///
/// # Example
///
/// ```
/// use robofixture::encoding::cdr::CdrEncoder;
///
/// let mut encoder = CdrEncoder::new();
/// encoder.int32(42);
/// encoder.string("hello").unwrap();
/// let data = encoder.finish();
/// assert_eq!(&data[..4], &[0x00, 0x01, 0x00, 0x00]);
/// ```
pub struct CdrEncoder {
    /// Output buffer, header included
    buffer: Vec<u8>,
    /// Origin offset for alignment calculation
    origin: usize,
    /// Whether to use little endian encoding
    little_endian: bool,
}

impl Default for CdrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrEncoder {
    /// Create a new encoder with default settings (CDR, little-endian).
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind(EncapsulationKind::default(), DEFAULT_CAPACITY)
    }

    /// Create a new encoder with the specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_kind(EncapsulationKind::default(), capacity)
    }

    /// Create a new encoder with the specified encapsulation kind.
    #[must_use]
    pub fn with_kind(kind: EncapsulationKind, capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(capacity.max(CDR_HEADER_SIZE));
        buffer.push(0); // Unused
        buffer.push(kind as u8);
        buffer.push(0); // Options
        buffer.push(0); // Options

        Self {
            buffer,
            origin: CDR_HEADER_SIZE,
            little_endian: kind.is_little_endian(),
        }
    }

    /// Get the current size of the encoded data, header included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the encoded data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder and return the encoded data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Pad with zeros up to a multiple of `size` relative to the origin.
    fn align(&mut self, size: usize) {
        let alignment = (self.buffer.len() - self.origin) % size;
        if alignment > 0 {
            self.buffer.resize(self.buffer.len() + size - alignment, 0);
        }
    }

    /// Write an 8-bit unsigned integer.
    pub fn uint8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    /// Write a 32-bit signed integer.
    pub fn int32(&mut self, value: i32) -> &mut Self {
        self.align(4);
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.buffer.extend_from_slice(&bytes);
        self
    }

    /// Write a 32-bit unsigned integer.
    pub fn uint32(&mut self, value: u32) -> &mut Self {
        self.align(4);
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.buffer.extend_from_slice(&bytes);
        self
    }

    /// Write a 64-bit double.
    pub fn float64(&mut self, value: f64) -> &mut Self {
        self.align(8);
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.buffer.extend_from_slice(&bytes);
        self
    }

    /// Write a string: length (including the null terminator), bytes, null.
    pub fn string(&mut self, value: &str) -> Result<&mut Self> {
        self.sequence_length(value.len() + 1)?;
        self.buffer.extend_from_slice(value.as_bytes());
        self.buffer.push(0);
        Ok(self)
    }

    /// Write a sequence length prefix.
    pub fn sequence_length(&mut self, len: usize) -> Result<&mut Self> {
        let len = u32::try_from(len).map_err(|_| {
            FixtureError::encode("CDR", format!("length {len} exceeds uint32 prefix"))
        })?;
        Ok(self.uint32(len))
    }

    /// Write a sequence of 64-bit doubles with its length prefix.
    pub fn float64_sequence(&mut self, values: &[f64]) -> Result<&mut Self> {
        self.sequence_length(values.len())?;
        for &v in values {
            self.float64(v);
        }
        Ok(self)
    }
}
