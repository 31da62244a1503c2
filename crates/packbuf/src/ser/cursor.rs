// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors over caller-owned buffers.
//!
//! A cursor pairs a borrowed byte slice with a position and a byte order.
//! The codec advances it monotonically; the buffer itself is never
//! reallocated or freed by the codec.

use crate::config::{ByteOrder, PADDING_FILL_BYTE};
use std::fmt;

/// Raw cursor overrun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorError {
    pub offset: usize,
    pub needed: usize,
    pub remaining: usize,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "access of {} bytes at offset {} overruns buffer ({} remaining)",
            self.needed, self.offset, self.remaining
        )
    }
}

impl std::error::Error for CursorError {}

pub type CursorResult<T> = core::result::Result<T, CursorError>;

/// Generate write methods for fixed-width integers in the cursor's byte order.
macro_rules! impl_write {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> CursorResult<()> {
            let bytes = match self.order {
                ByteOrder::Little => value.to_le_bytes(),
                ByteOrder::Big => value.to_be_bytes(),
                ByteOrder::Native => value.to_ne_bytes(),
            };
            self.write_bytes(&bytes)
        }
    };
}

/// Generate read methods for fixed-width integers in the cursor's byte order.
macro_rules! impl_read {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> CursorResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(match self.order {
                ByteOrder::Little => <$type>::from_le_bytes(bytes),
                ByteOrder::Big => <$type>::from_be_bytes(bytes),
                ByteOrder::Native => <$type>::from_ne_bytes(bytes),
            })
        }
    };
}

/// Methods shared by [`CursorMut`] and [`Cursor`].
macro_rules! impl_cursor_common {
    () => {
        pub fn offset(&self) -> usize {
            self.offset
        }

        pub fn remaining(&self) -> usize {
            self.buffer.len().saturating_sub(self.offset)
        }

        pub fn len(&self) -> usize {
            self.buffer.len()
        }

        pub fn is_empty(&self) -> bool {
            self.buffer.is_empty()
        }

        pub fn order(&self) -> ByteOrder {
            self.order
        }

        /// Move the cursor to an absolute offset (at most the buffer length).
        pub fn set_offset(&mut self, offset: usize) -> CursorResult<()> {
            if offset > self.buffer.len() {
                return Err(CursorError {
                    offset,
                    needed: offset - self.buffer.len(),
                    remaining: self.buffer.len(),
                });
            }
            self.offset = offset;
            Ok(())
        }

        /// Move back to an offset previously returned by [`Self::offset`].
        pub(crate) fn rewind(&mut self, offset: usize) {
            self.offset = offset.min(self.buffer.len());
        }

        fn check(&self, needed: usize) -> CursorResult<()> {
            if needed > self.remaining() {
                return Err(CursorError {
                    offset: self.offset,
                    needed,
                    remaining: self.remaining(),
                });
            }
            Ok(())
        }
    };
}

/// Mutable cursor for writing (bounds-checked).
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
    order: ByteOrder,
}

impl<'a> CursorMut<'a> {
    /// Cursor at offset 0 using the native byte order.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self::with_order(buffer, ByteOrder::Native)
    }

    pub fn with_order(buffer: &'a mut [u8], order: ByteOrder) -> Self {
        Self {
            buffer,
            offset: 0,
            order,
        }
    }

    impl_write!(write_u16, u16);
    impl_write!(write_u32, u32);
    impl_write!(write_u64, u64);

    pub fn write_u8(&mut self, value: u8) -> CursorResult<()> {
        self.write_bytes(&[value])
    }

    pub fn write_bool(&mut self, value: bool) -> CursorResult<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_f32(&mut self, value: f32) -> CursorResult<()> {
        self.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64) -> CursorResult<()> {
        self.write_u64(value.to_bits())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> CursorResult<()> {
        self.check(data.len())?;
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    /// Write `count` padding bytes.
    pub fn pad(&mut self, count: usize) -> CursorResult<()> {
        self.check(count)?;
        self.buffer[self.offset..self.offset + count].fill(PADDING_FILL_BYTE);
        self.offset += count;
        Ok(())
    }

    /// Bytes written so far (from the start of the buffer).
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    impl_cursor_common!();
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
    order: ByteOrder,
}

impl<'a> Cursor<'a> {
    /// Cursor at offset 0 using the native byte order.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_order(buffer, ByteOrder::Native)
    }

    pub fn with_order(buffer: &'a [u8], order: ByteOrder) -> Self {
        Self {
            buffer,
            offset: 0,
            order,
        }
    }

    impl_read!(read_u16, u16, 2);
    impl_read!(read_u32, u32, 4);
    impl_read!(read_u64, u64, 8);

    pub fn read_u8(&mut self) -> CursorResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Any non-zero byte decodes as `true`.
    pub fn read_bool(&mut self) -> CursorResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_f32(&mut self) -> CursorResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> CursorResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn read_bytes(&mut self, len: usize) -> CursorResult<&'a [u8]> {
        self.check(len)?;
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn skip(&mut self, len: usize) -> CursorResult<()> {
        self.check(len)?;
        self.offset += len;
        Ok(())
    }

    impl_cursor_common!();

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
