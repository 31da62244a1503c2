// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive values and their fixed-width byte form.

use crate::layout::PrimitiveKind;
use crate::ser::cursor::{Cursor, CursorMut, CursorResult};
use std::fmt;

/// One UTF-16 code unit.
///
/// Native text fields are arrays of 16-bit units, so Rust's 32-bit `char`
/// cannot be used directly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Char16(pub u16);

impl Char16 {
    pub const NUL: Self = Self(0);

    /// Code unit of a BMP character, `None` for characters that need a
    /// surrogate pair.
    pub fn from_char(c: char) -> Option<Self> {
        u16::try_from(u32::from(c)).ok().map(Self)
    }

    /// The character this unit encodes, `None` for lone surrogates.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }

    pub fn is_nul(self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for Char16 {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Char16> for u16 {
    fn from(value: Char16) -> Self {
        value.0
    }
}

impl fmt::Debug for Char16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(c) if !c.is_control() => write!(f, "'{}'", c),
            _ => write!(f, "\\u{{{:04X}}}", self.0),
        }
    }
}

/// A primitive with a fixed-width wire form.
pub trait Scalar: Copy + Default + 'static {
    const KIND: PrimitiveKind;

    fn write_to(self, cursor: &mut CursorMut<'_>) -> CursorResult<()>;

    fn read_from(cursor: &mut Cursor<'_>) -> CursorResult<Self>;

    /// Bulk-write contiguous elements.
    fn write_slice(values: &[Self], cursor: &mut CursorMut<'_>) -> CursorResult<()> {
        for value in values {
            value.write_to(cursor)?;
        }
        Ok(())
    }

    /// Bulk-read into existing elements.
    fn read_into(values: &mut [Self], cursor: &mut Cursor<'_>) -> CursorResult<()> {
        for value in values.iter_mut() {
            *value = Self::read_from(cursor)?;
        }
        Ok(())
    }
}

macro_rules! impl_scalar {
    ($type:ty, $kind:ident, $write:ident, $read:ident) => {
        impl Scalar for $type {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            fn write_to(self, cursor: &mut CursorMut<'_>) -> CursorResult<()> {
                cursor.$write(self)
            }

            fn read_from(cursor: &mut Cursor<'_>) -> CursorResult<Self> {
                cursor.$read()
            }
        }
    };
}

impl_scalar!(bool, Bool, write_bool, read_bool);
impl_scalar!(u16, U16, write_u16, read_u16);
impl_scalar!(u32, U32, write_u32, read_u32);
impl_scalar!(u64, U64, write_u64, read_u64);
impl_scalar!(f32, F32, write_f32, read_f32);
impl_scalar!(f64, F64, write_f64, read_f64);

// Byte arrays copy in one go.
impl Scalar for u8 {
    const KIND: PrimitiveKind = PrimitiveKind::U8;

    fn write_to(self, cursor: &mut CursorMut<'_>) -> CursorResult<()> {
        cursor.write_u8(self)
    }

    fn read_from(cursor: &mut Cursor<'_>) -> CursorResult<Self> {
        cursor.read_u8()
    }

    fn write_slice(values: &[Self], cursor: &mut CursorMut<'_>) -> CursorResult<()> {
        cursor.write_bytes(values)
    }

    fn read_into(values: &mut [Self], cursor: &mut Cursor<'_>) -> CursorResult<()> {
        values.copy_from_slice(cursor.read_bytes(values.len())?);
        Ok(())
    }
}

impl Scalar for Char16 {
    const KIND: PrimitiveKind = PrimitiveKind::Char16;

    fn write_to(self, cursor: &mut CursorMut<'_>) -> CursorResult<()> {
        cursor.write_u16(self.0)
    }

    fn read_from(cursor: &mut Cursor<'_>) -> CursorResult<Self> {
        cursor.read_u16().map(Self)
    }
}
