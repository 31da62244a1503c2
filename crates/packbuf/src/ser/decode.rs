// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{check_buffer_size, check_consumed};
use crate::composite::FieldDecoder;
use crate::error::Result;
use crate::layout::{layout_of, TypeLayout};
use crate::ser::cursor::Cursor;
use crate::Composite;

/// Build a new `T` from the bytes at the cursor position.
///
/// The value is returned only once every field decoded and the consumed
/// byte count matched the layout.
pub fn create<T: Composite>(cursor: &mut Cursor<'_>, allow_trailing_bytes: bool) -> Result<T> {
    let layout = layout_of::<T>()?;
    create_with(&layout, cursor, allow_trailing_bytes)
}

/// Overwrite the fields of `target` from the bytes at the cursor position.
///
/// Read-only scalars keep their value. Fields written before an error stay
/// written.
pub fn populate<T: Composite>(
    target: &mut T,
    cursor: &mut Cursor<'_>,
    allow_trailing_bytes: bool,
) -> Result<()> {
    let layout = layout_of::<T>()?;
    populate_with(target, &layout, cursor, allow_trailing_bytes)
}

pub(crate) fn create_with<T: Composite>(
    layout: &TypeLayout,
    cursor: &mut Cursor<'_>,
    allow_trailing_bytes: bool,
) -> Result<T> {
    check_buffer_size(layout, cursor.remaining(), allow_trailing_bytes)?;

    let start = cursor.offset();
    let result = decode_fields::<T>(layout, cursor).and_then(|value| {
        check_consumed(layout, cursor.offset() - start)?;
        Ok(value)
    });
    if result.is_err() {
        cursor.rewind(start);
    }
    result
}

pub(crate) fn populate_with<T: Composite>(
    target: &mut T,
    layout: &TypeLayout,
    cursor: &mut Cursor<'_>,
    allow_trailing_bytes: bool,
) -> Result<()> {
    check_buffer_size(layout, cursor.remaining(), allow_trailing_bytes)?;

    let start = cursor.offset();
    let result = populate_fields(target, layout, cursor)
        .and_then(|()| check_consumed(layout, cursor.offset() - start));
    if result.is_err() {
        cursor.rewind(start);
    }
    result
}

fn decode_fields<T: Composite>(layout: &TypeLayout, cursor: &mut Cursor<'_>) -> Result<T> {
    let mut fields = FieldDecoder::new(layout, cursor);
    let value = T::decode_fields(&mut fields)?;
    fields.finish()?;
    Ok(value)
}

fn populate_fields<T: Composite>(
    target: &mut T,
    layout: &TypeLayout,
    cursor: &mut Cursor<'_>,
) -> Result<()> {
    let mut fields = FieldDecoder::new(layout, cursor);
    target.populate_fields(&mut fields)?;
    fields.finish()
}
