// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode and decode of composites against their cached layouts.
//!
//! Every top-level call runs one sequential pass over a single cursor:
//! - the buffer size is checked against the layout before any byte moves;
//! - fields are visited in declaration order;
//! - the consumed byte count is checked against the layout afterwards.
//!
//! On error the cursor is moved back to where the call started.

pub mod cursor;
mod decode;
mod encode;
mod field;
mod scalar;

pub use cursor::{Cursor, CursorError, CursorMut};
pub use decode::{create, populate};
pub use encode::write;
pub use field::{Element, ElementShape, Field, Padding};
pub use scalar::{Char16, Scalar};

use crate::error::{Error, Result};
use crate::layout::TypeLayout;

fn check_buffer_size(layout: &TypeLayout, remaining: usize, allow_trailing_bytes: bool) -> Result<()> {
    let expected = layout.total_size();
    if remaining < expected || (!allow_trailing_bytes && remaining != expected) {
        return Err(Error::WrongBufferSize {
            type_name: layout.type_name(),
            expected,
            given: remaining,
        });
    }
    Ok(())
}

fn check_consumed(layout: &TypeLayout, used: usize) -> Result<()> {
    if used != layout.total_size() {
        log::error!(
            "[packbuf::ser] {} consumed {} bytes, layout is {} bytes",
            layout.type_name(),
            used,
            layout.total_size()
        );
        return Err(Error::SerializationSizeMismatch {
            type_name: layout.type_name(),
            expected: layout.total_size(),
            used,
        });
    }
    Ok(())
}
