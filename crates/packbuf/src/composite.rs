// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The composite contract and the field walkers handed to it.
//!
//! A composite declares its fields once in [`Composite::schema`] and then
//! visits the same fields, in the same order, when it is encoded or
//! decoded. The walkers check every visit against the derived layout and
//! take care of padding, so an implementation only names its data fields.
//!
//! ```
//! use packbuf::{Composite, FieldDecoder, FieldEncoder, Schema};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Sample {
//!     flag: u8,
//!     value: u32,
//! }
//!
//! impl Composite for Sample {
//!     fn schema() -> Schema {
//!         Schema::builder("Sample")
//!             .field::<u8>("flag")
//!             .padding("_pad", 3)
//!             .field::<u32>("value")
//!             .build()
//!     }
//!
//!     fn encode_fields(&self, fields: &mut FieldEncoder<'_, '_>) -> packbuf::Result<()> {
//!         fields.field("flag", &self.flag)?;
//!         fields.field("value", &self.value)
//!     }
//!
//!     fn decode_fields(fields: &mut FieldDecoder<'_, '_>) -> packbuf::Result<Self> {
//!         Ok(Self {
//!             flag: fields.field("flag")?,
//!             value: fields.field("value")?,
//!         })
//!     }
//!
//!     fn populate_fields(&mut self, fields: &mut FieldDecoder<'_, '_>) -> packbuf::Result<()> {
//!         fields.field_into("flag", &mut self.flag)?;
//!         fields.field_into("value", &mut self.value)
//!     }
//! }
//!
//! assert_eq!(Sample::byte_size(), Ok(8));
//! ```

use crate::error::{Error, LayoutError, Result};
use crate::layout::{layout_of, FieldDescriptor, FieldKind, Schema, Shape, TypeLayout};
use crate::ser::{Cursor, CursorMut, Field};
use std::sync::Arc;

/// A fixed-layout aggregate value type.
pub trait Composite: Sized + 'static {
    /// Ordered field declarations.
    fn schema() -> Schema;

    /// Visit every data field in declaration order.
    fn encode_fields(&self, fields: &mut FieldEncoder<'_, '_>) -> Result<()>;

    /// Build a new value from every data field in declaration order.
    fn decode_fields(fields: &mut FieldDecoder<'_, '_>) -> Result<Self>;

    /// Overwrite every data field in declaration order.
    fn populate_fields(&mut self, fields: &mut FieldDecoder<'_, '_>) -> Result<()>;

    /// Cached layout of this type.
    fn layout() -> core::result::Result<Arc<TypeLayout>, LayoutError> {
        layout_of::<Self>()
    }

    /// Wire size in bytes.
    fn byte_size() -> core::result::Result<usize, LayoutError> {
        Self::layout().map(|layout| layout.total_size())
    }
}

fn shape_matches(desc: &FieldDescriptor, shape: &Shape) -> bool {
    match (&desc.kind, shape) {
        (FieldKind::Scalar(kind), Shape::Scalar(other))
        | (FieldKind::PrimitiveArray(kind), Shape::PrimitiveArray(other)) => kind == other,
        (FieldKind::CompositeArray(layout), Shape::CompositeArray(type_ref))
        | (FieldKind::NestedComposite(layout), Shape::Nested(type_ref)) => {
            layout.type_id() == type_ref.id()
        }
        (FieldKind::Padding, Shape::Padding) => true,
        _ => false,
    }
}

/// Position of a walker inside one layout.
struct Walk<'a> {
    layout: &'a TypeLayout,
    next: usize,
}

impl<'a> Walk<'a> {
    fn padding(&self) -> Option<&'a FieldDescriptor> {
        let layout: &'a TypeLayout = self.layout;
        layout.fields().get(self.next).filter(|desc| desc.is_padding())
    }

    fn take(&mut self, name: &'static str, shape: Shape) -> Result<&'a FieldDescriptor> {
        let layout: &'a TypeLayout = self.layout;
        let Some(desc) = layout.fields().get(self.next) else {
            return Err(Error::FieldMismatch {
                type_name: layout.type_name(),
                field: name,
                expected: "end of layout",
                found: shape.label(),
            });
        };
        if desc.name != name {
            return Err(Error::FieldMismatch {
                type_name: layout.type_name(),
                field: desc.name,
                expected: desc.name,
                found: name,
            });
        }
        if !shape_matches(desc, &shape) {
            return Err(Error::FieldMismatch {
                type_name: layout.type_name(),
                field: desc.name,
                expected: desc.kind.label(),
                found: shape.label(),
            });
        }
        self.next += 1;
        Ok(desc)
    }

    fn finish(&self) -> Result<()> {
        match self.layout.fields().get(self.next) {
            Some(desc) => Err(Error::FieldMismatch {
                type_name: self.layout.type_name(),
                field: desc.name,
                expected: desc.kind.label(),
                found: "nothing",
            }),
            None => Ok(()),
        }
    }
}

/// Writes the fields of one composite.
pub struct FieldEncoder<'a, 'b> {
    walk: Walk<'a>,
    cursor: &'a mut CursorMut<'b>,
}

impl<'a, 'b> FieldEncoder<'a, 'b> {
    pub(crate) fn new(layout: &'a TypeLayout, cursor: &'a mut CursorMut<'b>) -> Self {
        Self {
            walk: Walk { layout, next: 0 },
            cursor,
        }
    }

    fn pad_through(&mut self) -> Result<()> {
        while let Some(desc) = self.walk.padding() {
            self.cursor.pad(desc.byte_size())?;
            self.walk.next += 1;
        }
        Ok(())
    }

    /// Write the next declared field.
    pub fn field<F: Field>(&mut self, name: &'static str, value: &F) -> Result<()> {
        self.pad_through()?;
        let desc = self.walk.take(name, F::shape())?;
        value.encode(desc, self.cursor)
    }

    /// Write trailing padding and check that no field was left out.
    pub(crate) fn finish(mut self) -> Result<()> {
        self.pad_through()?;
        self.walk.finish()
    }
}

/// Reads the fields of one composite.
pub struct FieldDecoder<'a, 'b> {
    walk: Walk<'a>,
    cursor: &'a mut Cursor<'b>,
}

impl<'a, 'b> FieldDecoder<'a, 'b> {
    pub(crate) fn new(layout: &'a TypeLayout, cursor: &'a mut Cursor<'b>) -> Self {
        Self {
            walk: Walk { layout, next: 0 },
            cursor,
        }
    }

    fn skip_padding(&mut self) -> Result<()> {
        while let Some(desc) = self.walk.padding() {
            self.cursor.skip(desc.byte_size())?;
            self.walk.next += 1;
        }
        Ok(())
    }

    /// Read the next declared field as a new value.
    pub fn field<F: Field>(&mut self, name: &'static str) -> Result<F> {
        self.skip_padding()?;
        let desc = self.walk.take(name, F::shape())?;
        F::decode(desc, self.cursor)
    }

    /// Overwrite `target` with the next declared field.
    ///
    /// Read-only scalars are skipped and keep their value.
    pub fn field_into<F: Field>(&mut self, name: &'static str, target: &mut F) -> Result<()> {
        self.skip_padding()?;
        let desc = self.walk.take(name, F::shape())?;
        if desc.read_only && desc.is_scalar() {
            log::trace!(
                "[packbuf::ser] {}.{} is read-only, keeping stored value",
                self.walk.layout.type_name(),
                desc.name
            );
            return Ok(self.cursor.skip(desc.byte_size())?);
        }
        target.decode_in_place(desc, self.cursor)
    }

    /// Skip trailing padding and check that no field was left out.
    pub(crate) fn finish(mut self) -> Result<()> {
        self.skip_padding()?;
        self.walk.finish()
    }
}
