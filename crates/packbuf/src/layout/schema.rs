// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field schemas: the declarations a layout is derived from.
//!
//! A [`Schema`] is the ordered list of field declarations of one composite
//! type. It is produced by [`Composite::schema`](crate::Composite::schema),
//! either written by hand with [`SchemaBuilder`] or generated by
//! `#[derive(Composite)]`.
//!
//! ```
//! use packbuf::{Char16, Schema};
//!
//! let schema = Schema::builder("Header")
//!     .field::<u32>("mode")
//!     .field::<[Char16; 9]>("ok_text")
//!     .padding("_pad0", 2)
//!     .build();
//! assert_eq!(schema.fields().len(), 3);
//! ```

use crate::error::LayoutError;
use crate::layout::{layout_of, PrimitiveKind, TypeLayout};
use crate::ser::Field;
use crate::Composite;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Reference to a composite type used as a field.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    rust_name: &'static str,
    layout: fn() -> Result<Arc<TypeLayout>, LayoutError>,
}

impl TypeRef {
    pub fn of<C: Composite>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            rust_name: std::any::type_name::<C>(),
            layout: layout_of::<C>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Rust path of the referenced type.
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    /// Derive (or fetch the cached) layout of the referenced type.
    pub fn layout(&self) -> Result<Arc<TypeLayout>, LayoutError> {
        (self.layout)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.rust_name).finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Shape of a field's Rust type, before lengths are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Scalar(PrimitiveKind),
    PrimitiveArray(PrimitiveKind),
    CompositeArray(TypeRef),
    Nested(TypeRef),
    Padding,
}

impl Shape {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::PrimitiveArray(_) => "primitive array",
            Self::CompositeArray(_) => "composite array",
            Self::Nested(_) => "nested composite",
            Self::Padding => "padding",
        }
    }
}

/// Declaration of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub(crate) name: &'static str,
    pub(crate) shape: Shape,
    pub(crate) length: Option<usize>,
    pub(crate) padding: Option<usize>,
    pub(crate) read_only: bool,
}

impl FieldDecl {
    /// Declare a field of Rust type `F`.
    ///
    /// Fixed arrays `[T; N]` declare length `N`; other array containers
    /// need [`FieldDecl::length`].
    pub fn of<F: Field>(name: &'static str) -> Self {
        Self {
            name,
            shape: F::shape(),
            length: F::declared_length(),
            padding: None,
            read_only: false,
        }
    }

    /// Declare `bytes` bytes of padding.
    pub fn padding(name: &'static str, bytes: usize) -> Self {
        Self {
            name,
            shape: Shape::Padding,
            length: None,
            padding: Some(bytes),
            read_only: false,
        }
    }

    /// Override the declared element count of an array field.
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Mark a scalar field as not settable by populate.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Ordered field declarations of one composite type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    type_name: &'static str,
    fields: Vec<FieldDecl>,
}

impl Schema {
    pub fn builder(type_name: &'static str) -> SchemaBuilder {
        SchemaBuilder::new(type_name)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

/// Builder for [`Schema`], one call per field in declaration order.
#[derive(Debug)]
pub struct SchemaBuilder {
    type_name: &'static str,
    fields: Vec<FieldDecl>,
}

impl SchemaBuilder {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Add a field of Rust type `F`.
    pub fn field<F: Field>(self, name: &'static str) -> Self {
        self.decl(FieldDecl::of::<F>(name))
    }

    /// Add an array field with an explicit element count.
    pub fn array<F: Field>(self, name: &'static str, length: usize) -> Self {
        self.decl(FieldDecl::of::<F>(name).length(length))
    }

    /// Add a read-only field.
    pub fn read_only_field<F: Field>(self, name: &'static str) -> Self {
        self.decl(FieldDecl::of::<F>(name).read_only())
    }

    /// Add `bytes` bytes of padding.
    pub fn padding(self, name: &'static str, bytes: usize) -> Self {
        self.decl(FieldDecl::padding(name, bytes))
    }

    /// Add a prepared declaration.
    pub fn decl(mut self, decl: FieldDecl) -> Self {
        self.fields.push(decl);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            type_name: self.type_name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::Padding;
    use crate::Char16;

    #[test]
    fn test_fixed_array_declares_its_length() {
        let decl = FieldDecl::of::<[u32; 8]>("separate_text_pos");
        assert_eq!(decl.shape, Shape::PrimitiveArray(PrimitiveKind::U32));
        assert_eq!(decl.length, Some(8));
    }

    #[test]
    fn test_vec_array_needs_explicit_length() {
        let decl = FieldDecl::of::<Vec<Char16>>("text");
        assert_eq!(decl.shape, Shape::PrimitiveArray(PrimitiveKind::Char16));
        assert_eq!(decl.length, None);
        assert_eq!(decl.length(0x41).length, Some(0x41));
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let schema = Schema::builder("Ordered")
            .field::<u8>("flag")
            .padding("_pad", 3)
            .read_only_field::<u32>("value")
            .field::<Padding>("unsized")
            .build();
        let names: Vec<_> = schema.fields().iter().map(FieldDecl::name).collect();
        assert_eq!(names, ["flag", "_pad", "value", "unsized"]);
        assert!(schema.fields()[2].read_only);
        assert_eq!(schema.fields()[3].padding, None);
    }
}
