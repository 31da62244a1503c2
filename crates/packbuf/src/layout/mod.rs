// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type layouts: the byte mapping of a composite type.
//!
//! A [`TypeLayout`] is derived once per type from its [`Schema`] by
//! [`layout_of`] and cached for the life of the process. Offsets are
//! implicit: each field starts where the previous one ends, and the only
//! gaps are explicit padding fields.

mod calculator;
mod schema;

pub use calculator::{layout_of, LayoutCacheStats};
pub use schema::{FieldDecl, Schema, SchemaBuilder, Shape, TypeRef};

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// UTF-16 code unit.
    Char16,
}

impl PrimitiveKind {
    /// Size in bytes on the wire.
    pub const fn size(self) -> usize {
        match self {
            Self::Bool | Self::U8 => 1,
            Self::U16 | Self::Char16 => 2,
            Self::U32 | Self::F32 => 4,
            Self::U64 | Self::F64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char16 => "char16",
        }
    }
}

/// Field kind of a laid-out field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(PrimitiveKind),
    PrimitiveArray(PrimitiveKind),
    CompositeArray(Arc<TypeLayout>),
    NestedComposite(Arc<TypeLayout>),
    Padding,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::PrimitiveArray(_) => "primitive array",
            Self::CompositeArray(_) => "composite array",
            Self::NestedComposite(_) => "nested composite",
            Self::Padding => "padding",
        }
    }
}

/// One field of a [`TypeLayout`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Bytes per element (the whole byte count for padding).
    pub element_size: usize,
    /// Element count, 1 for scalars, nested composites and padding.
    pub length: usize,
    /// Populate leaves read-only scalar fields untouched.
    pub read_only: bool,
}

impl FieldDescriptor {
    /// Bytes this field occupies on the wire.
    pub fn byte_size(&self) -> usize {
        self.element_size * self.length
    }

    /// Layout of the nested type for composite kinds.
    pub fn nested(&self) -> Option<&Arc<TypeLayout>> {
        match &self.kind {
            FieldKind::CompositeArray(layout) | FieldKind::NestedComposite(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn is_padding(&self) -> bool {
        matches!(self.kind, FieldKind::Padding)
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::PrimitiveArray(_) | FieldKind::CompositeArray(_)
        )
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, FieldKind::Scalar(_))
    }

    fn type_label(&self) -> String {
        match &self.kind {
            FieldKind::Scalar(kind) => kind.name().to_string(),
            FieldKind::PrimitiveArray(kind) => format!("[{}; {}]", kind.name(), self.length),
            FieldKind::CompositeArray(layout) => {
                format!("[{}; {}]", layout.type_name(), self.length)
            }
            FieldKind::NestedComposite(layout) => layout.type_name().to_string(),
            FieldKind::Padding => format!("padding({})", self.element_size),
        }
    }
}

/// Byte layout of a composite type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeLayout {
    type_id: TypeId,
    type_name: &'static str,
    total_size: usize,
    fields: Vec<FieldDescriptor>,
}

impl TypeLayout {
    pub(crate) fn new(type_id: TypeId, type_name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        let total_size = fields.iter().map(FieldDescriptor::byte_size).sum();
        Self {
            type_id,
            type_name,
            total_size,
            fields,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Exact wire size in bytes.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// `(offset, field)` pairs in declaration order.
    pub fn offsets(&self) -> impl Iterator<Item = (usize, &FieldDescriptor)> + '_ {
        self.fields.iter().scan(0usize, |offset, field| {
            let start = *offset;
            *offset += field.byte_size();
            Some((start, field))
        })
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.offsets()
            .find(|(_, field)| field.name == name)
            .map(|(offset, _)| offset)
    }
}

/// Renders the layout as a field table.
impl fmt::Display for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} bytes, 0x{:X})",
            self.type_name, self.total_size, self.total_size
        )?;
        writeln!(f, "  {:>6}  {:>6}  {:<28} type", "offset", "size", "field")?;
        for (offset, field) in self.offsets() {
            let flag = if field.read_only { " (read-only)" } else { "" };
            writeln!(
                f,
                "  0x{:04X}  {:>6}  {:<28} {}{}",
                offset,
                field.byte_size(),
                field.name,
                field.type_label(),
                flag
            )?;
        }
        Ok(())
    }
}
