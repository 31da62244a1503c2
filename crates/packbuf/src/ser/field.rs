// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-field codecs.
//!
//! [`Field`] connects a Rust field type to its [`Shape`] and to the bytes of
//! one [`FieldDescriptor`]. Implementations exist for every scalar, for
//! every [`Composite`] (inlined), for `[T; N]` and `Vec<T>` of any
//! [`Element`], and for the [`Padding`] marker.

use crate::error::{Error, Result};
use crate::layout::{FieldDescriptor, PrimitiveKind, Shape, TypeLayout, TypeRef};
use crate::ser::cursor::{Cursor, CursorMut};
use crate::ser::scalar::{Char16, Scalar};
use crate::ser::{decode, encode};
use crate::Composite;
use std::sync::Arc;

/// Codec of one field.
pub trait Field: Sized {
    fn shape() -> Shape;

    /// Element count implied by the type itself (`N` for `[T; N]`).
    fn declared_length() -> Option<usize> {
        None
    }

    fn encode(&self, desc: &FieldDescriptor, cursor: &mut CursorMut<'_>) -> Result<()>;

    fn decode(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Self>;

    /// Overwrite `self` with the field's bytes.
    fn decode_in_place(&mut self, desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<()>;
}

/// Shape of one array element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementShape {
    Primitive(PrimitiveKind),
    Composite(TypeRef),
}

impl ElementShape {
    fn array(self) -> Shape {
        match self {
            Self::Primitive(kind) => Shape::PrimitiveArray(kind),
            Self::Composite(type_ref) => Shape::CompositeArray(type_ref),
        }
    }
}

/// Array element codec.
pub trait Element: Sized {
    fn element_shape() -> ElementShape;

    fn write_elements(items: &[Self], desc: &FieldDescriptor, cursor: &mut CursorMut<'_>)
        -> Result<()>;

    /// Overwrite every element of `items`.
    fn read_elements(
        items: &mut [Self],
        desc: &FieldDescriptor,
        cursor: &mut Cursor<'_>,
    ) -> Result<()>;

    /// Read `desc.length` new elements.
    fn read_vec(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Vec<Self>>;
}

/// Marker for a padding field.
///
/// Carries no data: padding is described by the schema and its bytes are
/// zero-filled on encode and skipped on decode. [`FieldEncoder`] and
/// [`FieldDecoder`] consume padding on their own, so composites never visit
/// it; naming a padding field in a visitor is a
/// [`FieldMismatch`](Error::FieldMismatch).
///
/// [`FieldEncoder`]: crate::FieldEncoder
/// [`FieldDecoder`]: crate::FieldDecoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Padding;

// Used for its shape in schemas. The codec bodies serve direct calls only.
impl Field for Padding {
    fn shape() -> Shape {
        Shape::Padding
    }

    fn encode(&self, desc: &FieldDescriptor, cursor: &mut CursorMut<'_>) -> Result<()> {
        Ok(cursor.pad(desc.byte_size())?)
    }

    fn decode(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.skip(desc.byte_size())?;
        Ok(Self)
    }

    fn decode_in_place(&mut self, desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<()> {
        Ok(cursor.skip(desc.byte_size())?)
    }
}

macro_rules! impl_scalar_field {
    ($($type:ty),* $(,)?) => {
        $(
            impl Field for $type {
                fn shape() -> Shape {
                    Shape::Scalar(<$type as Scalar>::KIND)
                }

                fn encode(&self, _desc: &FieldDescriptor, cursor: &mut CursorMut<'_>) -> Result<()> {
                    Ok(self.write_to(cursor)?)
                }

                fn decode(_desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Self> {
                    Ok(<$type as Scalar>::read_from(cursor)?)
                }

                fn decode_in_place(
                    &mut self,
                    _desc: &FieldDescriptor,
                    cursor: &mut Cursor<'_>,
                ) -> Result<()> {
                    *self = <$type as Scalar>::read_from(cursor)?;
                    Ok(())
                }
            }

            impl Element for $type {
                fn element_shape() -> ElementShape {
                    ElementShape::Primitive(<$type as Scalar>::KIND)
                }

                fn write_elements(
                    items: &[Self],
                    _desc: &FieldDescriptor,
                    cursor: &mut CursorMut<'_>,
                ) -> Result<()> {
                    Ok(<$type as Scalar>::write_slice(items, cursor)?)
                }

                fn read_elements(
                    items: &mut [Self],
                    _desc: &FieldDescriptor,
                    cursor: &mut Cursor<'_>,
                ) -> Result<()> {
                    Ok(<$type as Scalar>::read_into(items, cursor)?)
                }

                fn read_vec(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Vec<Self>> {
                    let mut items = vec![<$type>::default(); desc.length];
                    <$type as Scalar>::read_into(&mut items, cursor)?;
                    Ok(items)
                }
            }
        )*
    };
}

impl_scalar_field!(bool, u8, u16, u32, u64, f32, f64, Char16);

/// Nested layout carried by a composite descriptor.
fn nested_layout<C: Composite>(desc: &FieldDescriptor) -> Result<&Arc<TypeLayout>> {
    desc.nested().ok_or(Error::FieldMismatch {
        type_name: std::any::type_name::<C>(),
        field: desc.name,
        expected: desc.kind.label(),
        found: "nested composite",
    })
}

impl<C: Composite> Field for C {
    fn shape() -> Shape {
        Shape::Nested(TypeRef::of::<C>())
    }

    fn encode(&self, desc: &FieldDescriptor, cursor: &mut CursorMut<'_>) -> Result<()> {
        encode::write_with(self, nested_layout::<C>(desc)?, cursor, true)
    }

    fn decode(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Self> {
        decode::create_with(nested_layout::<C>(desc)?, cursor, true)
    }

    fn decode_in_place(&mut self, desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<()> {
        decode::populate_with(self, nested_layout::<C>(desc)?, cursor, true)
    }
}

impl<C: Composite> Element for C {
    fn element_shape() -> ElementShape {
        ElementShape::Composite(TypeRef::of::<C>())
    }

    fn write_elements(
        items: &[Self],
        desc: &FieldDescriptor,
        cursor: &mut CursorMut<'_>,
    ) -> Result<()> {
        let layout = nested_layout::<C>(desc)?;
        for item in items {
            encode::write_with(item, layout, cursor, true)?;
        }
        Ok(())
    }

    // Each element is populated in place, so its read-only scalars survive.
    fn read_elements(
        items: &mut [Self],
        desc: &FieldDescriptor,
        cursor: &mut Cursor<'_>,
    ) -> Result<()> {
        let layout = nested_layout::<C>(desc)?;
        for item in items.iter_mut() {
            decode::populate_with(item, layout, cursor, true)?;
        }
        Ok(())
    }

    fn read_vec(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Vec<Self>> {
        let layout = nested_layout::<C>(desc)?;
        (0..desc.length)
            .map(|_| decode::create_with(layout, cursor, true))
            .collect()
    }
}

fn check_length(desc: &FieldDescriptor, length: usize) -> Result<()> {
    if desc.length != length {
        return Err(Error::InvalidState {
            field: desc.name,
            expected_length: desc.length,
            length,
        });
    }
    Ok(())
}

impl<T: Element, const N: usize> Field for [T; N] {
    fn shape() -> Shape {
        T::element_shape().array()
    }

    fn declared_length() -> Option<usize> {
        Some(N)
    }

    fn encode(&self, desc: &FieldDescriptor, cursor: &mut CursorMut<'_>) -> Result<()> {
        check_length(desc, N)?;
        T::write_elements(self, desc, cursor)
    }

    fn decode(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Self> {
        check_length(desc, N)?;
        T::read_vec(desc, cursor)?
            .try_into()
            .map_err(|items: Vec<T>| Error::InvalidState {
                field: desc.name,
                expected_length: N,
                length: items.len(),
            })
    }

    fn decode_in_place(&mut self, desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<()> {
        check_length(desc, N)?;
        T::read_elements(self, desc, cursor)
    }
}

impl<T: Element> Field for Vec<T> {
    fn shape() -> Shape {
        T::element_shape().array()
    }

    fn encode(&self, desc: &FieldDescriptor, cursor: &mut CursorMut<'_>) -> Result<()> {
        check_length(desc, self.len())?;
        T::write_elements(self, desc, cursor)
    }

    fn decode(desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<Self> {
        T::read_vec(desc, cursor)
    }

    fn decode_in_place(&mut self, desc: &FieldDescriptor, cursor: &mut Cursor<'_>) -> Result<()> {
        check_length(desc, self.len())?;
        T::read_elements(self, desc, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldKind;

    fn array_desc(kind: PrimitiveKind, length: usize) -> FieldDescriptor {
        FieldDescriptor {
            name: "values",
            kind: FieldKind::PrimitiveArray(kind),
            element_size: kind.size(),
            length,
            read_only: false,
        }
    }

    #[test]
    fn test_fixed_array_length_mismatch_reads_nothing() {
        let desc = array_desc(PrimitiveKind::U32, 5);
        let buffer = [0u8; 20];
        let mut cursor = Cursor::new(&buffer);

        let err = <[u32; 4]>::decode(&desc, &mut cursor).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidState {
                field: "values",
                expected_length: 5,
                length: 4
            }
        );
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_vec_decode_allocates_declared_length() {
        let desc = array_desc(PrimitiveKind::U16, 3);
        let buffer = [1u8, 0, 2, 0, 3, 0];
        let mut cursor = Cursor::with_order(&buffer, crate::config::ByteOrder::Little);

        let values = Vec::<u16>::decode(&desc, &mut cursor).expect("Decode should succeed");
        assert_eq!(values, vec![1, 2, 3]);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_vec_populate_rejects_wrong_length() {
        let desc = array_desc(PrimitiveKind::U8, 5);
        let buffer = [0u8; 5];
        let mut cursor = Cursor::new(&buffer);
        let mut values = vec![9u8; 4];

        let err = values.decode_in_place(&desc, &mut cursor).unwrap_err();
        assert!(matches!(err, Error::InvalidState { length: 4, .. }));
        assert_eq!(values, vec![9u8; 4]);
    }

    #[test]
    fn test_padding_field_zero_fills() {
        let desc = FieldDescriptor {
            name: "_pad",
            kind: FieldKind::Padding,
            element_size: 3,
            length: 1,
            read_only: false,
        };
        let mut buffer = [0xEEu8; 3];
        let mut cursor = CursorMut::new(&mut buffer);
        Padding.encode(&desc, &mut cursor).expect("Pad should succeed");
        assert_eq!(buffer, [0, 0, 0]);
    }

    #[test]
    fn test_shapes_of_field_types() {
        assert_eq!(bool::shape(), Shape::Scalar(PrimitiveKind::Bool));
        assert_eq!(<[f32; 9]>::shape(), Shape::PrimitiveArray(PrimitiveKind::F32));
        assert_eq!(<[f32; 9]>::declared_length(), Some(9));
        assert_eq!(Vec::<u8>::declared_length(), None);
        assert_eq!(Padding::shape(), Shape::Padding);
    }
}
