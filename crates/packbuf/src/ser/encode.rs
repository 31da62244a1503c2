// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{check_buffer_size, check_consumed};
use crate::composite::FieldEncoder;
use crate::error::Result;
use crate::layout::{layout_of, TypeLayout};
use crate::ser::cursor::CursorMut;
use crate::Composite;

/// Write `value` at the cursor position.
///
/// With `allow_trailing_bytes == false` the remaining buffer must be exactly
/// the layout size; otherwise it may be larger and the extra bytes are left
/// untouched.
pub fn write<T: Composite>(
    value: &T,
    cursor: &mut CursorMut<'_>,
    allow_trailing_bytes: bool,
) -> Result<()> {
    let layout = layout_of::<T>()?;
    write_with(value, &layout, cursor, allow_trailing_bytes)
}

pub(crate) fn write_with<T: Composite>(
    value: &T,
    layout: &TypeLayout,
    cursor: &mut CursorMut<'_>,
    allow_trailing_bytes: bool,
) -> Result<()> {
    check_buffer_size(layout, cursor.remaining(), allow_trailing_bytes)?;

    let start = cursor.offset();
    let result = encode_fields(value, layout, cursor)
        .and_then(|()| check_consumed(layout, cursor.offset() - start));
    if result.is_err() {
        cursor.rewind(start);
    }
    result
}

fn encode_fields<T: Composite>(
    value: &T,
    layout: &TypeLayout,
    cursor: &mut CursorMut<'_>,
) -> Result<()> {
    let mut fields = FieldEncoder::new(layout, cursor);
    value.encode_fields(&mut fields)?;
    fields.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ByteOrder;
    use crate::error::Error;
    use crate::ser::Padding;
    use crate::{FieldDecoder, Schema};

    #[derive(Debug, Default)]
    struct Pair {
        a: u16,
        b: u16,
    }

    impl Composite for Pair {
        fn schema() -> Schema {
            Schema::builder("Pair")
                .field::<u16>("a")
                .padding("_pad", 2)
                .field::<u16>("b")
                .build()
        }

        fn encode_fields(&self, fields: &mut FieldEncoder<'_, '_>) -> Result<()> {
            fields.field("a", &self.a)?;
            fields.field("b", &self.b)
        }

        fn decode_fields(fields: &mut FieldDecoder<'_, '_>) -> Result<Self> {
            Ok(Self {
                a: fields.field("a")?,
                b: fields.field("b")?,
            })
        }

        fn populate_fields(&mut self, fields: &mut FieldDecoder<'_, '_>) -> Result<()> {
            fields.field_into("a", &mut self.a)?;
            fields.field_into("b", &mut self.b)
        }
    }

    /// Writes only its first field.
    struct Truncated;

    impl Composite for Truncated {
        fn schema() -> Schema {
            Schema::builder("Truncated")
                .field::<u8>("first")
                .field::<u8>("second")
                .build()
        }

        fn encode_fields(&self, fields: &mut FieldEncoder<'_, '_>) -> Result<()> {
            fields.field("first", &1u8)
        }

        fn decode_fields(fields: &mut FieldDecoder<'_, '_>) -> Result<Self> {
            let _: u8 = fields.field("first")?;
            Ok(Self)
        }

        fn populate_fields(&mut self, fields: &mut FieldDecoder<'_, '_>) -> Result<()> {
            let mut first = 0u8;
            fields.field_into("first", &mut first)
        }
    }

    /// Visits its padding field by hand.
    #[derive(Default)]
    struct VisitsPadding(Pair);

    impl Composite for VisitsPadding {
        fn schema() -> Schema {
            Pair::schema()
        }

        fn encode_fields(&self, fields: &mut FieldEncoder<'_, '_>) -> Result<()> {
            fields.field("a", &self.0.a)?;
            fields.field("_pad", &Padding)?;
            fields.field("b", &self.0.b)
        }

        fn decode_fields(fields: &mut FieldDecoder<'_, '_>) -> Result<Self> {
            Pair::decode_fields(fields).map(Self)
        }

        fn populate_fields(&mut self, fields: &mut FieldDecoder<'_, '_>) -> Result<()> {
            self.0.populate_fields(fields)
        }
    }

    #[test]
    fn test_write_fills_padding_and_fields() {
        let mut buffer = [0xFFu8; 6];
        let mut cursor = CursorMut::with_order(&mut buffer, ByteOrder::Little);
        write(&Pair { a: 0x0102, b: 0x0304 }, &mut cursor, false).expect("Write should succeed");
        assert_eq!(cursor.offset(), 6);
        assert_eq!(buffer, [0x02, 0x01, 0x00, 0x00, 0x04, 0x03]);
    }

    #[test]
    fn test_write_short_buffer_touches_nothing() {
        let mut buffer = [0xFFu8; 5];
        let mut cursor = CursorMut::new(&mut buffer);
        let err = write(&Pair::default(), &mut cursor, true).unwrap_err();
        assert_eq!(
            err,
            Error::WrongBufferSize {
                type_name: "Pair",
                expected: 6,
                given: 5
            }
        );
        assert_eq!(cursor.offset(), 0);
        assert_eq!(buffer, [0xFF; 5]);
    }

    #[test]
    fn test_write_exact_size_required_without_trailing() {
        let mut buffer = [0u8; 8];
        let mut cursor = CursorMut::new(&mut buffer);
        assert!(matches!(
            write(&Pair::default(), &mut cursor, false),
            Err(Error::WrongBufferSize { given: 8, .. })
        ));
        write(&Pair::default(), &mut cursor, true).expect("Write should succeed");
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn test_write_missing_field_rewinds_cursor() {
        let mut buffer = [0u8; 2];
        let mut cursor = CursorMut::new(&mut buffer);
        let err = write(&Truncated, &mut cursor, false).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldMismatch {
                field: "second",
                ..
            }
        ));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_visiting_padding_by_hand_is_a_mismatch() {
        let mut buffer = [0xFFu8; 6];
        let mut cursor = CursorMut::new(&mut buffer);
        let err = write(&VisitsPadding::default(), &mut cursor, false).unwrap_err();
        assert_eq!(
            err,
            Error::FieldMismatch {
                type_name: "Pair",
                field: "b",
                expected: "b",
                found: "_pad"
            }
        );
        assert_eq!(cursor.offset(), 0);
    }
}
