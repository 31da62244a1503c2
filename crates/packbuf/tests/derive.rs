// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Schemas generated by #[derive(Composite)].

use packbuf::{
    Char16, Composite, FieldDecl, FieldKind, LayoutError, Padding, PrimitiveKind, Schema,
};

#[derive(Debug, Default, PartialEq, Composite)]
#[packbuf(name = "NativeHeader")]
struct Header {
    r#type: u16,
    #[packbuf(read_only)]
    version: u8,
    #[packbuf(padding = 1)]
    _pad: Padding,
    label: [Char16; 4],
}

#[derive(Debug, Default, PartialEq, Composite)]
struct Unsized {
    flag: u8,
    _pad: Padding,
}

#[derive(Debug, Default, PartialEq, Composite)]
struct Outer {
    header: Header,
    headers: [Header; 2],
}

#[test]
fn test_derived_schema_matches_builder() {
    let expected = Schema::builder("NativeHeader")
        .field::<u16>("type")
        .read_only_field::<u8>("version")
        .padding("_pad", 1)
        .decl(FieldDecl::of::<[Char16; 4]>("label"))
        .build();
    assert_eq!(Header::schema(), expected);
}

#[test]
fn test_derived_layout() {
    let layout = Header::layout().expect("Layout should succeed");
    assert_eq!(layout.type_name(), "NativeHeader");
    assert_eq!(layout.total_size(), 12);
    assert!(layout.field("version").expect("version field").read_only);
    assert_eq!(
        layout.field("label").map(|f| f.kind.clone()),
        Some(FieldKind::PrimitiveArray(PrimitiveKind::Char16))
    );
}

#[test]
fn test_padding_without_size_fails_at_layout() {
    assert_eq!(
        Unsized::layout().unwrap_err(),
        LayoutError::MissingPaddingSize {
            type_name: "Unsized",
            field: "_pad"
        }
    );
    assert!(packbuf::to_bytes(&Unsized::default()).is_err());
}

#[test]
fn test_read_only_applies_inside_nested_populate() {
    let source = Outer {
        header: Header {
            r#type: 3,
            version: 9,
            ..Header::default()
        },
        headers: [
            Header {
                r#type: 4,
                version: 5,
                ..Header::default()
            },
            Header::default(),
        ],
    };
    let bytes = packbuf::to_bytes(&source).expect("Encode should succeed");
    assert_eq!(bytes.len(), 36);

    let mut target = Outer::default();
    target.headers[0].version = 77;
    packbuf::populate_from_bytes(&mut target, &bytes).expect("Populate should succeed");
    assert_eq!(target.header.r#type, 3);
    assert_eq!(target.headers[0].r#type, 4);
    // Read-only scalars keep their value in nested fields and array elements.
    assert_eq!(target.header.version, 0);
    assert_eq!(target.headers[0].version, 77);
}

#[test]
fn test_create_reads_read_only_fields_of_array_elements() {
    let source = Outer {
        headers: [
            Header {
                version: 5,
                ..Header::default()
            },
            Header::default(),
        ],
        ..Outer::default()
    };
    let bytes = packbuf::to_bytes(&source).expect("Encode should succeed");
    let decoded: Outer = packbuf::from_bytes(&bytes).expect("Decode should succeed");
    assert_eq!(decoded.headers[0].version, 5);
}

#[derive(Debug, Default, PartialEq, Composite)]
struct Bag {
    fields: u8,
    other: u8,
}

#[test]
fn test_field_named_fields_round_trips() {
    let bag = Bag {
        fields: 1,
        other: 2,
    };
    let bytes = packbuf::to_bytes(&bag).expect("Encode should succeed");
    assert_eq!(bytes, [1, 2]);

    let decoded: Bag = packbuf::from_bytes(&bytes).expect("Decode should succeed");
    assert_eq!(decoded, bag);

    let mut target = Bag::default();
    packbuf::populate_from_bytes(&mut target, &bytes).expect("Populate should succeed");
    assert_eq!(target, bag);
}
