// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Byte-exact wire vectors for small composites, in little-endian order.
//
// Each test pins the bytes a native struct of the same declaration would
// hold, then checks the decoders against them.

#![allow(clippy::unreadable_literal)]

use packbuf::{ByteOrder, Codec, CodecConfig, Composite, Cursor, Error, Padding};

fn little() -> Codec {
    Codec::new(CodecConfig::new(ByteOrder::Little))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
struct KeyboardMode {
    mode: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
struct FlagAndValue {
    flag: u8,
    #[packbuf(padding = 3)]
    _pad: Padding,
    value: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Composite)]
struct Positions {
    #[packbuf(length = 5)]
    pos: Vec<u32>,
}

#[test]
fn test_keyboard_mode_vectors() {
    let codec = little();
    assert_eq!(
        codec
            .encode(&KeyboardMode { mode: 0 })
            .expect("Encode should succeed"),
        [0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        codec
            .encode(&KeyboardMode { mode: 7 })
            .expect("Encode should succeed"),
        [0x07, 0x00, 0x00, 0x00]
    );
}

#[test]
fn test_flag_padding_value_is_eight_bytes() {
    assert_eq!(FlagAndValue::byte_size(), Ok(8));

    let bytes = little()
        .encode(&FlagAndValue {
            flag: 1,
            value: 256,
            ..FlagAndValue::default()
        })
        .expect("Encode should succeed");
    assert_eq!(bytes, [0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00]);
}

#[test]
fn test_padding_content_is_ignored_on_decode() {
    let clean = [0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00];
    let dirty = [0x01, 0xDE, 0xAD, 0xBE, 0x00, 0x01, 0x00, 0x00];
    let codec = little();
    let a: FlagAndValue = codec.decode(&clean).expect("Decode should succeed");
    let b: FlagAndValue = codec.decode(&dirty).expect("Decode should succeed");
    assert_eq!(a, b);
    assert_eq!(a.value, 256);
}

#[test]
fn test_one_byte_short_yields_no_instance() {
    let bytes = [0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00];
    let mut cursor = Cursor::with_order(&bytes, ByteOrder::Little);
    let err = packbuf::create::<FlagAndValue>(&mut cursor, false).unwrap_err();
    assert_eq!(
        err,
        Error::WrongBufferSize {
            type_name: "FlagAndValue",
            expected: 8,
            given: 7
        }
    );
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn test_populate_rejects_short_runtime_array() {
    let mut target = Positions {
        pos: vec![0; 4],
    };
    let err = little().populate(&mut target, &[0u8; 20]).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidState {
            field: "pos",
            expected_length: 5,
            length: 4
        }
    );
    assert_eq!(target.pos, vec![0; 4]);
}

#[test]
fn test_populate_overwrites_runtime_array_of_declared_length() {
    let mut target = Positions {
        pos: vec![9; 5],
    };
    let mut bytes = [0u8; 20];
    bytes[16] = 0x2A;
    little()
        .populate(&mut target, &bytes)
        .expect("Populate should succeed");
    assert_eq!(target.pos, vec![0, 0, 0, 0, 42]);
}

#[test]
fn test_encode_rejects_wrong_runtime_array_length() {
    let value = Positions {
        pos: vec![1, 2, 3],
    };
    assert!(matches!(
        little().encode(&value),
        Err(Error::InvalidState {
            expected_length: 5,
            length: 3,
            ..
        })
    ));
}

#[test]
fn test_big_endian_vector() {
    let bytes = Codec::new(CodecConfig::new(ByteOrder::Big))
        .encode(&FlagAndValue {
            flag: 1,
            value: 256,
            ..FlagAndValue::default()
        })
        .expect("Encode should succeed");
    assert_eq!(bytes, [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00]);
}
