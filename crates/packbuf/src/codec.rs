// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Buffer-level encode/decode entry points.

use crate::config::CodecConfig;
use crate::error::Result;
use crate::layout::layout_of;
use crate::ser::{self, Cursor, CursorMut};
use crate::Composite;

/// Encoder/decoder bound to one [`CodecConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode into a new buffer of exactly the layout size.
    pub fn encode<T: Composite>(&self, value: &T) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; layout_of::<T>()?.total_size()];
        let mut cursor = CursorMut::with_order(&mut buffer, self.config.byte_order);
        ser::write(value, &mut cursor, false)?;
        Ok(buffer)
    }

    /// Encode at the start of `buffer`, returning the bytes written.
    pub fn encode_into<T: Composite>(&self, value: &T, buffer: &mut [u8]) -> Result<usize> {
        let mut cursor = CursorMut::with_order(buffer, self.config.byte_order);
        ser::write(value, &mut cursor, self.config.allow_trailing_bytes)?;
        Ok(cursor.offset())
    }

    pub fn decode<T: Composite>(&self, bytes: &[u8]) -> Result<T> {
        let mut cursor = Cursor::with_order(bytes, self.config.byte_order);
        ser::create(&mut cursor, self.config.allow_trailing_bytes)
    }

    pub fn populate<T: Composite>(&self, target: &mut T, bytes: &[u8]) -> Result<()> {
        let mut cursor = Cursor::with_order(bytes, self.config.byte_order);
        ser::populate(target, &mut cursor, self.config.allow_trailing_bytes)
    }
}

/// Encode with native byte order.
pub fn to_bytes<T: Composite>(value: &T) -> Result<Vec<u8>> {
    Codec::default().encode(value)
}

/// Decode with native byte order; `bytes` must be exactly the layout size.
pub fn from_bytes<T: Composite>(bytes: &[u8]) -> Result<T> {
    Codec::default().decode(bytes)
}

/// Populate with native byte order; `bytes` must be exactly the layout size.
pub fn populate_from_bytes<T: Composite>(target: &mut T, bytes: &[u8]) -> Result<()> {
    Codec::default().populate(target, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ByteOrder;
    use crate::error::Error;
    use crate::{FieldDecoder, FieldEncoder, Schema};

    #[derive(Debug, Default, PartialEq)]
    struct Stamp {
        seconds: u64,
        valid: bool,
    }

    impl Composite for Stamp {
        fn schema() -> Schema {
            Schema::builder("Stamp")
                .field::<u64>("seconds")
                .field::<bool>("valid")
                .build()
        }

        fn encode_fields(&self, fields: &mut FieldEncoder<'_, '_>) -> Result<()> {
            fields.field("seconds", &self.seconds)?;
            fields.field("valid", &self.valid)
        }

        fn decode_fields(fields: &mut FieldDecoder<'_, '_>) -> Result<Self> {
            Ok(Self {
                seconds: fields.field("seconds")?,
                valid: fields.field("valid")?,
            })
        }

        fn populate_fields(&mut self, fields: &mut FieldDecoder<'_, '_>) -> Result<()> {
            fields.field_into("seconds", &mut self.seconds)?;
            fields.field_into("valid", &mut self.valid)
        }
    }

    #[test]
    fn test_codec_big_endian_layout() {
        let codec = Codec::new(CodecConfig::new(ByteOrder::Big));
        let bytes = codec
            .encode(&Stamp {
                seconds: 1,
                valid: true,
            })
            .expect("Encode should succeed");
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 1, 1]);

        let decoded: Stamp = codec.decode(&bytes).expect("Decode should succeed");
        assert_eq!(decoded.seconds, 1);
        assert!(decoded.valid);
    }

    #[test]
    fn test_encode_into_honours_trailing_policy() {
        let stamp = Stamp::default();
        let mut buffer = [0u8; 12];

        let strict = Codec::default();
        assert!(matches!(
            strict.encode_into(&stamp, &mut buffer),
            Err(Error::WrongBufferSize { expected: 9, given: 12, .. })
        ));

        let lenient = Codec::new(CodecConfig::default().with_trailing_bytes(true));
        let written = lenient
            .encode_into(&stamp, &mut buffer)
            .expect("Encode should succeed");
        assert_eq!(written, 9);
    }

    #[test]
    fn test_free_functions_roundtrip() {
        let stamp = Stamp {
            seconds: 0x0102_0304_0506_0708,
            valid: false,
        };
        let bytes = to_bytes(&stamp).expect("Encode should succeed");
        assert_eq!(from_bytes::<Stamp>(&bytes).expect("Decode should succeed"), stamp);

        let mut target = Stamp {
            seconds: 0,
            valid: true,
        };
        populate_from_bytes(&mut target, &bytes).expect("Populate should succeed");
        assert_eq!(target, stamp);
    }
}
