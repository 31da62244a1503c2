// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Saved-state envelope: a composite's wire bytes tagged with its type name.
//!
//! Used when a value has to outlive the native call, e.g. stored across an
//! application restart. The core wire format stays untagged; the envelope
//! wraps it.
//!
//! Framing (all lengths little-endian):
//!
//! ```text
//! [u32 name_len][name: UTF-8][u32 payload_len][payload]
//! ```

use crate::codec::Codec;
use crate::config::{ByteOrder, CodecConfig};
use crate::error::{Error, Result};
use crate::Composite;

/// Type-tagged payload in native byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    type_name: String,
    payload: Vec<u8>,
}

fn codec() -> Codec {
    Codec::new(CodecConfig::new(ByteOrder::Native))
}

impl Envelope {
    /// Encode `value` and record its schema name.
    pub fn seal<T: Composite>(value: &T) -> Result<Self> {
        Ok(Self {
            type_name: T::schema().type_name().to_string(),
            payload: codec().encode(value)?,
        })
    }

    /// Decode the payload as `T` after checking the recorded name.
    pub fn open<T: Composite>(&self) -> Result<T> {
        let expected = T::schema().type_name();
        if self.type_name != expected {
            return Err(Error::EnvelopeTypeMismatch {
                expected: expected.to_string(),
                found: self.type_name.clone(),
            });
        }
        codec().decode(&self.payload)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let name_len = frame_len(self.type_name.len())?;
        let payload_len = frame_len(self.payload.len())?;
        let mut out = Vec::with_capacity(8 + self.type_name.len() + self.payload.len());
        out.extend_from_slice(&name_len.to_le_bytes());
        out.extend_from_slice(self.type_name.as_bytes());
        out.extend_from_slice(&payload_len.to_le_bytes());
        out.extend_from_slice(&self.payload);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut rest = bytes;
        let name = take_frame(&mut rest, "truncated type name")?;
        let type_name = std::str::from_utf8(name)
            .map_err(|_| Error::MalformedEnvelope {
                reason: "type name is not UTF-8",
            })?
            .to_string();
        let payload = take_frame(&mut rest, "truncated payload")?.to_vec();
        if !rest.is_empty() {
            return Err(Error::MalformedEnvelope {
                reason: "trailing bytes after payload",
            });
        }
        Ok(Self { type_name, payload })
    }
}

fn frame_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::MalformedEnvelope {
        reason: "frame longer than u32::MAX",
    })
}

fn take_frame<'a>(rest: &mut &'a [u8], reason: &'static str) -> Result<&'a [u8]> {
    let bytes: &'a [u8] = *rest;
    if bytes.len() < 4 {
        return Err(Error::MalformedEnvelope { reason });
    }
    let (len, tail) = bytes.split_at(4);
    let len = u32::from_le_bytes([len[0], len[1], len[2], len[3]]) as usize;
    if tail.len() < len {
        return Err(Error::MalformedEnvelope { reason });
    }
    let (frame, tail) = tail.split_at(len);
    *rest = tail;
    Ok(frame)
}
