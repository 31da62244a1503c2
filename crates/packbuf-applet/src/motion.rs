// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Motion sensor samples passed to the native input core.

use packbuf::{ByteOrder, Codec, CodecConfig, Composite};

/// Wire size of [`MotionSensorInput`].
pub const MOTION_INPUT_SIZE: usize = 0x5C;

/// The native input core expects little-endian motion data.
pub const MOTION_BYTE_ORDER: ByteOrder = ByteOrder::Little;

#[derive(Debug, Clone, Copy, PartialEq, Default, Composite)]
pub struct MotionSensorInput {
    /// Sample time, nanoseconds.
    pub timestamp: u64,
    pub delta_timestamp: u64,
    pub gyroscope: [f32; 3],
    pub accelerometer: [f32; 3],
    pub quaternion: [f32; 4],
    pub orientation_matrix: [f32; 9],
}

impl MotionSensorInput {
    fn codec() -> Codec {
        Codec::new(CodecConfig::new(MOTION_BYTE_ORDER))
    }

    /// Write into the shared motion buffer, which must be exactly
    /// [`MOTION_INPUT_SIZE`] bytes.
    pub fn write_to(&self, buffer: &mut [u8]) -> packbuf::Result<()> {
        Self::codec().encode_into(self, buffer).map(|_| ())
    }

    pub fn read_from(buffer: &[u8]) -> packbuf::Result<Self> {
        Self::codec().decode(buffer)
    }
}
