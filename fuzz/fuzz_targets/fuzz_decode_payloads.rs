// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use packbuf::{ByteOrder, Codec, CodecConfig};
use packbuf_applet::motion::MotionSensorInput;
use packbuf_applet::swkbd::SoftwareKeyboardConfig;

fuzz_target!(|data: &[u8]| {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let codec = Codec::new(CodecConfig::new(order).with_trailing_bytes(true));

        // Whatever decodes must re-encode to the same non-padding bytes.
        if let Ok(config) = codec.decode::<SoftwareKeyboardConfig>(data) {
            let again = codec.encode(&config).expect("decoded value must encode");
            let reparsed: SoftwareKeyboardConfig =
                codec.decode(&again).expect("encoded value must decode");
            assert_eq!(reparsed, config);
        }

        // Float NaNs break equality, compare bytes instead.
        if let Ok(sample) = codec.decode::<MotionSensorInput>(data) {
            let again = codec.encode(&sample).expect("decoded value must encode");
            assert_eq!(&again[..], &data[..again.len()]);
        }

        let mut target = SoftwareKeyboardConfig::default();
        let _ = codec.populate(&mut target, data);
    }
});
