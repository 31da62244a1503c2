// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use packbuf::Envelope;
use packbuf_applet::swkbd::KeyboardMode;

fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = Envelope::from_bytes(data) {
        let framed = envelope.to_bytes().expect("parsed envelope must frame");
        assert_eq!(framed, data);
        let _ = envelope.open::<KeyboardMode>();
    }
});
