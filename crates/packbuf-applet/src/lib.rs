// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Payloads handed to the native core.
//!
//! - [`swkbd`]: software keyboard applet configuration (`KeyboardConfigVB`)
//! - [`motion`]: motion sensor samples

pub mod motion;
pub mod swkbd;

use packbuf::TypeRegistry;

/// Register every top-level payload of this crate.
pub fn register_all(registry: &TypeRegistry) {
    registry.register::<swkbd::SoftwareKeyboardConfig>();
    registry.register::<swkbd::KeyboardMode>();
    registry.register::<swkbd::InvalidCharFlags>();
    registry.register::<swkbd::DictionaryInfo>();
    registry.register::<motion::MotionSensorInput>();
}
