// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! - **Static**: compile-time constants of the wire contract.
//! - **Dynamic**: [`CodecConfig`], chosen per [`Codec`](crate::Codec).
//!
//! # Example
//!
//! ```
//! use packbuf::config::{ByteOrder, CodecConfig};
//!
//! let config = CodecConfig::default()
//!     .with_byte_order(ByteOrder::Little)
//!     .with_trailing_bytes(true);
//! assert_eq!(config.byte_order, ByteOrder::Little);
//! ```

use std::fmt;
use std::str::FromStr;

/// Value written into every padding byte on encode.
///
/// Decoders never look at padding content.
pub const PADDING_FILL_BYTE: u8 = 0x00;

/// Environment variable read by [`CodecConfig::from_env`] for the byte order.
pub const ENV_BYTE_ORDER: &str = "PACKBUF_BYTE_ORDER";

/// Environment variable read by [`CodecConfig::from_env`] for the trailing
/// bytes policy (`1`/`true` to allow).
pub const ENV_ALLOW_TRAILING: &str = "PACKBUF_ALLOW_TRAILING";

/// Byte order of multi-byte primitives on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ByteOrder {
    /// Byte order of the host, which is the native ABI the buffer is handed to.
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    /// Resolve [`ByteOrder::Native`] to the concrete host order.
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native => {
                if cfg!(target_endian = "big") {
                    Self::Big
                } else {
                    Self::Little
                }
            }
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Little => "little",
            Self::Big => "big",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "ne" => Ok(Self::Native),
            "little" | "le" => Ok(Self::Little),
            "big" | "be" => Ok(Self::Big),
            _ => Err(format!("unknown byte order: {}", s)),
        }
    }
}

/// Runtime options of a [`Codec`](crate::Codec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    /// Byte order of multi-byte primitives.
    pub byte_order: ByteOrder,
    /// Accept slices longer than the layout (extra bytes are left untouched).
    pub allow_trailing_bytes: bool,
}

impl CodecConfig {
    pub const fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            allow_trailing_bytes: false,
        }
    }

    #[must_use]
    pub const fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    #[must_use]
    pub const fn with_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }

    /// Build from [`ENV_BYTE_ORDER`] and [`ENV_ALLOW_TRAILING`].
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(ENV_BYTE_ORDER) {
            match value.parse() {
                Ok(order) => config.byte_order = order,
                Err(e) => log::warn!("[packbuf::config] ignoring {}: {}", ENV_BYTE_ORDER, e),
            }
        }
        if let Ok(value) = std::env::var(ENV_ALLOW_TRAILING) {
            config.allow_trailing_bytes = matches!(value.trim(), "1" | "true" | "yes");
        }
        config
    }

    /// Parse a YAML document such as `byte_order: little`.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(document: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(document)
    }
}
