// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # packbuf
//!
//! Packed, schema-driven binary codec for exchanging structs with native code.
//!
//! A composite type declares its fields in order; packbuf derives the exact
//! byte layout of the matching native struct (no implicit alignment, all
//! padding explicit), caches it per type, and encodes or decodes values
//! against caller-owned buffers.
//!
//! ## Quick Start
//!
//! ```
//! use packbuf::{Char16, Composite, Padding};
//!
//! #[derive(Debug, Default, PartialEq, Composite)]
//! #[packbuf(name = "Header")]
//! struct Header {
//!     flag: u8,
//!     #[packbuf(padding = 3)]
//!     _pad: Padding,
//!     value: u32,
//!     title: [Char16; 4],
//! }
//!
//! let header = Header { flag: 1, value: 256, ..Header::default() };
//! let bytes = packbuf::to_bytes(&header)?;
//! assert_eq!(bytes.len(), 16);
//!
//! let decoded: Header = packbuf::from_bytes(&bytes)?;
//! assert_eq!(decoded, header);
//! # Ok::<(), packbuf::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`layout`]: schemas and the layout calculator.
//! - [`ser`]: cursors, field codecs, encode and decode.
//! - [`codec`]: [`Codec`] driven by [`CodecConfig`].
//! - [`registry`]: runtime lookup of types by schema name.
//! - [`envelope`]: type-tagged saved-state wrapper.
//! - [`text`]: fixed UTF-16 text arrays.

extern crate self as packbuf;

pub mod codec;
mod composite;
pub mod config;
pub mod envelope;
pub mod error;
pub mod layout;
pub mod registry;
pub mod ser;
pub mod text;

pub use codec::{from_bytes, populate_from_bytes, to_bytes, Codec};
pub use composite::{Composite, FieldDecoder, FieldEncoder};
pub use config::{ByteOrder, CodecConfig};
pub use envelope::Envelope;
pub use error::{Error, LayoutError, Result};
pub use layout::{
    layout_of, FieldDecl, FieldDescriptor, FieldKind, LayoutCacheStats, PrimitiveKind, Schema,
    SchemaBuilder, Shape, TypeLayout,
};
pub use registry::TypeRegistry;
pub use ser::{create, populate, write, Char16, Cursor, CursorMut, Padding};

#[cfg(feature = "derive")]
pub use packbuf_derive::Composite;
