// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-keyed type registry.
//!
//! Tools that pick a composite at runtime (dump inspectors, test harnesses)
//! register the types they know under their schema names and then look up
//! layouts or decode raw bytes by name.

use crate::config::ByteOrder;
use crate::error::{Error, LayoutError, Result};
use crate::layout::{layout_of, TypeLayout};
use crate::ser::{self, Cursor};
use crate::Composite;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

type LayoutFn = fn() -> core::result::Result<Arc<TypeLayout>, LayoutError>;
type DecodeFn = fn(&[u8], ByteOrder, bool) -> Result<Box<dyn Debug + Send>>;

#[derive(Clone, Copy)]
struct RegisteredType {
    layout: LayoutFn,
    decode: DecodeFn,
}

fn decode_erased<T: Composite + Debug + Send>(
    bytes: &[u8],
    order: ByteOrder,
    allow_trailing_bytes: bool,
) -> Result<Box<dyn Debug + Send>> {
    let mut cursor = Cursor::with_order(bytes, order);
    let value: T = ser::create(&mut cursor, allow_trailing_bytes)?;
    Ok(Box::new(value))
}

/// Registry of composite types by schema name.
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<&'static str, RegisteredType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its schema name, replacing any previous entry.
    pub fn register<T: Composite + Debug + Send>(&self) -> &'static str {
        let name = T::schema().type_name();
        let entry = RegisteredType {
            layout: layout_of::<T>,
            decode: decode_erased::<T>,
        };
        if self.types.write().insert(name, entry).is_some() {
            log::warn!("[packbuf::registry] replaced registration of {}", name);
        }
        name
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.read().keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    fn lookup(&self, name: &str) -> core::result::Result<RegisteredType, LayoutError> {
        self.types
            .read()
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::NotSerializable {
                type_name: name.to_string(),
                source: None,
            })
    }

    pub fn layout_by_name(&self, name: &str) -> core::result::Result<Arc<TypeLayout>, LayoutError> {
        (self.lookup(name)?.layout)()
    }

    /// Decode `bytes` (exactly the layout size) as the type registered under `name`.
    pub fn decode_by_name(
        &self,
        name: &str,
        bytes: &[u8],
        order: ByteOrder,
    ) -> Result<Box<dyn Debug + Send>> {
        self.decode_by_name_with(name, bytes, order, false)
    }

    pub fn decode_by_name_with(
        &self,
        name: &str,
        bytes: &[u8],
        order: ByteOrder,
        allow_trailing_bytes: bool,
    ) -> Result<Box<dyn Debug + Send>> {
        let entry = self.lookup(name).map_err(Error::from)?;
        (entry.decode)(bytes, order, allow_trailing_bytes)
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .finish()
    }
}
