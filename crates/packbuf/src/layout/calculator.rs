// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Layout derivation and the process-wide layout cache.
//!
//! Layouts are computed outside of any map lock (derivation recurses into
//! nested types, which may live in the same shard) and published with
//! insert-if-absent. Once published, an `Arc<TypeLayout>` is immutable and
//! every caller observes the same instance.

use crate::error::LayoutError;
use crate::layout::{FieldDescriptor, FieldKind, Schema, Shape, TypeLayout};
use crate::Composite;
use dashmap::DashMap;
use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

struct LayoutCache {
    layouts: DashMap<TypeId, Arc<TypeLayout>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache hit/miss counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCacheStats {
    pub cached_types: usize,
    pub hits: u64,
    pub misses: u64,
}

impl LayoutCacheStats {
    /// Snapshot of the process-wide cache.
    pub fn snapshot() -> Self {
        let cache = cache();
        Self {
            cached_types: cache.layouts.len(),
            hits: cache.hits.load(Ordering::Relaxed),
            misses: cache.misses.load(Ordering::Relaxed),
        }
    }
}

fn cache() -> &'static LayoutCache {
    static CACHE: OnceLock<LayoutCache> = OnceLock::new();
    CACHE.get_or_init(|| LayoutCache {
        layouts: DashMap::new(),
        hits: AtomicU64::new(0),
        misses: AtomicU64::new(0),
    })
}

thread_local! {
    // Types whose layout is being derived on this thread.
    static IN_PROGRESS: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

struct InProgress;

impl InProgress {
    fn enter(id: TypeId) -> Option<Self> {
        IN_PROGRESS.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&id) {
                None
            } else {
                stack.push(id);
                Some(Self)
            }
        })
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Layout of `T`, derived on first use and cached for the process lifetime.
///
/// Errors are not cached: a defective schema reports its error on every call.
pub fn layout_of<T: Composite>() -> Result<Arc<TypeLayout>, LayoutError> {
    let id = TypeId::of::<T>();
    let cache = cache();
    if let Some(hit) = cache.layouts.get(&id) {
        cache.hits.fetch_add(1, Ordering::Relaxed);
        return Ok(Arc::clone(hit.value()));
    }

    let schema = T::schema();
    let Some(_guard) = InProgress::enter(id) else {
        return Err(LayoutError::NotAggregate {
            type_name: schema.type_name(),
            reason: "type contains itself",
        });
    };
    let computed = Arc::new(compute(id, &schema)?);
    cache.misses.fetch_add(1, Ordering::Relaxed);

    let published = Arc::clone(cache.layouts.entry(id).or_insert(computed).value());
    log::debug!(
        "[packbuf::layout] published {} ({} bytes, {} fields)",
        published.type_name(),
        published.total_size(),
        published.fields().len()
    );
    Ok(published)
}

fn compute(id: TypeId, schema: &Schema) -> Result<TypeLayout, LayoutError> {
    let type_name = schema.type_name();
    if schema.fields().is_empty() {
        return Err(LayoutError::NotAggregate {
            type_name,
            reason: "no fields declared",
        });
    }

    let mut seen = HashSet::with_capacity(schema.fields().len());
    let mut fields = Vec::with_capacity(schema.fields().len());
    for decl in schema.fields() {
        if !seen.insert(decl.name) {
            return Err(LayoutError::NotAggregate {
                type_name,
                reason: "duplicate field name",
            });
        }

        let array_length = || match decl.length {
            Some(length) if length > 0 => Ok(length),
            _ => Err(LayoutError::MissingArrayLength {
                type_name,
                field: decl.name,
            }),
        };
        let nested = |shape_ref: &crate::layout::TypeRef| {
            shape_ref
                .layout()
                .map_err(|e| LayoutError::NotSerializable {
                    type_name: shape_ref.rust_name().to_string(),
                    source: Some(Box::new(e)),
                })
        };

        let (kind, element_size, length) = match &decl.shape {
            Shape::Scalar(primitive) => (FieldKind::Scalar(*primitive), primitive.size(), 1),
            Shape::PrimitiveArray(primitive) => (
                FieldKind::PrimitiveArray(*primitive),
                primitive.size(),
                array_length()?,
            ),
            Shape::CompositeArray(type_ref) => {
                let length = array_length()?;
                let layout = nested(type_ref)?;
                let size = layout.total_size();
                (FieldKind::CompositeArray(layout), size, length)
            }
            Shape::Nested(type_ref) => {
                let layout = nested(type_ref)?;
                let size = layout.total_size();
                (FieldKind::NestedComposite(layout), size, 1)
            }
            Shape::Padding => match decl.padding {
                Some(bytes) if bytes > 0 => (FieldKind::Padding, bytes, 1),
                _ => {
                    return Err(LayoutError::MissingPaddingSize {
                        type_name,
                        field: decl.name,
                    })
                }
            },
        };

        fields.push(FieldDescriptor {
            name: decl.name,
            kind,
            element_size,
            length,
            read_only: decl.read_only,
        });
    }

    Ok(TypeLayout::new(id, type_name, fields))
}
