// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for layout derivation and encode/decode.
//!
//! Two classes exist:
//! - [`LayoutError`]: schema defects, raised while a layout is derived and
//!   always before any buffer I/O.
//! - [`Error`]: runtime failures of a single encode/decode call. Schema
//!   defects surface here as [`Error::Layout`].

use crate::ser::cursor::CursorError;
use std::fmt;

/// Schema defect found while deriving a [`TypeLayout`](crate::TypeLayout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Array field declared without a (non-zero) element count.
    MissingArrayLength {
        type_name: &'static str,
        field: &'static str,
    },
    /// Padding field declared without a (non-zero) byte count.
    MissingPaddingSize {
        type_name: &'static str,
        field: &'static str,
    },
    /// Type is not a plain ordered-field value type.
    NotAggregate {
        type_name: &'static str,
        reason: &'static str,
    },
    /// Type does not satisfy the composite contract.
    NotSerializable {
        type_name: String,
        source: Option<Box<LayoutError>>,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArrayLength { type_name, field } => write!(
                f,
                "array field {}.{} has no declared length",
                type_name, field
            ),
            Self::MissingPaddingSize { type_name, field } => write!(
                f,
                "padding field {}.{} has no declared byte count",
                type_name, field
            ),
            Self::NotAggregate { type_name, reason } => {
                write!(f, "{} is not an aggregate and can't be serialized: {}", type_name, reason)
            }
            Self::NotSerializable { type_name, source } => match source {
                Some(inner) => write!(f, "{} is not serializable: {}", type_name, inner),
                None => write!(f, "{} is not serializable", type_name),
            },
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotSerializable {
                source: Some(inner),
                ..
            } => Some(inner.as_ref()),
            _ => None,
        }
    }
}

/// Failure of an encode or decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The type's layout could not be derived.
    Layout(LayoutError),
    /// Buffer has fewer bytes than the layout needs, or more while trailing
    /// bytes are not allowed.
    WrongBufferSize {
        type_name: &'static str,
        expected: usize,
        given: usize,
    },
    /// An array field's runtime length differs from its declared length.
    InvalidState {
        field: &'static str,
        expected_length: usize,
        length: usize,
    },
    /// A call consumed a different number of bytes than the layout size.
    SerializationSizeMismatch {
        type_name: &'static str,
        expected: usize,
        used: usize,
    },
    /// A composite's field codec disagrees with its own schema.
    FieldMismatch {
        type_name: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// Raw cursor overrun.
    Cursor(CursorError),
    /// Saved-state envelope bytes could not be parsed.
    MalformedEnvelope { reason: &'static str },
    /// Saved-state envelope holds a different type than requested.
    EnvelopeTypeMismatch { expected: String, found: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(inner) => write!(f, "layout error: {}", inner),
            Self::WrongBufferSize {
                type_name,
                expected,
                given,
            } => write!(
                f,
                "serialization of {} expected {} bytes, but {} were given",
                type_name, expected, given
            ),
            Self::InvalidState {
                field,
                expected_length,
                length,
            } => write!(
                f,
                "field {} expected to hold an array of length {}, but an array of {} was found",
                field, expected_length, length
            ),
            Self::SerializationSizeMismatch {
                type_name,
                expected,
                used,
            } => write!(
                f,
                "serialization of {} expected to use {} bytes, but {} were used",
                type_name, expected, used
            ),
            Self::FieldMismatch {
                type_name,
                field,
                expected,
                found,
            } => write!(
                f,
                "field {}.{} is declared as {} but was coded as {}",
                type_name, field, expected, found
            ),
            Self::Cursor(inner) => write!(f, "cursor error: {}", inner),
            Self::MalformedEnvelope { reason } => write!(f, "malformed envelope: {}", reason),
            Self::EnvelopeTypeMismatch { expected, found } => write!(
                f,
                "envelope holds {} but {} was requested",
                found, expected
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(inner) => Some(inner),
            Self::Cursor(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<CursorError> for Error {
    fn from(e: CursorError) -> Self {
        Self::Cursor(e)
    }
}

/// Result alias for encode/decode calls.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display_variants() {
        let err = LayoutError::MissingArrayLength {
            type_name: "Config",
            field: "ok_text",
        };
        assert_eq!(err.to_string(), "array field Config.ok_text has no declared length");

        let err = LayoutError::MissingPaddingSize {
            type_name: "Config",
            field: "_pad0",
        };
        assert_eq!(
            err.to_string(),
            "padding field Config._pad0 has no declared byte count"
        );

        let err = LayoutError::NotSerializable {
            type_name: "Outer".into(),
            source: Some(Box::new(LayoutError::NotAggregate {
                type_name: "Inner",
                reason: "no fields",
            })),
        };
        assert_eq!(
            err.to_string(),
            "Outer is not serializable: Inner is not an aggregate and can't be serialized: no fields"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display_variants() {
        let err = Error::WrongBufferSize {
            type_name: "KeyboardMode",
            expected: 4,
            given: 3,
        };
        assert_eq!(
            err.to_string(),
            "serialization of KeyboardMode expected 4 bytes, but 3 were given"
        );

        let err = Error::InvalidState {
            field: "separate_text_pos",
            expected_length: 5,
            length: 4,
        };
        assert_eq!(
            err.to_string(),
            "field separate_text_pos expected to hold an array of length 5, but an array of 4 was found"
        );
    }

    #[test]
    fn test_layout_error_converts_into_codec_error() {
        let err: Error = LayoutError::NotAggregate {
            type_name: "Empty",
            reason: "no fields",
        }
        .into();
        match err {
            Error::Layout(LayoutError::NotAggregate { type_name, .. }) => {
                assert_eq!(type_name, "Empty");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
