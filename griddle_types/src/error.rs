use crate::serde::DatumKind;
use std::io;
use thiserror::Error;

/// Every failure raised by the serialization core.
///
/// Variants fall in two groups. `TypeMismatch`, `TruncatedInput` and
/// `MalformedEncoding` are real failures of a single call.
/// `NotImplemented` reports an optional capability that a type does not have,
/// and callers are expected to probe for it (see [`Error::kind`]).
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied value's shape is not acceptable to the type.
    #[error("Data type {type_name} cannot hold a {got} value")]
    TypeMismatch { type_name: String, got: DatumKind },

    /// The stream ended inside a value.
    #[error("Input ended while reading {0}")]
    TruncatedInput(String),

    /// Bytes or text are structurally invalid for the type's format.
    #[error("Malformed {type_name} encoding: {detail}")]
    MalformedEncoding { type_name: String, detail: String },

    #[error("{what} is not implemented for data type {type_name}")]
    NotImplemented {
        type_name: String,
        what: &'static str,
    },

    #[error("Unknown data type {0}")]
    UnknownType(String),

    /// Any stream failure other than a premature end.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ErrorKind {
    TypeMismatch,
    TruncatedInput,
    MalformedEncoding,
    NotImplemented,
    UnknownType,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::TruncatedInput(_) => ErrorKind::TruncatedInput,
            Self::MalformedEncoding { .. } => ErrorKind::MalformedEncoding,
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::UnknownType(_) => ErrorKind::UnknownType,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub fn type_mismatch(type_name: impl Into<String>, got: DatumKind) -> Self {
        Self::TypeMismatch {
            type_name: type_name.into(),
            got,
        }
    }

    pub fn malformed(type_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedEncoding {
            type_name: type_name.into(),
            detail: detail.into(),
        }
    }

    pub fn truncated(what: impl Into<String>) -> Self {
        Self::TruncatedInput(what.into())
    }

    pub fn not_implemented(type_name: impl Into<String>, what: &'static str) -> Self {
        Self::NotImplemented {
            type_name: type_name.into(),
            what,
        }
    }
}
