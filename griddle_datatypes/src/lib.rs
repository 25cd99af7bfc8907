//! Type descriptors and the columns they materialize.
//!
//! A [`DataType`] owns every encoding decision for its values: binary, raw text,
//! escaped text and quoted text, for single [`Datum`](griddle_types::serde::Datum)s
//! and for whole [`Column`]s. Callers hold a shared [`DataTypePtr`] and never
//! branch on the concrete type.

mod bulk;
pub mod callback;
pub mod columns;
mod data_type;
pub mod marks;
pub mod registry;
pub mod types;

pub use callback::WriteCallback;
pub use columns::{Column, ColumnPtr};
pub use data_type::*;
pub use registry::{registry, TypeRegistry};
