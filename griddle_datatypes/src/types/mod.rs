//! The reference catalog of descriptors.
//!
//! Scalars: the fixed-width [numbers](DataTypeNumber), [`DataTypeString`] and
//! [`DataTypeFixedString`].
//! Composites: [`DataTypeArray`], [`DataTypeTuple`] and [`DataTypeNullable`],
//! each parameterized by shared nested descriptors.

mod array;
mod composite;
mod fixed_string;
mod nullable;
mod number;
mod string;
mod tuple;

pub use array::*;
pub use fixed_string::*;
pub use nullable::*;
pub use number::*;
pub use string::*;
pub use tuple::*;
