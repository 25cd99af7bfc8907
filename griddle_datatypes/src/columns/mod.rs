//! In-memory columns.
//!
//! A column is an ordered sequence of values of one type. Each implementation
//! stores one shape of data; descriptors pick the implementation in
//! [`DataType::create_column`](crate::DataType::create_column), and may look through
//! [`Column::as_any`] to reach their own implementation's storage directly.

use griddle_types::serde::Datum;
use griddle_types::Result;
use std::any::Any;
use std::fmt::Debug;

mod array;
mod bytes;
mod constant;
mod nullable;
mod tuple;
mod vector;

pub use array::*;
pub use bytes::*;
pub use constant::*;
pub use nullable::*;
pub use tuple::*;
pub use vector::*;

pub type ColumnPtr = Box<dyn Column>;

pub trait Column: Send + Sync + Debug {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Panics if `row` is out of range.
    fn get(&self, row: usize) -> Datum;

    /// Appends one value. On error, the column is unchanged.
    fn push(&mut self, dat: &Datum) -> Result<()>;

    /// Drops all rows from `len` onwards.
    fn truncate(&mut self, len: usize);

    fn reserve(&mut self, additional: usize);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl PartialEq for dyn Column {
    /// Compares logical contents, regardless of representation.
    fn eq(&self, other: &dyn Column) -> bool {
        self.len() == other.len() && (0..self.len()).all(|row| self.get(row) == other.get(row))
    }
}
