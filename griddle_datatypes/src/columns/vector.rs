use crate::types::Number;
use crate::Column;
use derive_more::{Deref, DerefMut, From, Into};
use griddle_types::serde::Datum;
use griddle_types::{Error, Result};
use std::any::Any;

/// Fixed-width numbers, stored contiguously.
#[derive(From, Into, Deref, DerefMut, Default, Clone, PartialEq, Debug)]
pub struct ColumnVector<T>(Vec<T>);

impl<T: Number> Column for ColumnVector<T> {
    fn len(&self) -> usize {
        self.0.len()
    }
    fn get(&self, row: usize) -> Datum {
        self.0[row].to_datum()
    }
    fn push(&mut self, dat: &Datum) -> Result<()> {
        let t = T::from_datum(dat).ok_or_else(|| Error::type_mismatch(T::NAME, dat.kind()))?;
        self.0.push(t);
        Ok(())
    }
    fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
    fn reserve(&mut self, additional: usize) {
        self.0.reserve(additional);
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
