use crate::Column;
use griddle_types::serde::Datum;
use griddle_types::{Error, Result};
use std::any::Any;

/// `len` rows that all equal `value`, stored once.
#[derive(Clone, PartialEq, Debug)]
pub struct ColumnConst {
    len: usize,
    value: Datum,
}

impl ColumnConst {
    pub fn new(len: usize, value: Datum) -> Self {
        Self { len, value }
    }
    pub fn value(&self) -> &Datum {
        &self.value
    }
}

impl Column for ColumnConst {
    fn len(&self) -> usize {
        self.len
    }
    fn get(&self, row: usize) -> Datum {
        assert!(row < self.len, "row {row} out of {} rows", self.len);
        self.value.clone()
    }
    fn push(&mut self, _dat: &Datum) -> Result<()> {
        Err(Error::not_implemented("Const", "push()"))
    }
    fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }
    fn reserve(&mut self, _additional: usize) {}
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
