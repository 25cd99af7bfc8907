use crate::{Column, ColumnPtr};
use griddle_types::serde::Datum;
use griddle_types::{Error, Result};
use std::any::Any;

/// Arrays, flattened into one nested column.
/// `ends[row]` is the exclusive end of `row`'s elements within `data`.
#[derive(Debug)]
pub struct ColumnArray {
    ends: Vec<usize>,
    data: ColumnPtr,
}

impl ColumnArray {
    pub fn new(data: ColumnPtr) -> Self {
        Self { ends: vec![], data }
    }
    pub fn data(&self) -> &dyn Column {
        self.data.as_ref()
    }
    fn row_range(&self, row: usize) -> (usize, usize) {
        let start = if row == 0 { 0 } else { self.ends[row - 1] };
        (start, self.ends[row])
    }
}

impl Column for ColumnArray {
    fn len(&self) -> usize {
        self.ends.len()
    }
    fn get(&self, row: usize) -> Datum {
        let (start, end) = self.row_range(row);
        Datum::Array((start..end).map(|i| self.data.get(i)).collect())
    }
    fn push(&mut self, dat: &Datum) -> Result<()> {
        let members = match dat {
            Datum::Array(members) => members,
            _ => return Err(Error::type_mismatch("Array", dat.kind())),
        };
        let prev_data_len = self.data.len();
        for member in members {
            if let Err(e) = self.data.push(member) {
                self.data.truncate(prev_data_len);
                return Err(e);
            }
        }
        self.ends.push(self.data.len());
        Ok(())
    }
    fn truncate(&mut self, len: usize) {
        self.ends.truncate(len);
        self.data.truncate(self.ends.last().copied().unwrap_or(0));
    }
    fn reserve(&mut self, additional: usize) {
        self.ends.reserve(additional);
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
