use crate::{Column, ColumnPtr};
use griddle_types::serde::Datum;
use griddle_types::Result;
use std::any::Any;

/// A null map over a nested column. Null rows hold `nested_default` in the nested column.
#[derive(Debug)]
pub struct ColumnNullable {
    null_map: Vec<bool>,
    nested: ColumnPtr,
    nested_default: Datum,
}

impl ColumnNullable {
    pub fn new(nested: ColumnPtr, nested_default: Datum) -> Self {
        Self {
            null_map: vec![],
            nested,
            nested_default,
        }
    }
    pub fn is_null_at(&self, row: usize) -> bool {
        self.null_map[row]
    }
    pub fn nested(&self) -> &dyn Column {
        self.nested.as_ref()
    }
}

impl Column for ColumnNullable {
    fn len(&self) -> usize {
        self.null_map.len()
    }
    fn get(&self, row: usize) -> Datum {
        if self.null_map[row] {
            Datum::Null
        } else {
            self.nested.get(row)
        }
    }
    fn push(&mut self, dat: &Datum) -> Result<()> {
        match dat {
            Datum::Null => {
                self.nested.push(&self.nested_default)?;
                self.null_map.push(true);
            }
            dat => {
                self.nested.push(dat)?;
                self.null_map.push(false);
            }
        }
        Ok(())
    }
    fn truncate(&mut self, len: usize) {
        self.null_map.truncate(len);
        self.nested.truncate(len);
    }
    fn reserve(&mut self, additional: usize) {
        self.null_map.reserve(additional);
        self.nested.reserve(additional);
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
