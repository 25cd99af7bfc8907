use crate::{Column, ColumnPtr};
use griddle_types::serde::Datum;
use griddle_types::{Error, Result};
use std::any::Any;

/// Tuples, stored as one column per member.
#[derive(Debug)]
pub struct ColumnTuple {
    rows: usize,
    columns: Vec<ColumnPtr>,
}

impl ColumnTuple {
    pub fn new(columns: Vec<ColumnPtr>) -> Self {
        Self { rows: 0, columns }
    }
    pub fn member(&self, i: usize) -> &dyn Column {
        self.columns[i].as_ref()
    }
}

impl Column for ColumnTuple {
    fn len(&self) -> usize {
        self.rows
    }
    fn get(&self, row: usize) -> Datum {
        assert!(row < self.rows, "row {row} out of {} rows", self.rows);
        Datum::Tuple(self.columns.iter().map(|col| col.get(row)).collect())
    }
    fn push(&mut self, dat: &Datum) -> Result<()> {
        let members = match dat {
            Datum::Tuple(members) if members.len() == self.columns.len() => members,
            _ => return Err(Error::type_mismatch("Tuple", dat.kind())),
        };
        for (i, member) in members.iter().enumerate() {
            if let Err(e) = self.columns[i].push(member) {
                for col in self.columns[..i].iter_mut() {
                    col.truncate(self.rows);
                }
                return Err(e);
            }
        }
        self.rows += 1;
        Ok(())
    }
    fn truncate(&mut self, len: usize) {
        self.rows = self.rows.min(len);
        for col in self.columns.iter_mut() {
            col.truncate(self.rows);
        }
    }
    fn reserve(&mut self, additional: usize) {
        for col in self.columns.iter_mut() {
            col.reserve(additional);
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
