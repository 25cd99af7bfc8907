use crate::Column;
use griddle_types::serde::{Datum, DatumKind};
use griddle_types::{Error, Result};
use std::any::Any;

/// Variable-length byte strings, concatenated in one buffer.
/// `ends[row]` is the exclusive end of `row` within `chars`.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct ColumnBytes {
    ends: Vec<usize>,
    chars: Vec<u8>,
}

impl ColumnBytes {
    pub fn row_bytes(&self, row: usize) -> &[u8] {
        let start = if row == 0 { 0 } else { self.ends[row - 1] };
        &self.chars[start..self.ends[row]]
    }
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.ends.push(self.chars.len());
    }
}

impl Column for ColumnBytes {
    fn len(&self) -> usize {
        self.ends.len()
    }
    fn get(&self, row: usize) -> Datum {
        Datum::Bytes(self.row_bytes(row).to_vec())
    }
    fn push(&mut self, dat: &Datum) -> Result<()> {
        match dat {
            Datum::Bytes(b) => {
                self.push_bytes(b);
                Ok(())
            }
            _ => Err(Error::type_mismatch("String", dat.kind())),
        }
    }
    fn truncate(&mut self, len: usize) {
        self.ends.truncate(len);
        self.chars.truncate(self.ends.last().copied().unwrap_or(0));
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

/// Byte strings of exactly `n` bytes each.
#[derive(Clone, PartialEq, Debug)]
pub struct ColumnFixedBytes {
    n: usize,
    rows: usize,
    chars: Vec<u8>,
}

impl ColumnFixedBytes {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            rows: 0,
            chars: vec![],
        }
    }
    pub fn n(&self) -> usize {
        self.n
    }
    pub fn row_bytes(&self, row: usize) -> &[u8] {
        assert!(row < self.rows, "row {row} out of {} rows", self.rows);
        &self.chars[row * self.n..(row + 1) * self.n]
    }
    /// Appends `bytes` zero-padded to `n`. Fails if `bytes` is longer than `n`.
    pub fn push_padded(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.n {
            return Err(Error::type_mismatch(
                format!("FixedString({})", self.n),
                DatumKind::Bytes,
            ));
        }
        self.chars.extend_from_slice(bytes);
        self.chars.resize((self.rows + 1) * self.n, 0);
        self.rows += 1;
        Ok(())
    }
}

impl Column for ColumnFixedBytes {
    fn len(&self) -> usize {
        self.rows
    }
    fn get(&self, row: usize) -> Datum {
        Datum::Bytes(self.row_bytes(row).to_vec())
    }
    fn push(&mut self, dat: &Datum) -> Result<()> {
        match dat {
            Datum::Bytes(b) => self.push_padded(b),
            _ => Err(Error::type_mismatch(
                format!("FixedString({})", self.n),
                dat.kind(),
            )),
        }
    }
    fn truncate(&mut self, len: usize) {
        self.rows = self.rows.min(len);
        self.chars.truncate(self.rows * self.n);
    }
    fn reserve(&mut self, additional: usize) {
        self.chars.reserve(additional * self.n);
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
