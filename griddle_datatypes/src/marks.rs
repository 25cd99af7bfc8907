//! Sparse row-to-offset indexes, built while a column is written.
//!
//! [`SparseMarks`] is a [`WriteCallback`] that records, once every `granularity` rows,
//! the stream offset at which that row begins. The offset is read from the
//! [`ByteCounter`] of the [`CountingWriter`](griddle_types::io_utils::CountingWriter)
//! that the column is written through.
//!
//! To read from an arbitrary row, seek the stream to the nearest preceding mark and
//! bulk-deserialize from there.

use crate::WriteCallback;
use griddle_types::io_utils::ByteCounter;


/// Rows per mark, unless chosen otherwise.
pub const DEFAULT_GRANULARITY: usize = 8192;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Mark {
    pub row: usize,
    /// The stream offset at which `row` begins.
    pub offset: u64,
}

#[derive(Debug)]
pub struct SparseMarks {
    counter: ByteCounter,
    granularity: usize,
    marks: Vec<Mark>,
}

impl SparseMarks {
    pub fn new(counter: ByteCounter) -> Self {
        Self::with_granularity(counter, DEFAULT_GRANULARITY)
    }

    /// # Panics
    ///
    /// If `granularity` is zero.
    pub fn with_granularity(counter: ByteCounter, granularity: usize) -> Self {
        assert!(granularity > 0, "granularity must be positive");
        Self {
            counter,
            granularity,
            marks: vec![],
        }
    }

    pub fn granularity(&self) -> usize {
        self.granularity
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn into_marks(self) -> Vec<Mark> {
        self.marks
    }

    /// The last mark at or before `row`.
    pub fn nearest_preceding(&self, row: usize) -> Option<&Mark> {
        let pos = self.marks.partition_point(|mark| mark.row <= row);
        pos.checked_sub(1).map(|i| &self.marks[i])
    }
}

impl WriteCallback for SparseMarks {
    fn on_row(&mut self, rows_written: usize) -> usize {
        let mark = Mark {
            row: rows_written,
            offset: self.counter.get(),
        };
        log::trace!("Marking row {} at offset {}", mark.row, mark.offset);
        self.marks.push(mark);
        rows_written + self.granularity
    }
}
