//! Interleaving caller logic with bulk column serialization.
//!
//! A [`WriteCallback`] is called before row 0, and returns the index of the next row
//! before which it wants to be called. This repeats until all rows are written.
//! Triggers at or beyond the column length are never fired, and an empty column
//! never fires the callback at all.
//!
//! The typical use is to record the stream offset of every n-th row while writing
//! a column, producing a sparse index alongside the data. See [`crate::marks`].
//!
//! The callback's state belongs to the caller; a descriptor only borrows it for the
//! duration of one call.

use griddle_types::Result;
use std::cmp;
use std::ops::Range;


pub trait WriteCallback {
    /// Called before the row at index `rows_written` is encoded.
    /// Returns the index of the row before which to be called next.
    fn on_row(&mut self, rows_written: usize) -> usize;
}

impl<F> WriteCallback for F
where
    F: FnMut(usize) -> usize,
{
    fn on_row(&mut self, rows_written: usize) -> usize {
        self(rows_written)
    }
}

/// Splits rows `0..len` into runs separated by the callback's triggers,
/// calling the callback at the start of each run and `write_run` on each non-empty run.
///
/// A trigger at or before the row it was returned from is moved to the following row,
/// so the callback fires at most once per row.
pub fn for_each_run(
    len: usize,
    callback: Option<&mut dyn WriteCallback>,
    mut write_run: impl FnMut(Range<usize>) -> Result<()>,
) -> Result<()> {
    let callback = match callback {
        None => return write_run(0..len),
        Some(callback) => callback,
    };
    if len == 0 {
        return Ok(());
    }

    let mut run_start = 0;
    let mut next_trigger = callback.on_row(run_start);
    loop {
        let run_end = cmp::min(cmp::max(next_trigger, run_start + 1), len);
        if run_start < run_end {
            write_run(run_start..run_end)?;
        }
        if run_end >= len {
            return Ok(());
        }

        run_start = run_end;
        log::trace!("Write callback fires before row {run_start}.");
        next_trigger = callback.on_row(run_start);
    }
}
