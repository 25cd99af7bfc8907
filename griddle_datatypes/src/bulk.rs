//! Row-at-a-time column loops, used by types that have no contiguous fast path.

use crate::callback::{self, WriteCallback};
use crate::{Column, DataType};
use griddle_types::{io_utils, Error, Result};
use std::cmp;
use std::io::{BufRead, Write};

/// Caps the up-front reservation, since `limit` is often "as many as there are".
pub(crate) const MAX_RESERVE_ROWS: usize = 1 << 16;

pub(crate) fn serialize_rows<T: DataType + ?Sized>(
    data_type: &T,
    column: &dyn Column,
    w: &mut dyn Write,
    callback: Option<&mut dyn WriteCallback>,
) -> Result<()> {
    callback::for_each_run(column.len(), callback, |rows| {
        for row in rows {
            data_type.serialize_binary(&column.get(row), w)?;
        }
        Ok(())
    })
}

pub(crate) fn deserialize_rows<T: DataType + ?Sized>(
    data_type: &T,
    column: &mut dyn Column,
    r: &mut dyn BufRead,
    limit: usize,
) -> Result<usize> {
    column.reserve(cmp::min(limit, MAX_RESERVE_ROWS));

    let mut appended = 0;
    while appended < limit {
        if io_utils::is_eof(r)? {
            break;
        }
        let dat = match data_type.deserialize_binary(r) {
            Ok(dat) => dat,
            Err(Error::TruncatedInput(what)) => {
                log_partial_row(&data_type.name(), column.len(), &what);
                break;
            }
            Err(e) => return Err(e),
        };
        column.push(&dat)?;
        appended += 1;
    }
    Ok(appended)
}

pub(crate) fn log_partial_row(type_name: &str, row: usize, what: &str) {
    log::warn!(
        "Discarding a partial {type_name} row at row {row}. Input ended while reading {what}."
    );
}
