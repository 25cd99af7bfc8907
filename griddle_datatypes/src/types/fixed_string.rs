use crate::callback::{self, WriteCallback};
use crate::columns::{ColumnFixedBytes, ColumnPtr};
use crate::{bulk, Column, DataType, DataTypePtr};
use griddle_types::serde::Datum;
use griddle_types::{io_utils, text, Error, Result};
use std::io::{BufRead, Write};
use std::sync::Arc;


/// The widest accepted `n`.
pub const MAX_FIXED_STRING_WIDTH: usize = 0xFF_FFFF;

/// Byte strings of exactly `n` bytes. Shorter values are zero-padded.
///
/// Binary layout: the `n` bytes, with no header.
/// Text forms carry all `n` bytes, padding included.
#[derive(Debug)]
pub struct DataTypeFixedString {
    n: usize,
}

impl DataTypeFixedString {
    /// # Panics
    ///
    /// If `n` is zero or exceeds [`MAX_FIXED_STRING_WIDTH`].
    pub fn new(n: usize) -> Self {
        assert!(
            (1..=MAX_FIXED_STRING_WIDTH).contains(&n),
            "FixedString width must be within 1..={MAX_FIXED_STRING_WIDTH}"
        );
        Self { n }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    fn padded(&self, dat: &Datum) -> Result<Vec<u8>> {
        match dat.as_bytes() {
            Some(bytes) if bytes.len() <= self.n => {
                let mut padded = bytes.to_vec();
                padded.resize(self.n, 0);
                Ok(padded)
            }
            _ => Err(Error::type_mismatch(self.name(), dat.kind())),
        }
    }

    /// Text longer than `n` is malformed rather than a mismatch, since it came from the stream.
    fn parse_text(&self, bytes: Vec<u8>) -> Result<Datum> {
        if bytes.len() > self.n {
            return Err(Error::malformed(
                self.name(),
                format!("{} bytes of text exceed the width", bytes.len()),
            ));
        }
        self.canonicalize(&Datum::Bytes(bytes))
    }
}

impl DataType for DataTypeFixedString {
    fn name(&self) -> String {
        format!("FixedString({})", self.n)
    }

    fn clone_type(&self) -> DataTypePtr {
        Arc::new(Self::new(self.n))
    }

    fn canonicalize(&self, dat: &Datum) -> Result<Datum> {
        Ok(Datum::Bytes(self.padded(dat)?))
    }

    fn serialize_binary(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        w.write_all(&self.padded(dat)?)?;
        Ok(())
    }

    fn deserialize_binary(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let mut buf = vec![0u8; self.n];
        io_utils::read_exact(r, &mut buf, &self.name())?;
        Ok(Datum::Bytes(buf))
    }

    fn serialize_binary_bulk(
        &self,
        column: &dyn Column,
        w: &mut dyn Write,
        callback: Option<&mut dyn WriteCallback>,
    ) -> Result<()> {
        let col = match column.as_any().downcast_ref::<ColumnFixedBytes>() {
            Some(col) if col.n() == self.n => col,
            _ => return bulk::serialize_rows(self, column, w, callback),
        };
        callback::for_each_run(col.len(), callback, |rows| {
            for row in rows {
                w.write_all(col.row_bytes(row))?;
            }
            Ok(())
        })
    }

    fn serialize_text(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        w.write_all(&self.padded(dat)?)?;
        Ok(())
    }
    fn deserialize_text(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.parse_text(text::read_raw(r)?)
    }

    fn serialize_text_escaped(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        text::write_escaped(w, &self.padded(dat)?)
    }
    fn deserialize_text_escaped(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.parse_text(text::read_escaped(r, &self.name())?)
    }

    fn serialize_text_quoted(
        &self,
        dat: &Datum,
        w: &mut dyn Write,
        _compatible: bool,
    ) -> Result<()> {
        text::write_quoted(w, &self.padded(dat)?)
    }
    fn deserialize_text_quoted(&self, r: &mut dyn BufRead, _compatible: bool) -> Result<Datum> {
        self.parse_text(text::read_quoted(r, &self.name())?)
    }

    fn create_column(&self) -> ColumnPtr {
        Box::new(ColumnFixedBytes::new(self.n))
    }

    fn default_value(&self) -> Datum {
        Datum::Bytes(vec![0; self.n])
    }

    fn size_of_field(&self) -> Result<usize> {
        Ok(self.n)
    }
}
