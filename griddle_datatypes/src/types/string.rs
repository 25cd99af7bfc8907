use crate::callback::{self, WriteCallback};
use crate::columns::{ColumnBytes, ColumnPtr};
use crate::{bulk, Column, DataType, DataTypePtr};
use griddle_types::serde::{BodyLen, Datum};
use griddle_types::{text, Error, Result};
use std::io::{BufRead, Read, Write};
use std::sync::Arc;


const NAME: &str = "String";

/// Arbitrary bytes of any length.
///
/// Binary layout: a [`BodyLen`], then the bytes.
#[derive(Default, Debug)]
pub struct DataTypeString;

impl DataTypeString {
    fn bytes<'a>(&self, dat: &'a Datum) -> Result<&'a [u8]> {
        dat.as_bytes()
            .ok_or_else(|| Error::type_mismatch(NAME, dat.kind()))
    }
}

impl DataType for DataTypeString {
    fn name(&self) -> String {
        NAME.to_string()
    }

    fn clone_type(&self) -> DataTypePtr {
        Arc::new(Self)
    }

    fn canonicalize(&self, dat: &Datum) -> Result<Datum> {
        Ok(Datum::Bytes(self.bytes(dat)?.to_vec()))
    }

    fn serialize_binary(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        let bytes = self.bytes(dat)?;
        BodyLen::from_body(NAME, bytes)?.ser(w)?;
        w.write_all(bytes)?;
        Ok(())
    }

    fn deserialize_binary(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let body_len = *BodyLen::deser(r, NAME)? as usize;
        let mut body = vec![];
        (&mut *r).take(body_len as u64).read_to_end(&mut body)?;
        if body.len() < body_len {
            return Err(Error::truncated(format!(
                "{NAME} body, {} of {body_len} bytes",
                body.len()
            )));
        }
        Ok(Datum::Bytes(body))
    }

    fn serialize_binary_bulk(
        &self,
        column: &dyn Column,
        w: &mut dyn Write,
        callback: Option<&mut dyn WriteCallback>,
    ) -> Result<()> {
        let col = match column.as_any().downcast_ref::<ColumnBytes>() {
            None => return bulk::serialize_rows(self, column, w, callback),
            Some(col) => col,
        };
        callback::for_each_run(col.len(), callback, |rows| {
            for row in rows {
                let bytes = col.row_bytes(row);
                BodyLen::from_body(NAME, bytes)?.ser(w)?;
                w.write_all(bytes)?;
            }
            Ok(())
        })
    }

    fn serialize_text(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        w.write_all(self.bytes(dat)?)?;
        Ok(())
    }
    fn deserialize_text(&self, r: &mut dyn BufRead) -> Result<Datum> {
        Ok(Datum::Bytes(text::read_raw(r)?))
    }

    fn serialize_text_escaped(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        text::write_escaped(w, self.bytes(dat)?)
    }
    fn deserialize_text_escaped(&self, r: &mut dyn BufRead) -> Result<Datum> {
        Ok(Datum::Bytes(text::read_escaped(r, NAME)?))
    }

    fn serialize_text_quoted(
        &self,
        dat: &Datum,
        w: &mut dyn Write,
        _compatible: bool,
    ) -> Result<()> {
        text::write_quoted(w, self.bytes(dat)?)
    }
    fn deserialize_text_quoted(&self, r: &mut dyn BufRead, _compatible: bool) -> Result<Datum> {
        Ok(Datum::Bytes(text::read_quoted(r, NAME)?))
    }

    fn create_column(&self) -> ColumnPtr {
        Box::new(ColumnBytes::default())
    }

    fn default_value(&self) -> Datum {
        Datum::Bytes(vec![])
    }
}
