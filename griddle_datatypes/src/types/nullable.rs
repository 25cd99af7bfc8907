use crate::columns::{ColumnNullable, ColumnPtr};
use crate::{DataType, DataTypePtr};
use griddle_types::serde::Datum;
use griddle_types::text::{self, LiteralMatch};
use griddle_types::{io_utils, Error, Result};
use std::io::{BufRead, Read, Write};
use std::sync::Arc;


const NULL_FLAG: u8 = 1;
const PRESENT_FLAG: u8 = 0;

/// `NULL` in raw and quoted text.
const NULL_LITERAL: &[u8] = b"NULL";
/// `\N` in escaped text.
const NULL_ESCAPED: &[u8] = b"\\N";

/// A nested type extended with a null value.
///
/// Binary layout: a flag byte (`1` for null, `0` otherwise), then the nested value if not null.
#[derive(Debug)]
pub struct DataTypeNullable {
    nested: DataTypePtr,
}

impl DataTypeNullable {
    pub fn new(nested: DataTypePtr) -> Self {
        Self { nested }
    }

    pub fn nested(&self) -> &DataTypePtr {
        &self.nested
    }

    fn write_text_or(
        &self,
        dat: &Datum,
        w: &mut dyn Write,
        null: &[u8],
        write_nested: impl FnOnce(&mut dyn Write) -> Result<()>,
    ) -> Result<()> {
        match dat {
            Datum::Null => {
                w.write_all(null)?;
                Ok(())
            }
            _ => write_nested(w),
        }
    }

    /// On a partial match, the consumed bytes are replayed ahead of the stream for the nested type.
    fn read_text_or(
        &self,
        r: &mut dyn BufRead,
        null: &[u8],
        read_nested: impl FnOnce(&mut dyn BufRead) -> Result<Datum>,
    ) -> Result<Datum> {
        match text::match_literal(r, null)? {
            LiteralMatch::Matched => Ok(Datum::Null),
            LiteralMatch::Unmatched(consumed) if consumed.is_empty() => read_nested(r),
            LiteralMatch::Unmatched(consumed) => {
                let mut replayed = (&consumed[..]).chain(&mut *r);
                read_nested(&mut replayed)
            }
        }
    }
}

impl DataType for DataTypeNullable {
    fn name(&self) -> String {
        format!("Nullable({})", self.nested.name())
    }

    fn is_numeric(&self) -> bool {
        self.nested.is_numeric()
    }

    fn clone_type(&self) -> DataTypePtr {
        Arc::new(Self::new(self.nested.clone_type()))
    }

    fn canonicalize(&self, dat: &Datum) -> Result<Datum> {
        match dat {
            Datum::Null => Ok(Datum::Null),
            dat => self.nested.canonicalize(dat),
        }
    }

    fn serialize_binary(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        match dat {
            Datum::Null => w.write_all(&[NULL_FLAG])?,
            dat => {
                let value = self.nested.canonicalize(dat)?;
                w.write_all(&[PRESENT_FLAG])?;
                self.nested.serialize_binary(&value, w)?;
            }
        }
        Ok(())
    }

    fn deserialize_binary(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let mut flag = [0u8; 1];
        io_utils::read_exact(r, &mut flag, &self.name())?;
        match flag[0] {
            NULL_FLAG => Ok(Datum::Null),
            PRESENT_FLAG => self.nested.deserialize_binary(r),
            other => Err(Error::malformed(
                self.name(),
                format!("invalid null flag {other:#04x}"),
            )),
        }
    }

    fn serialize_text(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        self.write_text_or(dat, w, NULL_LITERAL, |w| self.nested.serialize_text(dat, w))
    }
    fn deserialize_text(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.read_text_or(r, NULL_LITERAL, |r| self.nested.deserialize_text(r))
    }

    fn serialize_text_escaped(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        self.write_text_or(dat, w, NULL_ESCAPED, |w| {
            self.nested.serialize_text_escaped(dat, w)
        })
    }
    fn deserialize_text_escaped(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.read_text_or(r, NULL_ESCAPED, |r| self.nested.deserialize_text_escaped(r))
    }

    fn serialize_text_quoted(&self, dat: &Datum, w: &mut dyn Write, compatible: bool) -> Result<()> {
        self.write_text_or(dat, w, NULL_LITERAL, |w| {
            self.nested.serialize_text_quoted(dat, w, compatible)
        })
    }
    fn deserialize_text_quoted(&self, r: &mut dyn BufRead, compatible: bool) -> Result<Datum> {
        self.read_text_or(r, NULL_LITERAL, |r| {
            self.nested.deserialize_text_quoted(r, compatible)
        })
    }

    fn create_column(&self) -> ColumnPtr {
        Box::new(ColumnNullable::new(
            self.nested.create_column(),
            self.nested.default_value(),
        ))
    }

    fn default_value(&self) -> Datum {
        Datum::Null
    }

    /// The flag byte plus the nested size.
    fn size_of_field(&self) -> Result<usize> {
        Ok(1 + self.nested.size_of_field()?)
    }
}
