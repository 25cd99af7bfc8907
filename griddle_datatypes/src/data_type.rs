use crate::bulk;
use crate::callback::WriteCallback;
use crate::columns::{ColumnConst, ColumnPtr};
use crate::Column;
use griddle_types::serde::Datum;
use griddle_types::{Error, Result};
use std::fmt::Debug;
use std::io::{BufRead, Write};
use std::sync::Arc;

pub type DataTypePtr = Arc<dyn DataType>;
pub type DataTypes = Vec<DataTypePtr>;

/// The metadata of a stored value type, and its de/serialization contract.
///
/// Descriptors are immutable. Every method takes `&self`, so one instance is
/// shared across all columns and threads that use the type.
///
/// Binary encodings carry no type tag: a reader must know the type in order to
/// find where a value ends. Text comes in three flavors:
/// - raw ([`serialize_text`](DataType::serialize_text)), for display; not escaped nor quoted.
/// - escaped, for tab-separated interchange; never contains a raw `\t` or `\n`.
/// - quoted, for embedding as a literal in a query.
pub trait DataType: Send + Sync + Debug {
    /// The canonical name, e.g. `UInt64` or `Array(String)`.
    fn name(&self) -> String;

    fn is_numeric(&self) -> bool {
        false
    }

    fn clone_type(&self) -> DataTypePtr;

    /// Validates `dat` against this type and returns its canonical form,
    /// i.e. the value that [`deserialize_binary`](DataType::deserialize_binary) would produce after a round-trip.
    fn canonicalize(&self, dat: &Datum) -> Result<Datum>;

    /* Binary, one value. */

    fn serialize_binary(&self, dat: &Datum, w: &mut dyn Write) -> Result<()>;

    /// Consumes exactly the bytes of one value.
    fn deserialize_binary(&self, r: &mut dyn BufRead) -> Result<Datum>;

    /* Binary, whole column. */

    /// Writes every row in order.
    ///
    /// If a `callback` is supplied, it is called before row 0, and then again before
    /// each row whose index it returned. See [`crate::callback`].
    fn serialize_binary_bulk(
        &self,
        column: &dyn Column,
        w: &mut dyn Write,
        callback: Option<&mut dyn WriteCallback>,
    ) -> Result<()> {
        bulk::serialize_rows(self, column, w, callback)
    }

    /// Appends at most `limit` rows, and returns how many were appended.
    ///
    /// Fewer than `limit` are appended only at the end of the stream. A row cut short by
    /// the end of the stream is discarded. On a malformed row the error is returned and
    /// the rows appended before it stay in the column.
    fn deserialize_binary_bulk(
        &self,
        column: &mut dyn Column,
        r: &mut dyn BufRead,
        limit: usize,
    ) -> Result<usize> {
        bulk::deserialize_rows(self, column, r, limit)
    }

    /* Text. */

    fn serialize_text(&self, dat: &Datum, w: &mut dyn Write) -> Result<()>;
    fn deserialize_text(&self, r: &mut dyn BufRead) -> Result<Datum>;

    fn serialize_text_escaped(&self, dat: &Datum, w: &mut dyn Write) -> Result<()>;
    fn deserialize_text_escaped(&self, r: &mut dyn BufRead) -> Result<Datum>;

    /// With `compatible`, array- and tuple-like values are additionally written as a
    /// string literal, so a consumer that knows only strings can load the dump.
    fn serialize_text_quoted(&self, dat: &Datum, w: &mut dyn Write, compatible: bool)
        -> Result<()>;
    fn deserialize_text_quoted(&self, r: &mut dyn BufRead, compatible: bool) -> Result<Datum>;

    /* Columns and values. */

    fn create_column(&self) -> ColumnPtr;

    /// A column of `len` rows that all equal `dat`.
    fn create_const_column(&self, len: usize, dat: &Datum) -> Result<ColumnPtr> {
        let value = self.canonicalize(dat)?;
        Ok(Box::new(ColumnConst::new(len, value)))
    }

    fn default_value(&self) -> Datum;

    /// The approximate size of one value in memory, for estimation.
    ///
    /// Types without a meaningful fixed size return [`Error::NotImplemented`].
    /// Callers probe for it with [`Error::kind`](griddle_types::Error::kind).
    fn size_of_field(&self) -> Result<usize> {
        Err(Error::not_implemented(self.name(), "size_of_field()"))
    }
}
