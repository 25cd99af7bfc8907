use crate::callback::{self, WriteCallback};
use crate::columns::{ColumnPtr, ColumnVector};
use crate::{bulk, Column, DataType, DataTypePtr};
use griddle_types::serde::Datum;
use griddle_types::{io_utils, text, Error, Result};
use num_traits::{Float, FromPrimitive, Zero};
use std::cmp;
use std::fmt::{self, Debug, Display};
use std::io::{BufRead, Write};
use std::marker::PhantomData;
use std::mem;
use std::str::{self, FromStr};
use std::sync::Arc;


/// The widest supported number, in bytes.
const MAX_WIDTH: usize = 8;

/// Rows decoded per read in the contiguous bulk path.
const BULK_READ_ROWS: usize = 4096;

/// A primitive number that a [`DataTypeNumber`] stores.
pub trait Number:
    Copy + PartialEq + Default + Debug + Display + FromStr + FromPrimitive + Zero + Send + Sync + 'static
{
    const NAME: &'static str;
    const WIDTH: usize = mem::size_of::<Self>();

    fn extend_le(self, buf: &mut Vec<u8>);
    /// `bytes` is exactly [`Self::WIDTH`](Number::WIDTH) long.
    fn from_le(bytes: &[u8]) -> Self;

    /// Narrows `dat` into `Self`. `None` if the kind is unacceptable or the value does not fit.
    fn from_datum(dat: &Datum) -> Option<Self>;
    fn to_datum(self) -> Datum;

    /// Whether `b` may appear in the text form.
    fn is_text_byte(b: u8) -> bool;
}

macro_rules! impl_number {
    ($t:ty, $name:literal, $variant:ident, $wide:ty, $from_datum:expr, $is_text_byte:expr) => {
        impl Number for $t {
            const NAME: &'static str = $name;

            fn extend_le(self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }
            fn from_le(bytes: &[u8]) -> Self {
                let mut arr = [0u8; mem::size_of::<$t>()];
                arr.copy_from_slice(bytes);
                <$t>::from_le_bytes(arr)
            }
            fn from_datum(dat: &Datum) -> Option<Self> {
                $from_datum(dat)
            }
            fn to_datum(self) -> Datum {
                Datum::$variant(self as $wide)
            }
            fn is_text_byte(b: u8) -> bool {
                $is_text_byte(b)
            }
        }
    };
}

fn integer_from_datum<T: FromPrimitive>(dat: &Datum) -> Option<T> {
    match dat {
        Datum::U64(u) => T::from_u64(*u),
        Datum::I64(i) => T::from_i64(*i),
        _ => None,
    }
}
/// A finite value that would overflow to infinity does not fit.
fn float_from_datum<T: Float + FromPrimitive>(dat: &Datum) -> Option<T> {
    match dat {
        Datum::F64(f) => T::from_f64(*f).filter(|t| t.is_finite() || !f.is_finite()),
        Datum::U64(u) => T::from_u64(*u),
        Datum::I64(i) => T::from_i64(*i),
        _ => None,
    }
}
fn is_integer_text_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'-' || b == b'+'
}
/// Also covers exponents, `inf` and `NaN`.
fn is_float_text_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'+' || b == b'.'
}

impl_number!(u8, "UInt8", U64, u64, integer_from_datum, is_integer_text_byte);
impl_number!(u16, "UInt16", U64, u64, integer_from_datum, is_integer_text_byte);
impl_number!(u32, "UInt32", U64, u64, integer_from_datum, is_integer_text_byte);
impl_number!(u64, "UInt64", U64, u64, integer_from_datum, is_integer_text_byte);
impl_number!(i8, "Int8", I64, i64, integer_from_datum, is_integer_text_byte);
impl_number!(i16, "Int16", I64, i64, integer_from_datum, is_integer_text_byte);
impl_number!(i32, "Int32", I64, i64, integer_from_datum, is_integer_text_byte);
impl_number!(i64, "Int64", I64, i64, integer_from_datum, is_integer_text_byte);
impl_number!(f32, "Float32", F64, f64, float_from_datum, is_float_text_byte);
impl_number!(f64, "Float64", F64, f64, float_from_datum, is_float_text_byte);

/// A fixed-width number type. Binary is little-endian; text is decimal in every mode.
pub struct DataTypeNumber<T> {
    _phant: PhantomData<T>,
}

pub type DataTypeUInt8 = DataTypeNumber<u8>;
pub type DataTypeUInt16 = DataTypeNumber<u16>;
pub type DataTypeUInt32 = DataTypeNumber<u32>;
pub type DataTypeUInt64 = DataTypeNumber<u64>;
pub type DataTypeInt8 = DataTypeNumber<i8>;
pub type DataTypeInt16 = DataTypeNumber<i16>;
pub type DataTypeInt32 = DataTypeNumber<i32>;
pub type DataTypeInt64 = DataTypeNumber<i64>;
pub type DataTypeFloat32 = DataTypeNumber<f32>;
pub type DataTypeFloat64 = DataTypeNumber<f64>;

impl<T: Number> DataTypeNumber<T> {
    pub fn new() -> Self {
        Self {
            _phant: PhantomData,
        }
    }

    fn narrow(&self, dat: &Datum) -> Result<T> {
        T::from_datum(dat).ok_or_else(|| Error::type_mismatch(T::NAME, dat.kind()))
    }

    fn write_text(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        let t = self.narrow(dat)?;
        write!(w, "{t}")?;
        Ok(())
    }

    fn read_text(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let tok = text::read_token(r, T::is_text_byte)?;
        if tok.is_empty() {
            return match io_utils::is_eof(r)? {
                true => Err(Error::truncated(T::NAME)),
                false => Err(Error::malformed(T::NAME, "expected a number")),
            };
        }
        let t = str::from_utf8(&tok)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .ok_or_else(|| {
                Error::malformed(
                    T::NAME,
                    format!("cannot parse {:?}", String::from_utf8_lossy(&tok)),
                )
            })?;
        Ok(t.to_datum())
    }
}

impl<T: Number> Default for DataTypeNumber<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> Debug for DataTypeNumber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataType({})", T::NAME)
    }
}

impl<T: Number> DataType for DataTypeNumber<T> {
    fn name(&self) -> String {
        T::NAME.to_string()
    }

    fn is_numeric(&self) -> bool {
        true
    }

    fn clone_type(&self) -> DataTypePtr {
        Arc::new(Self::new())
    }

    fn canonicalize(&self, dat: &Datum) -> Result<Datum> {
        Ok(self.narrow(dat)?.to_datum())
    }

    fn serialize_binary(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        let mut buf = Vec::with_capacity(T::WIDTH);
        self.narrow(dat)?.extend_le(&mut buf);
        w.write_all(&buf)?;
        Ok(())
    }

    fn deserialize_binary(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let mut buf = [0u8; MAX_WIDTH];
        let buf = &mut buf[..T::WIDTH];
        io_utils::read_exact(r, buf, T::NAME)?;
        Ok(T::from_le(buf).to_datum())
    }

    /// Each run between callback triggers is written as one contiguous buffer.
    fn serialize_binary_bulk(
        &self,
        column: &dyn Column,
        w: &mut dyn Write,
        callback: Option<&mut dyn WriteCallback>,
    ) -> Result<()> {
        let vec = match column.as_any().downcast_ref::<ColumnVector<T>>() {
            None => return bulk::serialize_rows(self, column, w, callback),
            Some(vec) => vec,
        };
        let mut buf: Vec<u8> = vec![];
        callback::for_each_run(vec.len(), callback, |rows| {
            buf.clear();
            for t in &vec[rows] {
                t.extend_le(&mut buf);
            }
            w.write_all(&buf)?;
            Ok(())
        })
    }

    fn deserialize_binary_bulk(
        &self,
        column: &mut dyn Column,
        r: &mut dyn BufRead,
        limit: usize,
    ) -> Result<usize> {
        let vec = match column.as_any_mut().downcast_mut::<ColumnVector<T>>() {
            None => return bulk::deserialize_rows(self, column, r, limit),
            Some(vec) => vec,
        };

        let mut buf = vec![0u8; cmp::min(limit, BULK_READ_ROWS) * T::WIDTH];
        let mut appended = 0;
        while appended < limit {
            let want_rows = cmp::min(limit - appended, BULK_READ_ROWS);
            let want = &mut buf[..want_rows * T::WIDTH];
            let r_len = io_utils::read_up_to(r, want)?;

            let got_rows = r_len / T::WIDTH;
            vec.extend(want[..got_rows * T::WIDTH].chunks_exact(T::WIDTH).map(T::from_le));
            appended += got_rows;

            if r_len < want.len() {
                if r_len % T::WIDTH != 0 {
                    bulk::log_partial_row(T::NAME, vec.len(), T::NAME);
                }
                break;
            }
        }
        Ok(appended)
    }

    fn serialize_text(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        self.write_text(dat, w)
    }
    fn deserialize_text(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.read_text(r)
    }

    fn serialize_text_escaped(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        self.write_text(dat, w)
    }
    fn deserialize_text_escaped(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.read_text(r)
    }

    fn serialize_text_quoted(
        &self,
        dat: &Datum,
        w: &mut dyn Write,
        _compatible: bool,
    ) -> Result<()> {
        self.write_text(dat, w)
    }
    fn deserialize_text_quoted(&self, r: &mut dyn BufRead, _compatible: bool) -> Result<Datum> {
        self.read_text(r)
    }

    fn create_column(&self) -> ColumnPtr {
        Box::new(ColumnVector::<T>::default())
    }

    fn default_value(&self) -> Datum {
        T::zero().to_datum()
    }

    fn size_of_field(&self) -> Result<usize> {
        Ok(T::WIDTH)
    }
}
