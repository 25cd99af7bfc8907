use derive_more::Display;
use itertools::Itertools;
use std::fmt;

mod test;

/// A dynamically tagged single value.
#[derive(PartialEq, Clone, Debug)]
pub enum Datum {
    Null,
    U64(u64),
    I64(i64),
    F64(f64),
    Bytes(Vec<u8>),
    Array(Vec<Datum>),
    Tuple(Vec<Datum>),
}

/// The tag of a [`Datum`], without its payload.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Display, Debug)]
pub enum DatumKind {
    #[display(fmt = "Null")]
    Null,
    #[display(fmt = "U64")]
    U64,
    #[display(fmt = "I64")]
    I64,
    #[display(fmt = "F64")]
    F64,
    #[display(fmt = "Bytes")]
    Bytes,
    #[display(fmt = "Array")]
    Array,
    #[display(fmt = "Tuple")]
    Tuple,
}

impl From<&Datum> for DatumKind {
    fn from(dat: &Datum) -> Self {
        match dat {
            Datum::Null => DatumKind::Null,
            Datum::U64(_) => DatumKind::U64,
            Datum::I64(_) => DatumKind::I64,
            Datum::F64(_) => DatumKind::F64,
            Datum::Bytes(_) => DatumKind::Bytes,
            Datum::Array(_) => DatumKind::Array,
            Datum::Tuple(_) => DatumKind::Tuple,
        }
    }
}

impl Datum {
    pub fn kind(&self) -> DatumKind {
        DatumKind::from(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Datum::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_members(&self) -> Option<&[Datum]> {
        match self {
            Datum::Array(members) | Datum::Tuple(members) => Some(members),
            _ => None,
        }
    }
}

/* Shorthand constructors. Array and Tuple share a payload type, so they have none. */
impl From<u64> for Datum {
    fn from(u: u64) -> Self {
        Datum::U64(u)
    }
}
impl From<i64> for Datum {
    fn from(i: i64) -> Self {
        Datum::I64(i)
    }
}
impl From<f64> for Datum {
    fn from(f: f64) -> Self {
        Datum::F64(f)
    }
}
impl From<Vec<u8>> for Datum {
    fn from(b: Vec<u8>) -> Self {
        Datum::Bytes(b)
    }
}
impl From<&[u8]> for Datum {
    fn from(b: &[u8]) -> Self {
        Datum::Bytes(b.to_vec())
    }
}
impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Bytes(s.as_bytes().to_vec())
    }
}
impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Bytes(s.into_bytes())
    }
}
impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => Datum::Null,
            Some(t) => t.into(),
        }
    }
}

/// A diagnostic rendering, for logs and assertion messages.
/// Descriptors own the real text formats.
impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => write!(f, "NULL"),
            Datum::U64(u) => write!(f, "{u}"),
            Datum::I64(i) => write!(f, "{i}"),
            Datum::F64(x) => write!(f, "{x}"),
            Datum::Bytes(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
            Datum::Array(members) => write!(f, "[{}]", members.iter().join(", ")),
            Datum::Tuple(members) => write!(f, "({})", members.iter().join(", ")),
        }
    }
}
