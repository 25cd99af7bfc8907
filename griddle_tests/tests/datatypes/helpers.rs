use anyhow::Result;
use griddle_datatypes::{DataType, TypeRegistry};
use griddle_types::io_utils;
use griddle_types::serde::Datum;
use itertools::Itertools;
use rand::Rng;
use std::io::{BufRead, Cursor, Write};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Test-side description of a type, used to name it and to generate values for it.
#[derive(Clone, Debug)]
pub enum Shape {
    UInt(u32),
    Int(u32),
    Float32,
    Float64,
    String,
    FixedString(usize),
    Array(Box<Shape>),
    Tuple(Vec<Shape>),
    Nullable(Box<Shape>),
}

impl Shape {
    pub fn name(&self) -> String {
        match self {
            Shape::UInt(bits) => format!("UInt{bits}"),
            Shape::Int(bits) => format!("Int{bits}"),
            Shape::Float32 => "Float32".into(),
            Shape::Float64 => "Float64".into(),
            Shape::String => "String".into(),
            Shape::FixedString(n) => format!("FixedString({n})"),
            Shape::Array(nested) => format!("Array({})", nested.name()),
            Shape::Tuple(members) => {
                format!("Tuple({})", members.iter().map(|m| m.name()).join(", "))
            }
            Shape::Nullable(nested) => format!("Nullable({})", nested.name()),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Shape::Array(_) | Shape::Tuple(_))
    }

    /// A canonical value, i.e. already in the form the type decodes to.
    pub fn random_datum(&self, rng: &mut impl Rng) -> Datum {
        match self {
            Shape::UInt(64) => Datum::U64(rng.gen()),
            Shape::UInt(bits) => Datum::U64(rng.gen_range(0..1u64 << bits)),
            Shape::Int(64) => Datum::I64(rng.gen()),
            Shape::Int(bits) => {
                let half = 1i64 << (bits - 1);
                Datum::I64(rng.gen_range(-half..half))
            }
            Shape::Float32 => Datum::F64(random_f32(rng) as f64),
            Shape::Float64 => Datum::F64(random_f64(rng)),
            Shape::String => {
                let len = rng.gen_range(0..12);
                Datum::Bytes(random_bytes(rng, len))
            }
            Shape::FixedString(n) => {
                let len = rng.gen_range(0..=*n);
                let mut bytes = random_bytes(rng, len);
                bytes.resize(*n, 0);
                Datum::Bytes(bytes)
            }
            Shape::Array(nested) => {
                let len = rng.gen_range(0..4);
                Datum::Array((0..len).map(|_| nested.random_datum(rng)).collect())
            }
            Shape::Tuple(members) => {
                Datum::Tuple(members.iter().map(|m| m.random_datum(rng)).collect())
            }
            Shape::Nullable(nested) => match rng.gen_bool(0.3) {
                true => Datum::Null,
                false => nested.random_datum(rng),
            },
        }
    }
}

pub fn scalar_shapes() -> Vec<Shape> {
    let mut shapes = vec![];
    for bits in [8, 16, 32, 64] {
        shapes.push(Shape::UInt(bits));
        shapes.push(Shape::Int(bits));
    }
    shapes.push(Shape::Float32);
    shapes.push(Shape::Float64);
    shapes.push(Shape::String);
    shapes.push(Shape::FixedString(1));
    shapes.push(Shape::FixedString(5));
    shapes
}

pub fn random_shape(rng: &mut impl Rng, depth: usize) -> Shape {
    let scalars = scalar_shapes();
    if depth == 0 || rng.gen_bool(0.4) {
        return scalars[rng.gen_range(0..scalars.len())].clone();
    }
    match rng.gen_range(0..3) {
        0 => Shape::Array(Box::new(random_shape(rng, depth - 1))),
        1 => {
            let len = rng.gen_range(1..4);
            Shape::Tuple((0..len).map(|_| random_shape(rng, depth - 1)).collect())
        }
        _ => {
            let mut nested = random_shape(rng, depth - 1);
            while let Shape::Nullable(_) = nested {
                nested = random_shape(rng, depth - 1);
            }
            Shape::Nullable(Box::new(nested))
        }
    }
}

/// Every scalar, and a fixed set of composites over them.
pub fn catalog_shapes() -> Vec<Shape> {
    let mut shapes = scalar_shapes();
    shapes.push(Shape::Array(Box::new(Shape::String)));
    shapes.push(Shape::Array(Box::new(Shape::Array(Box::new(Shape::Int(32))))));
    shapes.push(Shape::Tuple(vec![Shape::UInt(8), Shape::String, Shape::Float64]));
    shapes.push(Shape::Nullable(Box::new(Shape::String)));
    shapes.push(Shape::Nullable(Box::new(Shape::Float32)));
    shapes.push(Shape::Array(Box::new(Shape::Nullable(Box::new(Shape::FixedString(3))))));
    shapes.push(Shape::Nullable(Box::new(Shape::Tuple(vec![
        Shape::Array(Box::new(Shape::UInt(16))),
        Shape::Int(64),
    ]))));
    shapes
}

fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    const INTERESTING: &[u8] = b"\t\n\r\0\x08\x0c'\\,()[]NUL ";
    (0..len)
        .map(|_| match rng.gen_bool(0.5) {
            true => INTERESTING[rng.gen_range(0..INTERESTING.len())],
            false => rng.gen(),
        })
        .collect()
}

fn random_f32(rng: &mut impl Rng) -> f32 {
    match rng.gen_range(0..4) {
        0 => 0.0,
        1 => rng.gen_range(-1000..1000) as f32 / 8.0,
        2 => f32::INFINITY,
        _ => rng.gen::<f32>() * 1e6 - 5e5,
    }
}

fn random_f64(rng: &mut impl Rng) -> f64 {
    match rng.gen_range(0..4) {
        0 => -0.5,
        1 => rng.gen::<f64>() * 1e-9,
        2 => f64::NEG_INFINITY,
        _ => rng.gen::<f64>() * 1e15 - 5e14,
    }
}

/* Encoders and decoders over in-memory buffers. */

pub enum Mode {
    Binary,
    Raw,
    Escaped,
    Quoted { compatible: bool },
}

pub const ROUND_TRIP_MODES: [Mode; 4] = [
    Mode::Binary,
    Mode::Escaped,
    Mode::Quoted { compatible: false },
    Mode::Quoted { compatible: true },
];

pub fn encode(ty: &dyn DataType, mode: &Mode, dat: &Datum) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = vec![];
    let w: &mut dyn Write = &mut buf;
    match mode {
        Mode::Binary => ty.serialize_binary(dat, w)?,
        Mode::Raw => ty.serialize_text(dat, w)?,
        Mode::Escaped => ty.serialize_text_escaped(dat, w)?,
        Mode::Quoted { compatible } => ty.serialize_text_quoted(dat, w, *compatible)?,
    }
    Ok(buf)
}

/// Decodes one value, and requires that it spans the whole buffer.
pub fn decode(ty: &dyn DataType, mode: &Mode, buf: Vec<u8>) -> Result<Datum> {
    let mut cursor = Cursor::new(buf);
    let r: &mut dyn BufRead = &mut cursor;
    let dat = match mode {
        Mode::Binary => ty.deserialize_binary(r)?,
        Mode::Raw => ty.deserialize_text(r)?,
        Mode::Escaped => ty.deserialize_text_escaped(r)?,
        Mode::Quoted { compatible } => ty.deserialize_text_quoted(r, *compatible)?,
    };
    anyhow::ensure!(io_utils::is_eof(r)?, "{} left bytes unread", ty.name());
    Ok(dat)
}

pub fn resolve(reg: &TypeRegistry, shape: &Shape) -> Result<griddle_datatypes::DataTypePtr> {
    let ty = reg.get(&shape.name())?;
    anyhow::ensure!(ty.name() == shape.name());
    log::debug!("Exercising {}", ty.name());
    Ok(ty)
}
