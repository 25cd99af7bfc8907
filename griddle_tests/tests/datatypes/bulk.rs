use super::helpers;
use anyhow::Result;
use griddle_datatypes::marks::SparseMarks;
use griddle_datatypes::{ColumnPtr, DataType, TypeRegistry};
use griddle_types::io_utils::CountingWriter;
use griddle_types::serde::Datum;
use griddle_types::ErrorKind;
use rand::Rng;
use std::io::{Cursor, Seek, SeekFrom};

fn random_column(ty: &dyn DataType, shape: &helpers::Shape, len: usize) -> Result<ColumnPtr> {
    let mut rng = rand::thread_rng();
    let mut col = ty.create_column();
    for _ in 0..len {
        col.push(&shape.random_datum(&mut rng))?;
    }
    Ok(col)
}

fn encode_column(ty: &dyn DataType, col: &ColumnPtr) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = vec![];
    ty.serialize_binary_bulk(col.as_ref(), &mut buf, None)?;
    Ok(buf)
}

pub fn test_column_identity(reg: &TypeRegistry) -> Result<()> {
    let mut rng = rand::thread_rng();
    for shape in helpers::catalog_shapes() {
        let ty = helpers::resolve(reg, &shape)?;
        for len in [0, 1, rng.gen_range(2..300)] {
            let col = random_column(ty.as_ref(), &shape, len)?;
            let buf = encode_column(ty.as_ref(), &col)?;

            let mut back = ty.create_column();
            let n = ty.deserialize_binary_bulk(back.as_mut(), &mut Cursor::new(buf), len)?;
            assert_eq!(len, n);
            assert!(*col == *back, "{}", ty.name());
        }

        let konst = ty.create_const_column(3, &ty.default_value())?;
        let buf = encode_column(ty.as_ref(), &konst)?;
        let mut back = ty.create_column();
        ty.deserialize_binary_bulk(back.as_mut(), &mut Cursor::new(buf), usize::MAX)?;
        assert!(*konst == *back, "{}", ty.name());
    }
    Ok(())
}

/// Triggers fire exactly at the requested rows, and never change the output.
pub fn test_callback_firing_order(reg: &TypeRegistry) -> Result<()> {
    let mut rng = rand::thread_rng();
    for shape in helpers::catalog_shapes() {
        let ty = helpers::resolve(reg, &shape)?;
        let len = rng.gen_range(1..200);
        let col = random_column(ty.as_ref(), &shape, len)?;
        let plain = encode_column(ty.as_ref(), &col)?;

        let mut triggers = (1..len).filter(|_| rng.gen_bool(0.1)).collect::<Vec<_>>();
        let mut expected = vec![0];
        expected.extend(triggers.iter().copied());
        triggers.push(len + 5);

        let mut fired: Vec<usize> = vec![];
        let mut next = triggers.into_iter();
        let mut callback = |rows_written: usize| {
            fired.push(rows_written);
            next.next().unwrap_or(usize::MAX)
        };
        let mut buf: Vec<u8> = vec![];
        ty.serialize_binary_bulk(col.as_ref(), &mut buf, Some(&mut callback))?;

        assert_eq!(expected, fired);
        assert_eq!(plain, buf);
    }
    Ok(())
}

/// A stream that ends inside a row loses only that row.
/// A malformed row fails the call, and the rows before it stay.
pub fn test_partial_streams(reg: &TypeRegistry) -> Result<()> {
    let ty = reg.get("Array(String)")?;
    let shape = helpers::Shape::Array(Box::new(helpers::Shape::String));
    let col = random_column(ty.as_ref(), &shape, 10)?;
    let buf = encode_column(ty.as_ref(), &col)?;

    let mut first_rows = ty.create_column();
    let one_row_len = encode_column(ty.as_ref(), &{
        let mut c = ty.create_column();
        c.push(&col.get(0))?;
        c
    })?
    .len();
    let cut = &buf[..one_row_len + 2];
    let n = ty.deserialize_binary_bulk(first_rows.as_mut(), &mut Cursor::new(cut.to_vec()), 10)?;
    assert_eq!(1, n);
    assert_eq!(col.get(0), first_rows.get(0));

    let ty = reg.get("Nullable(UInt8)")?;
    let bytes = vec![0, 7, 1, 0, 9, 5, 0, 11];
    let mut col = ty.create_column();
    let err = ty
        .deserialize_binary_bulk(col.as_mut(), &mut Cursor::new(bytes), 10)
        .unwrap_err();
    assert_eq!(ErrorKind::MalformedEncoding, err.kind());
    assert_eq!(3, col.len());
    assert_eq!(
        vec![Datum::U64(7), Datum::Null, Datum::U64(9)],
        (0..3).map(|row| col.get(row)).collect::<Vec<_>>()
    );
    Ok(())
}

/// Any granule can be decoded by seeking to its mark.
pub fn test_sparse_marks(reg: &TypeRegistry) -> Result<()> {
    let mut rng = rand::thread_rng();
    for shape in helpers::catalog_shapes() {
        let ty = helpers::resolve(reg, &shape)?;
        let len = rng.gen_range(50..400);
        let col = random_column(ty.as_ref(), &shape, len)?;

        let mut w = CountingWriter::new(Vec::<u8>::new());
        let mut marks = SparseMarks::with_granularity(w.counter(), 32);
        ty.serialize_binary_bulk(col.as_ref(), &mut w, Some(&mut marks))?;
        let buf = w.into_inner();
        assert_eq!((len + 31) / 32, marks.marks().len());

        let row = rng.gen_range(0..len);
        let mark = *marks.nearest_preceding(row).unwrap();
        let mut r = Cursor::new(buf);
        r.seek(SeekFrom::Start(mark.offset))?;

        let mut granule = ty.create_column();
        let n = ty.deserialize_binary_bulk(granule.as_mut(), &mut r, marks.granularity())?;
        assert_eq!(std::cmp::min(32, len - mark.row), n);
        assert_eq!(col.get(row), granule.get(row - mark.row), "{}", ty.name());
    }
    Ok(())
}
