use super::helpers::{self, Mode, Shape, ROUND_TRIP_MODES};
use anyhow::{ensure, Result};
use griddle_datatypes::TypeRegistry;
use griddle_types::serde::Datum;
use griddle_types::{text, ErrorKind};
use std::io::Cursor;
use std::thread;

pub fn test_concrete_scenario(reg: &TypeRegistry) -> Result<()> {
    let ty = reg.get("UInt64")?;
    assert_eq!(Datum::U64(0), ty.default_value());
    assert_eq!(b"42".to_vec(), helpers::encode(ty.as_ref(), &Mode::Escaped, &Datum::U64(42))?);
    assert_eq!(
        Datum::U64(42),
        helpers::decode(ty.as_ref(), &Mode::Escaped, b"42".to_vec())?
    );
    assert_eq!(8, ty.size_of_field()?);

    let ty = reg.get("String")?;
    let dat = Datum::from("a\tb");
    let escaped = helpers::encode(ty.as_ref(), &Mode::Escaped, &dat)?;
    assert_eq!(b"a\\tb".to_vec(), escaped);
    assert_eq!(dat, helpers::decode(ty.as_ref(), &Mode::Escaped, escaped)?);
    assert_eq!(
        ErrorKind::NotImplemented,
        ty.size_of_field().unwrap_err().kind()
    );

    Ok(())
}

pub fn test_default_values(reg: &TypeRegistry) -> Result<()> {
    for shape in helpers::catalog_shapes() {
        let ty = helpers::resolve(reg, &shape)?;
        let default = ty.default_value();
        assert_eq!(default, ty.default_value());
        assert_eq!(default, ty.canonicalize(&default)?);

        for mode in ROUND_TRIP_MODES.iter() {
            let buf = helpers::encode(ty.as_ref(), mode, &default)?;
            assert_eq!(default, helpers::decode(ty.as_ref(), mode, buf)?, "{}", ty.name());
        }
        if !shape.is_composite() && !matches!(shape, Shape::Nullable(_)) {
            let buf = helpers::encode(ty.as_ref(), &Mode::Raw, &default)?;
            assert_eq!(default, helpers::decode(ty.as_ref(), &Mode::Raw, buf)?);
        }
    }
    Ok(())
}

/// Binary, escaped and quoted forms reproduce every value, including separators and quotes.
pub fn test_random_values(reg: &TypeRegistry) -> Result<()> {
    let mut rng = rand::thread_rng();

    let mut shapes = helpers::catalog_shapes();
    shapes.extend((0..30).map(|_| helpers::random_shape(&mut rng, 3)));

    for shape in shapes {
        let ty = helpers::resolve(reg, &shape)?;
        for _ in 0..20 {
            let dat = shape.random_datum(&mut rng);
            assert_eq!(dat, ty.canonicalize(&dat)?);

            for mode in ROUND_TRIP_MODES.iter() {
                let buf = helpers::encode(ty.as_ref(), mode, &dat)?;
                if let Mode::Escaped = mode {
                    ensure!(
                        !buf.contains(&b'\t') && !buf.contains(&b'\n'),
                        "{} wrote a raw separator",
                        ty.name()
                    );
                }
                let back = helpers::decode(ty.as_ref(), mode, buf)?;
                assert_eq!(dat, back, "{} {}", ty.name(), dat);
            }
        }
    }
    Ok(())
}

/// A consumer that knows only string literals recovers the non-compatible text.
pub fn test_compatible_quoting(reg: &TypeRegistry) -> Result<()> {
    let mut rng = rand::thread_rng();
    for shape in helpers::catalog_shapes() {
        if !shape.is_composite() {
            continue;
        }
        let ty = helpers::resolve(reg, &shape)?;
        for _ in 0..10 {
            let dat = shape.random_datum(&mut rng);
            let plain = helpers::encode(ty.as_ref(), &Mode::Quoted { compatible: false }, &dat)?;
            let compat = helpers::encode(ty.as_ref(), &Mode::Quoted { compatible: true }, &dat)?;
            let unquoted = text::read_quoted(&mut Cursor::new(compat), "String")?;
            assert_eq!(plain, unquoted);

            let escaped = helpers::encode(ty.as_ref(), &Mode::Escaped, &dat)?;
            assert_eq!(plain, escaped);
        }
    }

    let ty = reg.get("UInt8")?;
    let plain = helpers::encode(ty.as_ref(), &Mode::Quoted { compatible: false }, &Datum::U64(3))?;
    let compat = helpers::encode(ty.as_ref(), &Mode::Quoted { compatible: true }, &Datum::U64(3))?;
    assert_eq!(plain, compat);
    Ok(())
}

/// One descriptor instance serves many threads without coordination.
pub fn test_shared_across_threads(reg: &'static TypeRegistry) -> Result<()> {
    let ty = reg.get("Array(Tuple(Int32, String))")?;
    let handles = (0..4)
        .map(|i| {
            let ty = ty.clone();
            thread::spawn(move || -> Result<Vec<u8>> {
                let dat = Datum::Array(vec![Datum::Tuple(vec![Datum::I64(i), Datum::from("x")])]);
                let buf = helpers::encode(ty.as_ref(), &Mode::Binary, &dat)?;
                ensure!(dat == helpers::decode(ty.as_ref(), &Mode::Binary, buf.clone())?);
                Ok(buf)
            })
        })
        .collect::<Vec<_>>();

    for (i, handle) in handles.into_iter().enumerate() {
        let buf = handle.join().map_err(|_| anyhow::anyhow!("thread {i} panicked"))??;
        assert_eq!(4 + 4 + 4 + 1, buf.len());
        assert_eq!(i as u8, buf[4]);
    }

    let from_registry = reg.get(&ty.name())?;
    assert_eq!(ty.name(), from_registry.name());
    Ok(())
}
