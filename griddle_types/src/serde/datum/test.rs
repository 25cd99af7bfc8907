#[cfg(test)]
mod test {
    use super::super::*;

    #[test]
    fn kinds() {
        assert_eq!(DatumKind::Null, Datum::Null.kind());
        assert_eq!(DatumKind::U64, Datum::from(1u64).kind());
        assert_eq!(DatumKind::I64, Datum::from(-1i64).kind());
        assert_eq!(DatumKind::F64, Datum::from(0.5f64).kind());
        assert_eq!(DatumKind::Bytes, Datum::from("asdf").kind());
        assert_eq!(DatumKind::Array, Datum::Array(vec![]).kind());
        assert_eq!(DatumKind::Tuple, Datum::Tuple(vec![]).kind());

        assert_eq!("Bytes", DatumKind::Bytes.to_string());
    }

    #[test]
    fn optional_values() {
        assert_eq!(Datum::Null, Datum::from(None::<u64>));
        assert_eq!(Datum::U64(3), Datum::from(Some(3u64)));
        assert!(Datum::from(None::<&str>).is_null());
    }

    #[test]
    fn accessors() {
        let dat = Datum::from("zxcv");
        assert_eq!(Some(&b"zxcv"[..]), dat.as_bytes());
        assert_eq!(None, dat.as_members());

        let dat = Datum::Tuple(vec![Datum::U64(1), Datum::from("a")]);
        assert_eq!(2, dat.as_members().unwrap().len());
        assert_eq!(None, dat.as_bytes());
    }

    #[test]
    fn diagnostic_display() {
        let dat = Datum::Tuple(vec![
            Datum::I64(-5),
            Datum::Array(vec![Datum::from("a\tb"), Datum::Null]),
        ]);
        assert_eq!(r#"(-5, ["a\tb", NULL])"#, dat.to_string());
    }
}
