//! Text framing shared by the array-like and tuple-like descriptors.
//!
//! A composite is written as `open member,member,... close`, with each member in
//! its own quoted form. Raw, escaped and quoted modes all produce this same text.
//! In compatible quoted mode the text is further wrapped as one quoted string.

use griddle_types::serde::Datum;
use griddle_types::{io_utils, text, Error, Result};
use std::io::{BufRead, Cursor, Write};

pub(super) fn write_delimited(
    w: &mut dyn Write,
    open: u8,
    close: u8,
    members: &[Datum],
    mut write_member: impl FnMut(usize, &Datum, &mut dyn Write) -> Result<()>,
) -> Result<()> {
    w.write_all(&[open])?;
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        write_member(i, member, &mut *w)?;
    }
    w.write_all(&[close])?;
    Ok(())
}

/// Reads a delimited member list, skipping whitespace around every token.
pub(super) fn read_delimited(
    r: &mut dyn BufRead,
    open: u8,
    close: u8,
    type_name: &str,
    mut read_member: impl FnMut(usize, &mut dyn BufRead) -> Result<Datum>,
) -> Result<Vec<Datum>> {
    text::skip_whitespace(r)?;
    text::expect_byte(r, open, type_name)?;
    text::skip_whitespace(r)?;

    let mut members = vec![];
    if io_utils::peek_byte(r)? == Some(close) {
        r.consume(1);
        return Ok(members);
    }
    loop {
        text::skip_whitespace(r)?;
        members.push(read_member(members.len(), &mut *r)?);
        text::skip_whitespace(r)?;
        match text::next_byte(r)? {
            Some(b',') => {}
            Some(b) if b == close => return Ok(members),
            Some(b) => {
                return Err(Error::malformed(
                    type_name,
                    format!("expected ',' or {:?} but found {:?}", close as char, b as char),
                ))
            }
            None => return Err(Error::truncated(format!("{type_name}, member list"))),
        }
    }
}

pub(super) fn serialize_quoted_composite(
    w: &mut dyn Write,
    compatible: bool,
    write_body: impl FnOnce(&mut dyn Write) -> Result<()>,
) -> Result<()> {
    if !compatible {
        return write_body(w);
    }
    let mut body: Vec<u8> = vec![];
    write_body(&mut body)?;
    text::write_quoted(w, &body)
}

/// In compatible mode the literal must contain exactly one composite.
/// A literal that ends inside the composite is malformed, since the stream itself did not end.
pub(super) fn deserialize_quoted_composite(
    r: &mut dyn BufRead,
    compatible: bool,
    type_name: &str,
    read_body: impl FnOnce(&mut dyn BufRead) -> Result<Datum>,
) -> Result<Datum> {
    if !compatible {
        return read_body(r);
    }
    text::skip_whitespace(r)?;
    let body = text::read_quoted(r, type_name)?;
    let mut body_r = Cursor::new(body);
    let dat = read_body(&mut body_r).map_err(|e| match e {
        Error::TruncatedInput(what) => {
            Error::malformed(type_name, format!("quoted literal ended while reading {what}"))
        }
        e => e,
    })?;
    text::skip_whitespace(&mut body_r)?;
    if !io_utils::is_eof(&mut body_r)? {
        return Err(Error::malformed(
            type_name,
            "trailing characters in quoted literal",
        ));
    }
    Ok(dat)
}
