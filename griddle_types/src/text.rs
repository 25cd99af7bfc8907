//! Text escaping and quoting shared by every type's text formats.
//!
//! Escaped text replaces each of the bytes below with a backslash and a letter,
//! so that an escaped value never contains a raw field (`\t`) or row (`\n`) separator.
//!
//! ```text
//! \\  \t  \n  \r  \0  \b  \f  \'
//! ```
//!
//! Parsers also accept `\xHH`, and read any other `\c` as `c`.
//! Quoted text is escaped text between single quotes.

use crate::io_utils;
use crate::{Error, Result};
use std::io::{BufRead, Write};


pub const QUOTE: u8 = b'\'';

fn escape_char(b: u8) -> Option<u8> {
    match b {
        b'\\' => Some(b'\\'),
        b'\t' => Some(b't'),
        b'\n' => Some(b'n'),
        b'\r' => Some(b'r'),
        b'\0' => Some(b'0'),
        0x08 => Some(b'b'),
        0x0c => Some(b'f'),
        QUOTE => Some(QUOTE),
        _ => None,
    }
}

fn unescape_char(c: u8) -> u8 {
    match c {
        b't' => b'\t',
        b'n' => b'\n',
        b'r' => b'\r',
        b'0' => b'\0',
        b'b' => 0x08,
        b'f' => 0x0c,
        other => other,
    }
}

fn is_field_terminator(b: u8) -> bool {
    b == b'\t' || b == b'\n'
}

/* Writing. */

pub fn write_escaped(w: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    let mut run_start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if let Some(esc) = escape_char(b) {
            w.write_all(&bytes[run_start..i])?;
            w.write_all(&[b'\\', esc])?;
            run_start = i + 1;
        }
    }
    w.write_all(&bytes[run_start..])?;
    Ok(())
}

pub fn write_quoted(w: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    w.write_all(&[QUOTE])?;
    write_escaped(w, bytes)?;
    w.write_all(&[QUOTE])?;
    Ok(())
}

/* Reading. */

/// Consumes and returns one byte, or `None` at end of stream.
pub fn next_byte(r: &mut dyn BufRead) -> Result<Option<u8>> {
    let b = io_utils::peek_byte(r)?;
    if b.is_some() {
        r.consume(1);
    }
    Ok(b)
}

pub fn expect_byte(r: &mut dyn BufRead, expected: u8, type_name: &str) -> Result<()> {
    match next_byte(r)? {
        None => Err(Error::truncated(format!(
            "{type_name}, expecting {:?}",
            expected as char
        ))),
        Some(b) if b == expected => Ok(()),
        Some(b) => Err(Error::malformed(
            type_name,
            format!("expected {:?} but found {:?}", expected as char, b as char),
        )),
    }
}

pub fn skip_whitespace(r: &mut dyn BufRead) -> Result<()> {
    loop {
        let buf = r.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        let ws_len = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let buf_len = buf.len();
        r.consume(ws_len);
        if ws_len < buf_len {
            return Ok(());
        }
    }
}

/// Reads the longest run of bytes satisfying `pred`. The first byte not satisfying it is not consumed.
pub fn read_token(r: &mut dyn BufRead, pred: impl Fn(u8) -> bool) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = vec![];
    loop {
        let buf = r.fill_buf()?;
        if buf.is_empty() {
            return Ok(out);
        }
        let tok_len = buf.iter().take_while(|&&b| pred(b)).count();
        let buf_len = buf.len();
        out.extend_from_slice(&buf[..tok_len]);
        r.consume(tok_len);
        if tok_len < buf_len {
            return Ok(out);
        }
    }
}

/// Reads unescaped text up to, and not including, the next `\t` or `\n`.
pub fn read_raw(r: &mut dyn BufRead) -> Result<Vec<u8>> {
    read_token(r, |b| !is_field_terminator(b))
}

/// Reads escaped text up to, and not including, the next unescaped `\t` or `\n`.
pub fn read_escaped(r: &mut dyn BufRead, type_name: &str) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = vec![];
    read_escaped_until(r, type_name, is_field_terminator, &mut out)?;
    Ok(out)
}

/// Reads `'...'`, unescaping the content.
pub fn read_quoted(r: &mut dyn BufRead, type_name: &str) -> Result<Vec<u8>> {
    expect_byte(r, QUOTE, type_name)?;
    let mut out: Vec<u8> = vec![];
    let terminated = read_escaped_until(r, type_name, |b| b == QUOTE, &mut out)?;
    if !terminated {
        return Err(Error::truncated(format!("{type_name}, unterminated quoted text")));
    }
    r.consume(1);
    Ok(out)
}

/// Returns whether a terminator was found. The terminator is not consumed.
fn read_escaped_until(
    r: &mut dyn BufRead,
    type_name: &str,
    is_terminator: impl Fn(u8) -> bool,
    out: &mut Vec<u8>,
) -> Result<bool> {
    loop {
        let buf = r.fill_buf()?;
        if buf.is_empty() {
            return Ok(false);
        }
        match buf.iter().position(|&b| b == b'\\' || is_terminator(b)) {
            None => {
                let buf_len = buf.len();
                out.extend_from_slice(buf);
                r.consume(buf_len);
            }
            Some(i) => {
                let b = buf[i];
                out.extend_from_slice(&buf[..i]);
                if b == b'\\' {
                    r.consume(i + 1);
                    read_escape_sequence(r, type_name, out)?;
                } else {
                    r.consume(i);
                    return Ok(true);
                }
            }
        }
    }
}

/// Reads what follows a backslash.
fn read_escape_sequence(r: &mut dyn BufRead, type_name: &str, out: &mut Vec<u8>) -> Result<()> {
    let c = next_byte(r)?
        .ok_or_else(|| Error::truncated(format!("{type_name}, escape sequence")))?;
    if c != b'x' {
        out.push(unescape_char(c));
        return Ok(());
    }

    let mut hex = [0u8; 2];
    for h in hex.iter_mut() {
        *h = next_byte(r)?
            .ok_or_else(|| Error::truncated(format!("{type_name}, hex escape sequence")))?;
    }
    let byte = std::str::from_utf8(&hex)
        .ok()
        .and_then(|s| u8::from_str_radix(s, 16).ok())
        .ok_or_else(|| {
            Error::malformed(
                type_name,
                format!("invalid hex escape \\x{}", String::from_utf8_lossy(&hex)),
            )
        })?;
    out.push(byte);
    Ok(())
}

/// The outcome of [`match_literal`].
#[derive(PartialEq, Eq, Debug)]
pub enum LiteralMatch {
    Matched,
    /// The consumed bytes, a strict prefix of the literal.
    /// The caller replays them ahead of the stream, e.g. with [`std::io::Read::chain`].
    Unmatched(Vec<u8>),
}

/// Consumes `lit` if the stream starts with it.
/// On a mismatch, the first mismatching byte is left in the stream.
pub fn match_literal(r: &mut dyn BufRead, lit: &[u8]) -> Result<LiteralMatch> {
    let mut consumed: Vec<u8> = vec![];
    for &expected in lit {
        match io_utils::peek_byte(r)? {
            Some(b) if b == expected => {
                r.consume(1);
                consumed.push(b);
            }
            _ => return Ok(LiteralMatch::Unmatched(consumed)),
        }
    }
    Ok(LiteralMatch::Matched)
}
