use crate::{Error, Result};
use std::cell::Cell;
use std::io::{self, BufRead, ErrorKind, Read, Write};
use std::rc::Rc;

/// Fills `buf` completely. A premature end of stream is a [`Error::TruncatedInput`].
pub fn read_exact<R: Read + ?Sized>(r: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    match r.read_exact(buf) {
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(Error::truncated(what)),
        Err(e) => Err(Error::Io(e)),
        Ok(()) => Ok(()),
    }
}

/// Reads as many bytes as are available, up to `buf.len()`.
/// Returns fewer only at end of stream.
pub fn read_up_to<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut r_len = 0;
    while r_len < buf.len() {
        match r.read(&mut buf[r_len..]) {
            Ok(0) => break,
            Ok(delta_r_len) => r_len += delta_r_len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }
    Ok(r_len)
}

pub fn peek_byte(r: &mut dyn BufRead) -> Result<Option<u8>> {
    let buf = r.fill_buf()?;
    Ok(buf.first().copied())
}

pub fn is_eof(r: &mut dyn BufRead) -> Result<bool> {
    Ok(peek_byte(r)?.is_none())
}

/// A shared running total of bytes written through a [`CountingWriter`].
///
/// Clones observe the same total, so an index builder may hold one
/// while the writer itself is mutably borrowed by a serializer.
#[derive(Clone, Default, Debug)]
pub struct ByteCounter(Rc<Cell<u64>>);
impl ByteCounter {
    pub fn get(&self) -> u64 {
        self.0.get()
    }
    fn add(&self, delta: usize) {
        self.0.set(self.0.get() + delta as u64);
    }
}

pub struct CountingWriter<W> {
    w: W,
    counter: ByteCounter,
}
impl<W: Write> CountingWriter<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            counter: ByteCounter::default(),
        }
    }
    pub fn counter(&self) -> ByteCounter {
        self.counter.clone()
    }
    pub fn into_inner(self) -> W {
        self.w
    }
}
impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let w_len = self.w.write(buf)?;
        self.counter.add(w_len);
        Ok(w_len)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}
