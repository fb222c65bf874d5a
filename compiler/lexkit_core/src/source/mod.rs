//! Byte sources for [`LexBuffer`](crate::LexBuffer).
//!
//! A source hands out one byte per call and reports end-of-stream with
//! `Ok(None)`. The buffer only ever borrows its source: opening, closing,
//! and rewinding the underlying input are the caller's business.

use std::io::{self, BufRead, BufReader, Read};

/// Pull-based provider of bytes.
///
/// # Contract
///
/// After returning `Ok(None)` once, a source must keep returning
/// `Ok(None)`. The buffer may poll an exhausted source repeatedly (every
/// `next()` at end-of-stream does).
pub trait ByteSource {
    /// Read one byte. `Ok(None)` is end-of-stream.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    #[inline]
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).next_byte()
    }
}

/// Source over an in-memory byte slice.
///
/// Tracks how many bytes have been handed out, which lets callers check
/// whether the buffer replayed lookahead or went back to the source.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Source starting at the first byte of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of bytes handed out so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or_default()
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.bytes.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

/// Source over any [`Read`] implementation.
///
/// Reads go through an internal [`BufReader`], so pulling one byte at a
/// time does not cost one system call per byte. Interrupted reads are
/// retried.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: BufReader<R>,
}

impl<R: Read> ReadSource<R> {
    /// Wrap `reader` with the default read-ahead size.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Like [`new`](Self::new) with an explicit read-ahead size.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
        }
    }

    /// The wrapped reader.
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Unwrap the reader. Bytes read ahead but not yet handed out are lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => {
                    let byte = buf.first().copied();
                    if byte.is_some() {
                        self.reader.consume(1);
                    }
                    return Ok(byte);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests;
