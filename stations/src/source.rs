//! Where raw lines come from.
//!
//! A [`LineSource`] hands out one line at a time, terminator included, and
//! finally any unterminated fragment at the end of the input. The returned
//! slice is only valid until the next call, which lets [`ReaderLines`] reuse
//! a single buffer.

use std::io::{self, BufRead};

use crate::record::NEWLINE;

pub trait LineSource {
    fn next_line(&mut self) -> io::Result<Option<&[u8]>>;
}

/// Lines of an in-memory buffer, e.g. a memory-mapped file.
#[derive(Debug)]
pub struct SliceLines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceLines<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl LineSource for SliceLines<'_> {
    #[inline]
    fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        let rest = &self.data[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }
        let end = match rest.iter().position(|&b| b == NEWLINE) {
            Some(nl) => nl + 1,
            None => rest.len(),
        };
        self.pos += end;
        Ok(Some(&rest[..end]))
    }
}

/// Lines pulled from any buffered reader into one reused buffer.
#[derive(Debug)]
pub struct ReaderLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 128)
    }

    pub fn with_capacity(reader: R, line_capacity: usize) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(line_capacity),
        }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    #[inline]
    fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        if self.reader.read_until(NEWLINE, &mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(&self.buf))
    }
}
