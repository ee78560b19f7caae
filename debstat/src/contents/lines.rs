//! Forward-only line records over a decompressed Contents stream.

use std::io::{self, BufRead};

/// Initial capacity of the record buffer. Contents lines are rarely longer.
const INITIAL_LINE_CAPACITY: usize = 256;

/// Remove exactly one trailing line terminator (`\n` or `\r\n`).
///
/// Anything else at the end of the record, including a lone `\r` or a
/// second newline, is left untouched.
pub fn strip_line_terminator(record: &[u8]) -> &[u8] {
    match record {
        [rest @ .., b'\r', b'\n'] => rest,
        [rest @ .., b'\n'] => rest,
        _ => record,
    }
}

/// Reads line records one at a time, reusing a single buffer.
///
/// Each record is returned without its terminator. The final line is
/// returned even when the stream does not end with a newline.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    lines_read: u64,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(INITIAL_LINE_CAPACITY),
            lines_read: 0,
        }
    }

    /// Read the next record, or `None` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.lines_read += 1;
        Ok(Some(strip_line_terminator(&self.buf)))
    }

    /// Number of records returned so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Recover the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
