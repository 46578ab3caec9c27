//! Stream adapters used by the cut engine.
//!
//! * [`LineScanner`] yields diff lines one by one with a hard per-line limit,
//!   so a single pathological line cannot grow memory without bound.
//! * [`CancellableReader`] turns a cancelled token into a read error; the
//!   engine has no cancellation of its own and simply propagates it.

use std::io::{self, BufRead, Read};

use tokio_util::sync::CancellationToken;

use crate::errors::{DiffCutError, DiffCutResult};

/// Default per-line limit, in bytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// Reads lines without their trailing `\n` or `\r\n`.
pub struct LineScanner<R> {
    inner: R,
    max_line_bytes: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner,
            max_line_bytes,
            buf: Vec::new(),
        }
    }

    /// Returns the next line, or `None` at end of stream.
    ///
    /// Invalid UTF-8 is replaced lossily.
    pub fn next_line(&mut self) -> DiffCutResult<Option<String>> {
        self.buf.clear();

        // One extra byte for the newline, one more to detect overflow.
        let budget = self.max_line_bytes as u64 + 2;
        let n = (&mut self.inner).take(budget).read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        if self.buf.len() > self.max_line_bytes {
            return Err(DiffCutError::LineTooLong {
                limit: self.max_line_bytes,
            });
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// A reader that fails every read once its token is cancelled.
///
/// The token is checked before each read only; a read already blocked in the
/// inner source is not interrupted.
#[derive(Debug)]
pub struct CancellableReader<R> {
    inner: R,
    token: CancellationToken,
}

impl<R: Read> CancellableReader<R> {
    pub fn new(inner: R, token: CancellationToken) -> Self {
        Self { inner, token }
    }
}

impl<R: Read> Read for CancellableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.token.is_cancelled() {
            return Err(io::Error::other("diff read cancelled"));
        }
        self.inner.read(buf)
    }
}
