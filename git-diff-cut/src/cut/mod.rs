//! Diff cut: extracts a bounded window of lines from a single-hunk diff.
//!
//! The input is `git diff` output for one file that consists of a single hunk
//! (usually produced with a very large `--unified` value). The scan runs in
//! three phases:
//!
//! 1. **seek** – lines before the window go into a ring buffer holding at
//!    most `before_lines` of them;
//! 2. **cut** – lines inside the window are collected, at most
//!    `line_limit + 1` of them;
//! 3. **trailing** – up to `after_lines` lines following the window.
//!
//! Finally the header of the window is widened to cover the context lines.
//! Memory use is bounded by the three limits; the full hunk is never held.

mod ring;

pub use ring::RingBuffer;

use std::io::BufRead;

use tracing::{debug, trace};

use crate::errors::{DiffCutError, DiffCutResult};
use crate::parser::{GitHeaders, HeaderRecognizer, LineAction};
use crate::reader::{DEFAULT_MAX_LINE_BYTES, LineScanner};
use crate::types::{DiffCutParams, DiffFileHeader, Hunk, HunkHeader};

/// Cuts the requested window out of a single-hunk git diff.
///
/// Returns the header of the exact window and the hunk made of the window
/// plus its context lines. See [`DiffCutter::cut`].
pub fn diff_cut<R: BufRead>(
    reader: R,
    params: &DiffCutParams,
) -> DiffCutResult<(HunkHeader, Hunk)> {
    DiffCutter::default().cut(reader, params)
}

/// Diff cut engine with a pluggable header recognizer.
#[derive(Debug, Clone)]
pub struct DiffCutter<H> {
    recognizer: H,
    max_line_bytes: usize,
}

impl Default for DiffCutter<GitHeaders> {
    fn default() -> Self {
        Self::new(GitHeaders)
    }
}

/// Why the scan loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// The tracked counter moved past `line_end`.
    PastEnd,
    /// The cut grew beyond `line_limit`.
    LineLimit,
    /// Terminator line or end of stream.
    HunkEnd,
}

impl<H: HeaderRecognizer> DiffCutter<H> {
    pub fn new(recognizer: H) -> Self {
        Self {
            recognizer,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    /// Sets the maximum accepted length of a single diff line.
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Runs the cut.
    ///
    /// Returns `(window_header, hunk)` where `window_header` describes only the
    /// requested lines and `hunk.header` describes all of `hunk.lines`
    /// (before context, window, after context).
    ///
    /// # Errors
    /// * [`DiffCutError::HunkNotFound`] – no file header, no hunk header, or
    ///   the window does not overlap the hunk.
    /// * [`DiffCutError::StreamRead`] / [`DiffCutError::LineTooLong`] – the
    ///   stream failed; nothing partial is returned.
    pub fn cut<R: BufRead>(
        &self,
        reader: R,
        params: &DiffCutParams,
    ) -> DiffCutResult<(HunkHeader, Hunk)> {
        let mut scan = LineScanner::new(reader, self.max_line_bytes);

        let file = self.scan_file_header(&mut scan)?;
        let hunk_header = self.scan_hunk_header(&mut scan)?;
        debug!(
            old_file = %file.old_file_name,
            new_file = %file.new_file_name,
            hunk = %hunk_header,
            "diff cut: hunk located"
        );

        let mut current_old = hunk_header.old_line;
        let mut current_new = hunk_header.new_line;

        let mut in_cut = false;
        let mut cut_header = HunkHeader::default();
        let mut cut: Vec<String> = Vec::new();
        let mut before: RingBuffer<(LineAction, String)> = RingBuffer::new(params.before_lines);

        let stop = loop {
            let end_pos = if params.line_end_new { current_new } else { current_old };
            if end_pos > params.line_end {
                break Stop::PastEnd;
            }

            let Some(line) = scan.next_line()? else {
                break Stop::HunkEnd;
            };
            let Some(action) = LineAction::classify(&line) else {
                break Stop::HunkEnd;
            };

            let start_pos = if params.line_start_new { current_new } else { current_old };
            if start_pos < params.line_start {
                trace!(old = current_old, new = current_new, "diff cut: before window");
                before.push((action, line));
            } else {
                if !in_cut {
                    cut_header.old_line = current_old;
                    cut_header.new_line = current_new;
                    in_cut = true;
                    debug!(old = current_old, new = current_new, "diff cut: window started");
                }

                cut_header.grow(action);
                cut.push(line);
                if cut.len() > params.line_limit {
                    break Stop::LineLimit;
                }
            }

            if action.counts_new() {
                current_new += 1;
            }
            if action.counts_old() {
                current_old += 1;
            }
        };

        if !in_cut {
            debug!(?stop, "diff cut: window not reached");
            return Err(DiffCutError::HunkNotFound);
        }

        let before = before.drain();
        let mut after: Vec<(LineAction, String)> = Vec::new();
        if stop != Stop::HunkEnd {
            while after.len() < params.after_lines {
                let Some(line) = scan.next_line()? else {
                    break;
                };
                let Some(action) = LineAction::classify(&line) else {
                    break;
                };
                after.push((action, line));
            }
        }

        let mut header = cut_header;
        for (action, _) in &before {
            header.grow_back(*action);
        }
        for (action, _) in &after {
            header.grow(*action);
        }

        debug!(
            ?stop,
            window = %cut_header,
            hunk = %header,
            before = before.len(),
            cut = cut.len(),
            after = after.len(),
            "diff cut: done"
        );

        let lines = concat([strip(before), cut, strip(after)]);

        Ok((cut_header, Hunk { header, lines }))
    }

    /// Skips lines until a file header is found.
    fn scan_file_header<R: BufRead>(
        &self,
        scan: &mut LineScanner<R>,
    ) -> DiffCutResult<DiffFileHeader> {
        while let Some(line) = scan.next_line()? {
            if let Some(h) = self.recognizer.recognize_file_header(&line) {
                return Ok(h);
            }
        }
        Err(DiffCutError::HunkNotFound)
    }

    /// Skips lines until a hunk header is found.
    fn scan_hunk_header<R: BufRead>(
        &self,
        scan: &mut LineScanner<R>,
    ) -> DiffCutResult<HunkHeader> {
        while let Some(line) = scan.next_line()? {
            if let Some(h) = self.recognizer.recognize_hunk_header(&line) {
                return Ok(h);
            }
        }
        Err(DiffCutError::HunkNotFound)
    }
}

fn strip(lines: Vec<(LineAction, String)>) -> Vec<String> {
    lines.into_iter().map(|(_, l)| l).collect()
}

/// Joins the parts in order into one vector.
pub fn concat<T, const N: usize>(parts: [Vec<T>; N]) -> Vec<T> {
    let n = parts.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(n);
    for p in parts {
        out.extend(p);
    }
    out
}
