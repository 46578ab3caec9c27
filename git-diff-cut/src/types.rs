//! Data model shared by the diff cut engine and its callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::LineAction;

/// Line range of a hunk in the old and new version of a file.
///
/// * `old_line` / `new_line` – 1-based first line in the old/new file.
/// * `old_span` / `new_span` – number of lines covered on each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkHeader {
    pub old_line: u32,
    pub old_span: u32,
    pub new_line: u32,
    pub new_span: u32,
}

impl HunkHeader {
    /// Extends the spans with one line of the given kind.
    pub(crate) fn grow(&mut self, action: LineAction) {
        if action.counts_new() {
            self.new_span += 1;
        }
        if action.counts_old() {
            self.old_span += 1;
        }
    }

    /// Moves the start one line back to cover a preceding line of the given kind.
    pub(crate) fn grow_back(&mut self, action: LineAction) {
        if action.counts_new() {
            self.new_line -= 1;
            self.new_span += 1;
        }
        if action.counts_old() {
            self.old_line -= 1;
            self.old_span += 1;
        }
    }
}

/// Renders the git form, e.g. `@@ -5,2 +5 @@` (a span of one is omitted).
impl fmt::Display for HunkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@@ -{}", self.old_line)?;
        if self.old_span != 1 {
            write!(f, ",{}", self.old_span)?;
        }
        write!(f, " +{}", self.new_line)?;
        if self.new_span != 1 {
            write!(f, ",{}", self.new_span)?;
        }
        f.write_str(" @@")
    }
}

/// Paths taken from a `diff --git a/<old> b/<new>` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFileHeader {
    pub old_file_name: String,
    pub new_file_name: String,
}

/// Which lines of a hunk to cut and how much context to keep around them.
///
/// `line_start` / `line_end` are 1-based and inclusive. The `*_new` flags pick
/// new-file numbering for that bound, otherwise old-file numbering is used.
/// `line_limit` caps the number of cut lines regardless of the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffCutParams {
    pub line_start: u32,
    pub line_start_new: bool,
    pub line_end: u32,
    pub line_end_new: bool,
    pub before_lines: usize,
    pub after_lines: usize,
    pub line_limit: usize,
}

/// A hunk: its header and raw diff lines (each still prefixed with ` `, `-` or `+`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub header: HunkHeader,
    pub lines: Vec<String>,
}

/// Caller-facing view of a finished cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffCutOutput {
    /// Header of the requested window only, without context.
    pub header: HunkHeader,
    /// Rendered header of `lines`, context included.
    pub lines_header: String,
    pub lines: Vec<String>,
    /// True if any of `lines` is an added line.
    pub any_new: bool,
}

impl DiffCutOutput {
    pub fn new(header: HunkHeader, hunk: Hunk) -> Self {
        let any_new = hunk
            .lines
            .iter()
            .any(|l| LineAction::classify(l) == Some(LineAction::Added));

        Self {
            header,
            lines_header: hunk.header.to_string(),
            lines: hunk.lines,
            any_new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_display_omits_single_spans() {
        let h = HunkHeader {
            old_line: 5,
            old_span: 2,
            new_line: 7,
            new_span: 1,
        };
        assert_eq!(h.to_string(), "@@ -5,2 +7 @@");

        let empty = HunkHeader {
            old_line: 0,
            old_span: 0,
            new_line: 1,
            new_span: 3,
        };
        assert_eq!(empty.to_string(), "@@ -0,0 +1,3 @@");
    }

    #[test]
    fn output_flags_added_lines() {
        let hunk = Hunk {
            header: HunkHeader {
                old_line: 5,
                old_span: 2,
                new_line: 5,
                new_span: 2,
            },
            lines: vec![" a".into(), "-b".into(), "+c".into()],
        };
        let out = DiffCutOutput::new(HunkHeader::default(), hunk);
        assert!(out.any_new);
        assert_eq!(out.lines_header, "@@ -5,2 +5,2 @@");

        let removed_only = Hunk {
            header: HunkHeader::default(),
            lines: vec!["-b".into(), " c".into()],
        };
        assert!(!DiffCutOutput::new(HunkHeader::default(), removed_only).any_new);
    }
}
