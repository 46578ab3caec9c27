//! File and hunk header recognizers.
//!
//! The cut engine only needs to know whether a line is a header and, for hunk
//! headers, where the hunk starts. Recognizers are plugged in through
//! [`HeaderRecognizer`]; [`GitHeaders`] understands `git diff` output.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{DiffFileHeader, HunkHeader};

/// Classifies raw diff lines as file or hunk headers.
pub trait HeaderRecognizer {
    fn recognize_file_header(&self, line: &str) -> Option<DiffFileHeader>;

    fn recognize_hunk_header(&self, line: &str) -> Option<HunkHeader>;
}

lazy_static! {
    static ref FILE_HEADER_RE: Regex = Regex::new(r"^diff --git a/(.+) b/(.+)$").unwrap();
    static ref HUNK_HEADER_RE: Regex =
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(?: .*)?$").unwrap();
}

/// Recognizer for headers produced by `git diff`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHeaders;

impl HeaderRecognizer for GitHeaders {
    /// Matches `diff --git a/<old> b/<new>`.
    fn recognize_file_header(&self, line: &str) -> Option<DiffFileHeader> {
        let caps = FILE_HEADER_RE.captures(line)?;
        Some(DiffFileHeader {
            old_file_name: caps[1].to_string(),
            new_file_name: caps[2].to_string(),
        })
    }

    /// Matches `@@ -<old>[,<span>] +<new>[,<span>] @@ [section]`.
    ///
    /// An omitted span is 1. Numbers that do not fit `u32` do not match.
    fn recognize_hunk_header(&self, line: &str) -> Option<HunkHeader> {
        let caps = HUNK_HEADER_RE.captures(line)?;
        let num = |i: usize| -> Option<u32> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(1),
            }
        };

        Some(HunkHeader {
            old_line: num(1)?,
            old_span: num(2)?,
            new_line: num(3)?,
            new_span: num(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_header() {
        let h = GitHeaders
            .recognize_file_header("diff --git a/src/old.rs b/src/new.rs")
            .unwrap();
        assert_eq!(h.old_file_name, "src/old.rs");
        assert_eq!(h.new_file_name, "src/new.rs");

        assert!(GitHeaders.recognize_file_header("--- a/src/old.rs").is_none());
        assert!(GitHeaders.recognize_file_header("index 83db48f..bf269f4 100644").is_none());
    }

    #[test]
    fn hunk_header_full() {
        let h = GitHeaders
            .recognize_hunk_header("@@ -5,4 +5,5 @@ fn main() {")
            .unwrap();
        assert_eq!(
            h,
            HunkHeader {
                old_line: 5,
                old_span: 4,
                new_line: 5,
                new_span: 5,
            }
        );
    }

    #[test]
    fn hunk_header_omitted_spans() {
        let h = GitHeaders.recognize_hunk_header("@@ -3 +0,0 @@").unwrap();
        assert_eq!(
            h,
            HunkHeader {
                old_line: 3,
                old_span: 1,
                new_line: 0,
                new_span: 0,
            }
        );
    }

    #[test]
    fn hunk_header_rejects() {
        assert!(GitHeaders.recognize_hunk_header("@@ -a,1 +1,1 @@").is_none());
        assert!(GitHeaders.recognize_hunk_header("@@ -1,1 +1,1").is_none());
        assert!(GitHeaders.recognize_hunk_header(" @@ -1,1 +1,1 @@").is_none());
        assert!(
            GitHeaders
                .recognize_hunk_header("@@ -99999999999,1 +1,1 @@")
                .is_none()
        );
    }
}
