//! Configuration layer: diff cut limits read from environment variables.

use serde::{Deserialize, Serialize};

use crate::cut::DiffCutter;
use crate::errors::{DiffCutConfigError, DiffCutResult};
use crate::parser::GitHeaders;
use crate::reader::DEFAULT_MAX_LINE_BYTES;
use crate::types::DiffCutParams;

/// Limits applied to every diff cut served by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffCutSettings {
    /// Context lines kept before the window.
    pub before_lines: usize,
    /// Context lines kept after the window.
    pub after_lines: usize,
    /// Safety cap on the number of window lines.
    pub line_limit: usize,
    /// Longest accepted diff line, in bytes.
    pub max_line_bytes: usize,
}

impl Default for DiffCutSettings {
    fn default() -> Self {
        Self {
            before_lines: 2,
            after_lines: 2,
            line_limit: 40,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl DiffCutSettings {
    /// Build settings from environment variables, falling back to defaults.
    ///
    /// Environment variables used:
    /// - `DIFF_CUT_BEFORE_LINES` (default: 2)
    /// - `DIFF_CUT_AFTER_LINES` (default: 2)
    /// - `DIFF_CUT_LINE_LIMIT` (default: 40)
    /// - `DIFF_CUT_MAX_LINE_BYTES` (default: 65536, must be > 0)
    ///
    /// # Errors
    /// [`DiffCutError::Config`](crate::DiffCutError::Config) when a value does
    /// not parse or is out of range.
    pub fn from_env() -> DiffCutResult<Self> {
        Ok(Self::from_lookup(|k| std::env::var(k).ok())?)
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, DiffCutConfigError> {
        let d = Self::default();
        let read = |key: &str, dflt: usize| -> Result<usize, DiffCutConfigError> {
            match get(key) {
                Some(v) => v.trim().parse().map_err(|_| DiffCutConfigError::EnvParse {
                    key: key.into(),
                    value: v,
                }),
                None => Ok(dflt),
            }
        };

        let s = Self {
            before_lines: read("DIFF_CUT_BEFORE_LINES", d.before_lines)?,
            after_lines: read("DIFF_CUT_AFTER_LINES", d.after_lines)?,
            line_limit: read("DIFF_CUT_LINE_LIMIT", d.line_limit)?,
            max_line_bytes: read("DIFF_CUT_MAX_LINE_BYTES", d.max_line_bytes)?,
        };

        if s.max_line_bytes == 0 {
            return Err(DiffCutConfigError::Invalid(
                "DIFF_CUT_MAX_LINE_BYTES must be > 0".into(),
            ));
        }

        Ok(s)
    }

    /// Params for a window, with context and cap taken from these settings.
    pub fn params(
        &self,
        line_start: u32,
        line_start_new: bool,
        line_end: u32,
        line_end_new: bool,
    ) -> DiffCutParams {
        DiffCutParams {
            line_start,
            line_start_new,
            line_end,
            line_end_new,
            before_lines: self.before_lines,
            after_lines: self.after_lines,
            line_limit: self.line_limit,
        }
    }

    pub fn cutter(&self) -> DiffCutter<GitHeaders> {
        DiffCutter::default().with_max_line_bytes(self.max_line_bytes)
    }
}
