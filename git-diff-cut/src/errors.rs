//! Crate-wide error hierarchy for git-diff-cut.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type DiffCutResult<T> = Result<T, DiffCutError>;

/// Root error type for the git-diff-cut crate.
#[derive(Debug, Error)]
pub enum DiffCutError {
    /// File header or hunk header is absent, or the requested line window
    /// never overlapped any line of the hunk.
    #[error("hunk not found")]
    HunkNotFound,

    /// The underlying diff stream failed. The source error is kept as is.
    #[error("failed to read diff stream: {0}")]
    StreamRead(#[from] std::io::Error),

    /// A single diff line exceeded the scanner's line length limit.
    #[error("diff line exceeds {limit} bytes")]
    LineTooLong {
        /// Configured maximum line length in bytes.
        limit: usize,
    },

    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] DiffCutConfigError),
}

impl DiffCutError {
    /// True for failures raised while reading the diff stream.
    pub fn is_stream_failure(&self) -> bool {
        matches!(self, Self::StreamRead(_) | Self::LineTooLong { .. })
    }
}

/// Configuration errors (bad environment values, impossible limits).
#[derive(Debug, Error)]
pub enum DiffCutConfigError {
    /// Environment variable is present but its value does not parse.
    #[error("invalid value for {key}: {value:?}")]
    EnvParse { key: String, value: String },

    /// Value parsed but is not usable.
    #[error("invalid diff cut setting: {0}")]
    Invalid(String),
}
