//! Bounded "diff cut" extraction for code review comments.
//!
//! Given `git diff` output of one file with a single hunk and a line window
//! (each bound in old-file or new-file numbering), returns exactly the lines
//! the window covers plus a little context, together with headers describing
//! both the exact window and the returned lines.
//!
//! The engine is synchronous and reads its input line by line. Memory is
//! bounded by the context sizes and the line limit, never by the hunk size.

pub mod config;
pub mod cut;
mod errors;
pub mod parser;
pub mod reader;
pub mod types;

pub use config::DiffCutSettings;
pub use cut::{DiffCutter, diff_cut};
pub use errors::{DiffCutConfigError, DiffCutError, DiffCutResult};
pub use types::{DiffCutOutput, DiffCutParams, DiffFileHeader, Hunk, HunkHeader};
