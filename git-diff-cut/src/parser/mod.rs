//! Line-level recognizers for git diff output.

mod action;
mod headers;

pub use action::LineAction;
pub use headers::{GitHeaders, HeaderRecognizer};
