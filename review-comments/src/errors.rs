//! Crate-wide error hierarchy for review-comments.

use git_diff_cut::DiffCutError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type CommentResult<T> = Result<T, CommentError>;

/// Root error type for the review-comments crate.
#[derive(Debug, Error)]
pub enum CommentError {
    /// The request cannot be served as sent; safe to show to the client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Reading the diff failed.
    #[error(transparent)]
    DiffCut(DiffCutError),
}

impl CommentError {
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}

// ===== Conversions for `?` ergonomics =====

/// A window that misses the hunk is the client's fault; anything else is not.
impl From<DiffCutError> for CommentError {
    fn from(e: DiffCutError) -> Self {
        match e {
            DiffCutError::HunkNotFound => {
                CommentError::BadRequest("requested lines are not part of the diff".into())
            }
            other => CommentError::DiffCut(other),
        }
    }
}
