//! Comment creation request and its validation.

use serde::{Deserialize, Serialize};

use crate::errors::{CommentError, CommentResult};

/// What kind of activity a comment request creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// Top-level comment on the pull request.
    Comment,
    /// Reply to an existing comment.
    Reply,
    /// Comment attached to lines of a file in the diff.
    CodeComment,
}

/// Body of a "create comment" request.
///
/// Code comments carry both commit SHAs, the file path and a line range;
/// each bound of the range is in new-file (`*_new = true`) or old-file
/// numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentCreateInput {
    /// Set only for replies.
    pub parent_id: i64,
    pub text: String,
    pub target_commit_sha: String,
    pub source_commit_sha: String,
    pub path: String,
    pub line_start: i64,
    pub line_start_new: bool,
    pub line_end: i64,
    pub line_end_new: bool,
}

impl CommentCreateInput {
    pub fn is_reply(&self) -> bool {
        self.parent_id != 0
    }

    pub fn is_code_comment(&self) -> bool {
        !self.source_commit_sha.is_empty()
    }

    pub fn kind(&self) -> CommentKind {
        if self.is_code_comment() {
            CommentKind::CodeComment
        } else if self.is_reply() {
            CommentKind::Reply
        } else {
            CommentKind::Comment
        }
    }

    /// Checks the code comment fields. Plain comments and replies always pass.
    pub fn validate(&self) -> CommentResult<()> {
        if self.source_commit_sha.is_empty() && self.target_commit_sha.is_empty() {
            return Ok(());
        }

        if self.source_commit_sha.is_empty() || self.target_commit_sha.is_empty() {
            return Err(bad_request(
                "for code comments source commit SHA and target commit SHA must be provided",
            ));
        }

        if self.is_reply() {
            return Err(bad_request("can't create a reply that is a code comment"));
        }

        if self.path.is_empty() {
            return Err(bad_request("code comment requires file path"));
        }

        if self.line_start <= 0 || self.line_end <= 0 {
            return Err(bad_request("code comments require line numbers"));
        }

        Ok(())
    }

    /// Line range as engine bounds; call after [`validate`](Self::validate).
    pub(crate) fn line_bounds(&self) -> CommentResult<(u32, u32)> {
        let start = u32::try_from(self.line_start)
            .map_err(|_| bad_request("line_start is out of range"))?;
        let end =
            u32::try_from(self.line_end).map_err(|_| bad_request("line_end is out of range"))?;
        Ok((start, end))
    }
}

fn bad_request(msg: &str) -> CommentError {
    CommentError::BadRequest(msg.to_string())
}
