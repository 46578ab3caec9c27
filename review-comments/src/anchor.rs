//! Code comment anchoring: where a comment sits and what it shows.

use chrono::{DateTime, Utc};
use git_diff_cut::{DiffCutOutput, HunkHeader};
use serde::{Deserialize, Serialize};

/// Commits the diff was computed against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRefs {
    /// Merge base of source and target used for the diff.
    pub merge_base_sha: String,
    /// Current head of the source branch.
    pub latest_source_sha: String,
    /// Merge base currently stored on the pull request.
    pub pr_merge_base_sha: String,
}

/// Lines a code comment is attached to, in both file versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCommentAnchor {
    pub path: String,
    pub source_sha: String,
    pub merge_base_sha: String,
    pub line_old: u32,
    pub span_old: u32,
    pub line_new: u32,
    pub span_new: u32,
    pub outdated: bool,
}

impl CodeCommentAnchor {
    /// Anchors to the exact window, never to the surrounding context.
    pub fn new(window: &HunkHeader, path: &str, source_sha: &str, merge_base_sha: &str) -> Self {
        Self {
            path: path.to_string(),
            source_sha: source_sha.to_string(),
            merge_base_sha: merge_base_sha.to_string(),
            line_old: window.old_line,
            span_old: window.old_span,
            line_new: window.new_line,
            span_new: window.new_span,
            outdated: false,
        }
    }
}

/// Snippet stored with a code comment for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCommentPayload {
    /// Rendered hunk header of `lines`.
    pub title: String,
    pub lines: Vec<String>,
    pub any_new: bool,
}

impl From<DiffCutOutput> for CodeCommentPayload {
    fn from(out: DiffCutOutput) -> Self {
        Self {
            title: out.lines_header,
            lines: out.lines,
            any_new: out.any_new,
        }
    }
}

/// Sides of the anchor that must be moved to newer commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationNeeds {
    /// The comment was made on an older source commit.
    pub new_side: bool,
    /// The pull request merge base moved since the diff was taken.
    pub old_side: bool,
}

impl MigrationNeeds {
    pub fn any(&self) -> bool {
        self.new_side || self.old_side
    }
}

/// A code comment ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCommentDraft {
    pub text: String,
    pub anchor: CodeCommentAnchor,
    pub payload: CodeCommentPayload,
    pub migration: MigrationNeeds,
    pub created_at: DateTime<Utc>,
}
