//! Pull request comment creation on top of the diff cut engine.
//!
//! A code comment names a file, a pair of commits and a line range. The
//! caller supplies the single-hunk diff of that file; this crate validates the
//! request, cuts the commented lines out of the diff and builds the anchor and
//! snippet to store with the comment. Storage, permissions and obtaining the
//! diff are the caller's business.

pub mod anchor;
pub mod errors;
pub mod input;

use std::io::BufRead;

use chrono::Utc;
use git_diff_cut::{DiffCutOutput, DiffCutSettings};
use tracing::{debug, info};

pub use anchor::{CodeCommentAnchor, CodeCommentDraft, CodeCommentPayload, DiffRefs, MigrationNeeds};
pub use errors::{CommentError, CommentResult};
pub use input::{CommentCreateInput, CommentKind};

/// Builds a code comment from a request and the diff of its file.
///
/// # Errors
/// * [`CommentError::BadRequest`] – invalid input, not a code comment, or the
///   line range is not part of the diff.
/// * [`CommentError::DiffCut`] – the diff stream failed.
pub fn create_code_comment<R: BufRead>(
    input: &CommentCreateInput,
    diff: R,
    refs: &DiffRefs,
    settings: &DiffCutSettings,
) -> CommentResult<CodeCommentDraft> {
    input.validate()?;
    if input.kind() != CommentKind::CodeComment {
        return Err(CommentError::BadRequest("not a code comment".into()));
    }

    let (line_start, line_end) = input.line_bounds()?;
    let params = settings.params(line_start, input.line_start_new, line_end, input.line_end_new);
    debug!(
        path = %input.path,
        line_start,
        line_start_new = input.line_start_new,
        line_end,
        line_end_new = input.line_end_new,
        "code comment: cutting diff"
    );

    let (window, hunk) = settings.cutter().cut(diff, &params)?;
    let output = DiffCutOutput::new(window, hunk);

    let anchor = CodeCommentAnchor::new(
        &output.header,
        &input.path,
        &input.source_commit_sha,
        &refs.merge_base_sha,
    );
    let migration = MigrationNeeds {
        new_side: input.source_commit_sha != refs.latest_source_sha,
        old_side: refs.pr_merge_base_sha != refs.merge_base_sha,
    };
    if migration.any() {
        info!(
            path = %input.path,
            new_side = migration.new_side,
            old_side = migration.old_side,
            "code comment needs migration to latest commits"
        );
    }

    Ok(CodeCommentDraft {
        text: input.text.clone(),
        anchor,
        payload: output.into(),
        migration,
        created_at: Utc::now(),
    })
}
