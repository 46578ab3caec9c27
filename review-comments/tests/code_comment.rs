use git_diff_cut::{DiffCutError, DiffCutSettings};
use review_comments::*;
use std::io::{self, Cursor, Read};

const DIFF: &str = concat!(
    "diff --git a/src/lib.rs b/src/lib.rs\n",
    "index 83db48f..bf269f4 100644\n",
    "--- a/src/lib.rs\n",
    "+++ b/src/lib.rs\n",
    "@@ -1,5 +1,6 @@\n",
    " fn main() {\n",
    "     let a = 1;\n",
    "-    let b = 2;\n",
    "+    let b = 3;\n",
    "+    let c = 4;\n",
    "     println!(\"{a}\");\n",
    " }\n",
);

fn input(start: i64, start_new: bool, end: i64, end_new: bool) -> CommentCreateInput {
    CommentCreateInput {
        text: "why 3?".into(),
        target_commit_sha: "target".into(),
        source_commit_sha: "source".into(),
        path: "src/lib.rs".into(),
        line_start: start,
        line_start_new: start_new,
        line_end: end,
        line_end_new: end_new,
        ..Default::default()
    }
}

fn refs() -> DiffRefs {
    DiffRefs {
        merge_base_sha: "base".into(),
        latest_source_sha: "source".into(),
        pr_merge_base_sha: "base".into(),
    }
}

#[test]
fn anchors_to_the_exact_window() {
    let draft = create_code_comment(
        &input(3, true, 4, true),
        Cursor::new(DIFF),
        &refs(),
        &DiffCutSettings::default(),
    )
    .unwrap();

    // `-    let b = 2;` is at new line 3 too, so it opens the window.
    assert_eq!(draft.anchor.line_old, 3);
    assert_eq!(draft.anchor.span_old, 1);
    assert_eq!(draft.anchor.line_new, 3);
    assert_eq!(draft.anchor.span_new, 2);
    assert!(!draft.anchor.outdated);
    assert_eq!(draft.anchor.merge_base_sha, "base");

    assert_eq!(draft.payload.title, "@@ -1,5 +1,6 @@");
    assert_eq!(
        draft.payload.lines,
        vec![
            " fn main() {",
            "     let a = 1;",
            "-    let b = 2;",
            "+    let b = 3;",
            "+    let c = 4;",
            "     println!(\"{a}\");",
            " }",
        ]
    );
    assert!(draft.payload.any_new);
    assert!(!draft.migration.any());
    assert_eq!(draft.text, "why 3?");
}

#[test]
fn flags_migration_when_commits_moved() {
    let refs = DiffRefs {
        merge_base_sha: "base2".into(),
        latest_source_sha: "source2".into(),
        pr_merge_base_sha: "base".into(),
    };
    let draft = create_code_comment(
        &input(2, false, 2, false),
        Cursor::new(DIFF),
        &refs,
        &DiffCutSettings::default(),
    )
    .unwrap();
    assert!(draft.migration.new_side);
    assert!(draft.migration.old_side);
    assert_eq!(draft.anchor.merge_base_sha, "base2");
}

#[test]
fn range_outside_diff_is_bad_request() {
    let err = create_code_comment(
        &input(40, true, 41, true),
        Cursor::new(DIFF),
        &refs(),
        &DiffCutSettings::default(),
    )
    .unwrap_err();
    assert!(err.is_bad_request());
}

#[test]
fn plain_comment_is_rejected() {
    let plain = CommentCreateInput {
        text: "lgtm".into(),
        ..Default::default()
    };
    let err = create_code_comment(&plain, Cursor::new(DIFF), &refs(), &DiffCutSettings::default())
        .unwrap_err();
    assert!(err.is_bad_request());
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "rpc stream reset"))
    }
}

#[test]
fn stream_failure_is_not_a_bad_request() {
    let diff = io::BufReader::new(Broken);
    let err = create_code_comment(
        &input(1, true, 1, true),
        diff,
        &refs(),
        &DiffCutSettings::default(),
    )
    .unwrap_err();
    match err {
        CommentError::DiffCut(DiffCutError::StreamRead(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::ConnectionReset)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stream_failure_mid_window_yields_no_draft() {
    // Headers and the first three hunk lines arrive, then the stream resets.
    let head: String = DIFF.split_inclusive('\n').take(8).collect();
    let diff = io::BufReader::new(Cursor::new(head).chain(Broken));
    let err = create_code_comment(
        &input(2, false, 4, false),
        diff,
        &refs(),
        &DiffCutSettings::default(),
    )
    .unwrap_err();
    assert!(!err.is_bad_request());
    match err {
        CommentError::DiffCut(DiffCutError::StreamRead(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::ConnectionReset)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn draft_serializes() {
    let settings = DiffCutSettings {
        after_lines: 0,
        ..DiffCutSettings::default()
    };
    let draft =
        create_code_comment(&input(2, false, 2, false), Cursor::new(DIFF), &refs(), &settings)
            .unwrap();
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["anchor"]["path"], "src/lib.rs");
    assert_eq!(json["payload"]["any_new"], false);
}
