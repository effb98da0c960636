use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use splice_editor::{PipelineError, ResolveError};
use splice_primitives::OffsetEncoding;

use super::*;

const EXAMPLE_EDITS: &str = r#"[
	{ "range": { "start": { "line": 0, "character": 1 }, "end": { "line": 0, "character": 1 } }, "newText": "X" },
	{ "range": { "start": { "line": 1, "character": 0 }, "end": { "line": 1, "character": 1 } }, "newText": "Y" }
]"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, content).unwrap();
	path
}

fn args(file: PathBuf, edits: PathBuf) -> ApplyArgs {
	ApplyArgs {
		file,
		edits,
		in_place: false,
		strict_columns: false,
		encoding: None,
		config: None,
	}
}

#[tokio::test]
async fn prints_without_touching_the_file() {
	let dir = tempfile::tempdir().unwrap();
	let file = write(dir.path(), "a.txt", "abc\ndef\n");
	let edits = write(dir.path(), "edits.json", EXAMPLE_EDITS);

	let report = apply_file(&args(file.clone(), edits)).await.unwrap();

	assert_eq!(report.applied, 2);
	assert_eq!(report.text, "aXbc\nYef\n");
	assert!(!report.written);
	assert_eq!(std::fs::read_to_string(&file).unwrap(), "abc\ndef\n");
}

#[tokio::test]
async fn in_place_rewrites_the_file() {
	let dir = tempfile::tempdir().unwrap();
	let file = write(dir.path(), "a.txt", "abc\ndef\n");
	let edits = write(dir.path(), "edits.json", EXAMPLE_EDITS);

	let report = apply_file(&ApplyArgs {
		in_place: true,
		..args(file.clone(), edits)
	})
	.await
	.unwrap();

	assert!(report.written);
	assert_eq!(std::fs::read_to_string(&file).unwrap(), "aXbc\nYef\n");
}

#[tokio::test]
async fn empty_edit_list_leaves_file_alone() {
	let dir = tempfile::tempdir().unwrap();
	let file = write(dir.path(), "a.txt", "abc");
	let edits = write(dir.path(), "edits.json", "[]");

	let report = apply_file(&ApplyArgs {
		in_place: true,
		..args(file, edits)
	})
	.await
	.unwrap();

	assert_eq!(report.applied, 0);
	assert!(!report.written);
}

#[tokio::test]
async fn encoding_flag_overrides_config() {
	let dir = tempfile::tempdir().unwrap();
	let file = write(dir.path(), "a.txt", "\u{1F600}x\n");
	let edits = write(
		dir.path(),
		"edits.json",
		r#"[{ "range": { "start": { "line": 0, "character": 2 }, "end": { "line": 0, "character": 3 } }, "newText": "y" }]"#,
	);
	let config = write(dir.path(), "splice.toml", "[resolve]\nencoding = \"utf-8\"\n");

	let report = apply_file(&ApplyArgs {
		encoding: Some(OffsetEncoding::Utf16),
		config: Some(config),
		..args(file, edits)
	})
	.await
	.unwrap();

	assert_eq!(report.text, "\u{1F600}y\n");
}

#[tokio::test]
async fn strict_columns_reject_long_columns() {
	let dir = tempfile::tempdir().unwrap();
	let file = write(dir.path(), "a.txt", "ab\n");
	let edits = write(
		dir.path(),
		"edits.json",
		r#"[{ "range": { "start": { "line": 0, "character": 7 }, "end": { "line": 0, "character": 7 } }, "newText": "!" }]"#,
	);

	let clamped = apply_file(&args(file.clone(), edits.clone())).await.unwrap();
	assert_eq!(clamped.text, "ab!\n");

	let err = apply_file(&ApplyArgs {
		strict_columns: true,
		..args(file, edits)
	})
	.await
	.unwrap_err();
	assert!(matches!(
		err.downcast_ref::<PipelineError>(),
		Some(PipelineError::Resolve(ResolveError::ColumnOutOfBounds { .. }))
	));
}

#[tokio::test]
async fn missing_file_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let edits = write(dir.path(), "edits.json", "[]");

	let err = apply_file(&args(dir.path().join("absent.txt"), edits)).await.unwrap_err();
	assert!(err.to_string().contains("absent.txt"));
}
