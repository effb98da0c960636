use splice_primitives::{Position, Range};

use super::*;

#[test]
fn parse_apply_with_flags() {
	let cli = Cli::try_parse_from([
		"splice",
		"apply",
		"src/main.rs",
		"--edits",
		"edits.json",
		"--in-place",
		"--strict-columns",
		"--encoding",
		"utf-16",
		"-v",
	])
	.unwrap();

	assert!(cli.verbose);
	let Command::Apply(args) = cli.command;
	assert_eq!(args.file, PathBuf::from("src/main.rs"));
	assert_eq!(args.edits, PathBuf::from("edits.json"));
	assert!(args.in_place);
	assert!(args.strict_columns);
	assert_eq!(args.encoding, Some(OffsetEncoding::Utf16));
	assert_eq!(args.config, None);
}

#[test]
fn parse_apply_defaults() {
	let cli = Cli::try_parse_from(["splice", "apply", "a.txt", "-e", "-"]).unwrap();
	let Command::Apply(args) = cli.command;
	assert!(!cli.verbose);
	assert!(!args.in_place);
	assert_eq!(args.encoding, None);
	assert_eq!(args.edits, PathBuf::from("-"));
}

#[test]
fn unknown_encoding_is_rejected() {
	assert!(Cli::try_parse_from(["splice", "apply", "a.txt", "-e", "e.json", "--encoding", "latin-1"]).is_err());
}

#[test]
fn edits_are_required() {
	assert!(Cli::try_parse_from(["splice", "apply", "a.txt"]).is_err());
}

#[test]
fn parse_plain_and_annotated_edits() {
	let json = r#"[
		{ "range": { "start": { "line": 0, "character": 1 }, "end": { "line": 0, "character": 1 } }, "newText": "X" },
		{ "range": { "start": { "line": 1, "character": 0 }, "end": { "line": 1, "character": 1 } }, "newText": "Y", "annotationId": "fmt" }
	]"#;

	let edits = parse_edits(json).unwrap();
	assert_eq!(
		edits,
		vec![
			PositionEdit::new(Range::point(Position::new(0, 1)), "X"),
			PositionEdit::new(Range::new(Position::new(1, 0), Position::new(1, 1)), "Y"),
		]
	);
}

#[test]
fn malformed_edits_are_reported() {
	let err = parse_edits(r#"{ "range": null }"#).unwrap_err();
	assert!(err.to_string().contains("JSON array"));
}

#[test]
fn read_edits_from_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("edits.json");
	std::fs::write(&path, "[]").unwrap();
	assert!(read_edits(&path).unwrap().is_empty());
}
