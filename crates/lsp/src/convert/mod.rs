//! Conversions between `lsp_types` and the protocol independent edit types.
//!
//! These only re-shape data; no offsets are computed here. Columns keep the
//! unit the server used and are resolved later against a snapshot with the
//! negotiated [`OffsetEncoding`](splice_primitives::OffsetEncoding).

use lsp_types::{AnnotatedTextEdit, OneOf, TextEdit};
use splice_primitives::{Position, PositionEdit, Range};

/// Converts an LSP position.
pub fn position_from_lsp(pos: lsp_types::Position) -> Position {
	Position::new(pos.line, pos.character)
}

/// Converts an LSP range.
pub fn range_from_lsp(range: lsp_types::Range) -> Range {
	Range::new(position_from_lsp(range.start), position_from_lsp(range.end))
}

/// Converts a range back to its LSP form, e.g. to send a selection.
pub fn range_to_lsp(range: Range) -> lsp_types::Range {
	lsp_types::Range {
		start: lsp_types::Position {
			line: range.start.line,
			character: range.start.column,
		},
		end: lsp_types::Position {
			line: range.end.line,
			character: range.end.column,
		},
	}
}

/// Converts a single LSP text edit.
pub fn edit_from_lsp(edit: TextEdit) -> PositionEdit {
	PositionEdit::new(range_from_lsp(edit.range), edit.new_text)
}

/// Converts a list of LSP text edits, preserving their order.
///
/// Order matters: insertions at the same position are applied in the order
/// the server sent them.
pub fn edits_from_lsp(edits: impl IntoIterator<Item = TextEdit>) -> Vec<PositionEdit> {
	edits.into_iter().map(edit_from_lsp).collect()
}

/// Strips change annotations, keeping the plain text edits.
pub fn normalize_text_edits(edits: Vec<OneOf<TextEdit, AnnotatedTextEdit>>) -> Vec<TextEdit> {
	edits
		.into_iter()
		.map(|edit| match edit {
			OneOf::Left(edit) => edit,
			OneOf::Right(AnnotatedTextEdit { text_edit, .. }) => text_edit,
		})
		.collect()
}
