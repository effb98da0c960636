//! Position resolution.
//!
//! Maps line/column ranges onto half-open char ranges of one
//! [`BufferSnapshot`]. Resolution is a pure function of the snapshot and the
//! range; the live buffer is never read.

use serde::{Deserialize, Serialize};
use splice_primitives::{BufferSnapshot, CharIdx, OffsetEdit, OffsetEncoding, Position, PositionEdit, Range};
use tracing::{debug, trace};

use crate::batch::EditBatch;
use crate::error::ResolveError;

/// How to treat a column past the end of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
	/// Clamp to the end of the line's content.
	///
	/// Servers may report columns past trailing content that an earlier
	/// formatting pass removed.
	#[default]
	Clamp,
	/// Fail with [`ResolveError::ColumnOutOfBounds`].
	Strict,
}

/// Parameters of a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
	/// Unit the edit producer counts columns in.
	pub encoding: OffsetEncoding,
	/// Handling of columns past end-of-line.
	pub column_policy: ColumnPolicy,
}

impl ResolveOptions {
	/// Options for a producer speaking `encoding`, with the default column policy.
	pub fn with_encoding(encoding: OffsetEncoding) -> Self {
		Self {
			encoding,
			..Self::default()
		}
	}
}

/// Resolves a single position to a char index.
///
/// # Errors
///
/// [`ResolveError::OutOfBoundsPosition`] if the line does not exist, and
/// [`ResolveError::ColumnOutOfBounds`] for a long column under
/// [`ColumnPolicy::Strict`].
pub fn resolve_position(snapshot: &BufferSnapshot, pos: Position, options: ResolveOptions) -> Result<CharIdx, ResolveError> {
	let line = pos.line as usize;
	let lookup = snapshot
		.column_to_char(line, pos.column as usize, options.encoding)
		.ok_or(ResolveError::OutOfBoundsPosition {
			line: pos.line,
			line_count: snapshot.line_count(),
		})?;

	if lookup.clamped {
		if options.column_policy == ColumnPolicy::Strict {
			return Err(ResolveError::ColumnOutOfBounds {
				line: pos.line,
				column: pos.column,
				line_len: snapshot.line_units(line, options.encoding).unwrap_or_default(),
			});
		}
		trace!(%pos, offset = lookup.char_idx, "column clamped to end of line");
	}
	Ok(lookup.char_idx)
}

/// Resolves a range to a half-open `(start, end)` char range.
///
/// # Errors
///
/// [`ResolveError::InvertedRange`] if `range.end < range.start`, plus the
/// errors of [`resolve_position`].
pub fn resolve_range(snapshot: &BufferSnapshot, range: Range, options: ResolveOptions) -> Result<(CharIdx, CharIdx), ResolveError> {
	if range.is_reversed() {
		return Err(ResolveError::InvertedRange { range });
	}
	let start = resolve_position(snapshot, range.start, options)?;
	let end = resolve_position(snapshot, range.end, options)?;
	if end < start {
		return Err(ResolveError::InvertedRange { range });
	}
	Ok((start, end))
}

/// Resolves one position edit.
pub fn resolve_edit(snapshot: &BufferSnapshot, edit: &PositionEdit, options: ResolveOptions) -> Result<OffsetEdit, ResolveError> {
	let (start, end) = resolve_range(snapshot, edit.range, options)?;
	Ok(OffsetEdit::new(start, end, edit.replacement.clone()))
}

/// Resolves every edit against `snapshot` and validates the result as one batch.
///
/// All edits see the same snapshot, so offsets of a batch never mix content
/// versions.
///
/// # Errors
///
/// The first resolution error, or [`ResolveError::OverlappingEdits`].
pub fn resolve_and_validate(snapshot: &BufferSnapshot, edits: &[PositionEdit], options: ResolveOptions) -> Result<EditBatch, ResolveError> {
	let resolved = edits
		.iter()
		.map(|edit| resolve_edit(snapshot, edit, options))
		.collect::<Result<Vec<_>, _>>()?;
	debug!(
		buffer = %snapshot.buffer(),
		version = %snapshot.version(),
		edits = resolved.len(),
		encoding = %options.encoding,
		"resolved edit batch"
	);
	EditBatch::validated(snapshot.buffer(), snapshot.version(), resolved)
}
