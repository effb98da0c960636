//! Error types for resolution and application of edit batches.

use splice_primitives::{BufferId, CharIdx, Range, Version};
use thiserror::Error;

/// Failure to turn position edits into a valid [`EditBatch`](crate::EditBatch).
///
/// Every variant is raised before the buffer is touched, so the whole
/// pipeline can be retried from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
	/// A position names a line the snapshot does not have.
	#[error("line {line} is out of bounds (buffer has {line_count} lines)")]
	OutOfBoundsPosition {
		/// Requested zero-based line.
		line: u32,
		/// Number of lines in the snapshot.
		line_count: usize,
	},
	/// A column points past the end of its line under the strict column policy.
	#[error("column {column} is past the end of line {line} ({line_len} units long)")]
	ColumnOutOfBounds {
		/// Zero-based line.
		line: u32,
		/// Requested column.
		column: u32,
		/// Length of the line's content in the active encoding.
		line_len: usize,
	},
	/// A range ends before it starts.
	#[error("range {range} ends before it starts")]
	InvertedRange {
		/// The offending range.
		range: Range,
	},
	/// Two edits of the same batch touch a common span.
	#[error("edit {first_start}..{first_end} overlaps edit {second_start}..{second_end}")]
	OverlappingEdits {
		/// Start of the earlier edit.
		first_start: CharIdx,
		/// End of the earlier edit.
		first_end: CharIdx,
		/// Start of the later edit.
		second_start: CharIdx,
		/// End of the later edit.
		second_end: CharIdx,
	},
	/// An offset edit lies outside the snapshot it claims to target.
	#[error("edit {start}..{end} is outside the buffer (length {len})")]
	OffsetOutOfRange {
		/// Start of the edit.
		start: CharIdx,
		/// End of the edit.
		end: CharIdx,
		/// Snapshot length in chars.
		len: usize,
	},
}

/// Failure of the single mutation primitive of a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
	/// The replaced span does not fit the current content.
	#[error("range {start}..{end} is outside the buffer (length {len})")]
	OutOfRange {
		/// Start of the span.
		start: CharIdx,
		/// End of the span.
		end: CharIdx,
		/// Current length in chars.
		len: usize,
	},
	/// The buffer was closed.
	#[error("buffer has been disposed")]
	Disposed,
	/// The buffer refuses edits.
	#[error("buffer is read-only")]
	ReadOnly,
}

/// Failure to apply an [`EditBatch`](crate::EditBatch) to a live buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
	/// The buffer was closed before the batch could be applied. Nothing changed.
	#[error("target buffer is gone")]
	TargetGone,
	/// The batch was resolved for a different buffer. Nothing changed.
	#[error("batch targets {expected} but was applied to {actual}")]
	WrongTarget {
		/// Buffer the batch was resolved against.
		expected: BufferId,
		/// Buffer it was handed to.
		actual: BufferId,
	},
	/// The buffer changed after the batch was resolved. Nothing changed.
	#[error("batch was resolved at {expected} but the buffer is at {actual}")]
	StaleBatch {
		/// Snapshot version the batch was resolved against.
		expected: Version,
		/// Live buffer version.
		actual: Version,
	},
	/// A replacement failed after earlier ones were committed.
	///
	/// The committed replacements form one compound undo step, so a single
	/// undo restores the pre-batch content.
	#[error("apply failed after {committed} of {total} edits: {source}")]
	PartialApplyFailure {
		/// Replacements committed before the fault.
		committed: usize,
		/// Replacements in the batch.
		total: usize,
		/// The failing mutation.
		source: BufferError,
	},
	/// The first replacement failed; nothing was committed.
	#[error(transparent)]
	Buffer(#[from] BufferError),
}

impl ApplyError {
	/// Returns `true` if the buffer may have been modified.
	pub fn is_post_mutation(&self) -> bool {
		matches!(self, Self::PartialApplyFailure { .. } | Self::Buffer(_))
	}

	/// Returns `true` if the failure deserves a user-visible notice.
	///
	/// Pre-mutation failures can be retried silently and a vanished buffer is
	/// not an error from the user's point of view.
	pub fn is_user_visible(&self) -> bool {
		self.is_post_mutation()
	}
}
