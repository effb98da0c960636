use crate::position::{CharIdx, CharLen, Range};

/// A text change described by line/column coordinates.
///
/// This is the unit received from an external edit producer. It is never
/// mutated after it is received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionEdit {
	/// The span to replace, in pre-edit coordinates.
	pub range: Range,
	/// The text that replaces the span.
	pub replacement: String,
}

impl PositionEdit {
	/// Creates a new position edit.
	pub fn new(range: Range, replacement: impl Into<String>) -> Self {
		Self {
			range,
			replacement: replacement.into(),
		}
	}
}

/// A text change described by a half-open character range.
///
/// Produced by resolving a [`PositionEdit`] against one snapshot; it carries
/// no reference back to the original positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetEdit {
	/// Start of the replaced span (inclusive).
	pub start: CharIdx,
	/// End of the replaced span (exclusive). Never less than `start`.
	pub end: CharIdx,
	/// The text that replaces the span.
	pub replacement: String,
}

impl OffsetEdit {
	/// Creates a new offset edit.
	pub fn new(start: CharIdx, end: CharIdx, replacement: impl Into<String>) -> Self {
		Self {
			start,
			end,
			replacement: replacement.into(),
		}
	}

	/// Returns the number of characters being replaced.
	#[inline]
	pub fn replaced_len(&self) -> CharLen {
		self.end - self.start
	}

	/// Returns `true` if this edit is a pure insertion.
	#[inline]
	pub fn is_insertion(&self) -> bool {
		self.start == self.end
	}

	/// Returns `true` if this edit neither removes nor inserts text.
	#[inline]
	pub fn is_noop(&self) -> bool {
		self.is_insertion() && self.replacement.is_empty()
	}
}
