use std::fmt;

/// Char offset into a text. Resolved edits are expressed in this unit.
pub type CharIdx = usize;

/// Number of chars spanned by some text.
pub type CharLen = usize;

/// A line/column location, independent of any offset representation.
///
/// Ordering is lexicographic: line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
	/// Zero-based line index.
	pub line: u32,
	/// Zero-based column, in the units of the active
	/// [`OffsetEncoding`](crate::OffsetEncoding).
	pub column: u32,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// A span between two positions.
///
/// A well-formed range has `start <= end`; `start == end` denotes a pure
/// insertion. Construction does not enforce the invariant because ranges
/// arrive from external services; the resolver rejects reversed ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
	/// Start position (inclusive).
	pub start: Position,
	/// End position (exclusive).
	pub end: Position,
}

impl Range {
	/// Creates a new range.
	pub const fn new(start: Position, end: Position) -> Self {
		Self { start, end }
	}

	/// Creates a zero-length range at a position.
	pub const fn point(pos: Position) -> Self {
		Self { start: pos, end: pos }
	}

	/// Returns `true` if `start` is after `end`.
	pub fn is_reversed(&self) -> bool {
		self.start > self.end
	}

	/// Returns `true` if the range covers no text.
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.start, self.end)
	}
}
