//! Immutable buffer snapshots.
//!
//! A [`BufferSnapshot`] pairs a cheap rope clone with the [`Version`] it was
//! taken at and a [`LineTable`] built once in a single pass over the text.
//! Position resolution only ever reads snapshots, never the live buffer.

use std::sync::Arc;

use ropey::{Rope, RopeSlice};

use crate::encoding::OffsetEncoding;
use crate::ids::{BufferId, Version};
use crate::position::{CharIdx, CharLen};

/// Char bounds of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
	/// Char index of the first character of the line.
	pub start: CharIdx,
	/// Char index just past the line's content, before its terminator.
	pub content_end: CharIdx,
}

impl LineSpan {
	/// Returns the length of the line's content, excluding the terminator.
	#[inline]
	pub fn content_len(&self) -> CharLen {
		self.content_end - self.start
	}
}

/// Per-line char bounds of a text.
///
/// Lines are separated by `\n`, `\r\n`, or a lone `\r`. A text with `n`
/// terminators has `n + 1` lines, so a trailing newline yields a final empty
/// line and the empty text has exactly one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
	lines: Vec<LineSpan>,
}

impl LineTable {
	/// Scans `text` once and records where each line starts and ends.
	pub fn new(text: RopeSlice<'_>) -> Self {
		let mut lines = Vec::new();
		let mut start = 0;
		let mut chars = text.chars().enumerate().peekable();

		while let Some((idx, ch)) = chars.next() {
			let terminator_len = match ch {
				'\n' => 1,
				'\r' if matches!(chars.peek(), Some((_, '\n'))) => {
					chars.next();
					2
				}
				'\r' => 1,
				_ => continue,
			};
			lines.push(LineSpan { start, content_end: idx });
			start = idx + terminator_len;
		}

		lines.push(LineSpan {
			start,
			content_end: text.len_chars(),
		});
		Self { lines }
	}

	/// Returns the number of lines.
	#[inline]
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Always `false`: every text has at least one line.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Returns the bounds of `line`, if it exists.
	#[inline]
	pub fn get(&self, line: usize) -> Option<LineSpan> {
		self.lines.get(line).copied()
	}
}

/// Result of converting a column to a char index within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLookup {
	/// Resolved char index in the whole text.
	pub char_idx: CharIdx,
	/// Whether the column pointed past the line's content and was clamped to
	/// its end.
	pub clamped: bool,
}

/// An immutable view of buffer content at one version.
#[derive(Debug, Clone)]
pub struct BufferSnapshot {
	buffer: BufferId,
	text: Rope,
	version: Version,
	lines: Arc<LineTable>,
}

impl BufferSnapshot {
	/// Captures `text` of `buffer` at `version` and builds its line table.
	pub fn new(buffer: BufferId, text: Rope, version: Version) -> Self {
		let lines = Arc::new(LineTable::new(text.slice(..)));
		Self {
			buffer,
			text,
			version,
			lines,
		}
	}

	/// Returns the buffer the snapshot was taken from.
	pub fn buffer(&self) -> BufferId {
		self.buffer
	}

	/// Returns the snapshot's text.
	pub fn text(&self) -> &Rope {
		&self.text
	}

	/// Returns the version the snapshot was taken at.
	pub fn version(&self) -> Version {
		self.version
	}

	/// Returns the line table.
	pub fn lines(&self) -> &LineTable {
		&self.lines
	}

	/// Returns the number of lines.
	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// Returns the total number of characters.
	pub fn len_chars(&self) -> CharLen {
		self.text.len_chars()
	}

	/// Returns the length of `line`'s content in `encoding` units.
	pub fn line_units(&self, line: usize, encoding: OffsetEncoding) -> Option<usize> {
		let span = self.lines.get(line)?;
		Some(match encoding {
			OffsetEncoding::Utf32 => span.content_len(),
			_ => self
				.text
				.slice(span.start..span.content_end)
				.chars()
				.map(|ch| encoding.units_of(ch))
				.sum(),
		})
	}

	/// Converts `column` on `line` to a char index.
	///
	/// Columns past the line's content are clamped to its end; a column that
	/// lands inside a multi-unit character snaps to that character's start.
	/// Returns `None` if `line` does not exist.
	pub fn column_to_char(&self, line: usize, column: usize, encoding: OffsetEncoding) -> Option<ColumnLookup> {
		let span = self.lines.get(line)?;

		if encoding == OffsetEncoding::Utf32 {
			let len = span.content_len();
			return Some(ColumnLookup {
				char_idx: span.start + column.min(len),
				clamped: column > len,
			});
		}

		let mut units = 0;
		for (offset, ch) in self.text.slice(span.start..span.content_end).chars().enumerate() {
			let width = encoding.units_of(ch);
			if units + width > column {
				return Some(ColumnLookup {
					char_idx: span.start + offset,
					clamped: false,
				});
			}
			units += width;
		}

		Some(ColumnLookup {
			char_idx: span.content_end,
			clamped: column > units,
		})
	}
}
