//! In-memory [`TextBuffer`] with undo/redo history.

use std::path::{Path, PathBuf};

use ropey::Rope;
use splice_primitives::{BufferId, BufferSnapshot, CharIdx, Version};
use tracing::{debug, trace};

use super::TextBuffer;
use super::undo_store::{History, Replacement};
use crate::error::BufferError;

/// A text document.
///
/// Every committed mutation bumps the version, including undo and redo, so a
/// version token identifies content exactly.
#[derive(Debug)]
pub struct Document {
	id: BufferId,
	path: Option<PathBuf>,
	content: Rope,
	version: Version,
	read_only: bool,
	disposed: bool,
	history: History,
}

impl Document {
	/// Creates a document holding `text`.
	pub fn new(id: BufferId, text: &str) -> Self {
		Self {
			id,
			path: None,
			content: Rope::from(text),
			version: Version::default(),
			read_only: false,
			disposed: false,
			history: History::new(),
		}
	}

	/// Associates the document with a file.
	#[must_use]
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Returns the current content.
	pub fn content(&self) -> &Rope {
		&self.content
	}

	/// Returns the undo history.
	pub fn history(&self) -> &History {
		&self.history
	}

	/// Returns `true` if the document refuses edits.
	pub fn is_read_only(&self) -> bool {
		self.read_only
	}

	/// Sets whether the document refuses edits.
	pub fn set_read_only(&mut self, read_only: bool) {
		self.read_only = read_only;
	}

	/// Closes the document. Later edits fail with [`BufferError::Disposed`].
	pub fn dispose(&mut self) {
		debug!(buffer = %self.id, "document disposed");
		self.disposed = true;
	}

	/// Reverts the most recent undo step.
	///
	/// Returns `false` if there is nothing to undo, the document is closed,
	/// or a compound change is still open.
	pub fn undo(&mut self) -> bool {
		if self.disposed || self.history.is_grouping() {
			return false;
		}
		let Some(revision) = self.history.pop_undo() else {
			return false;
		};
		revision.revert(&mut self.content);
		self.history.push_redo(revision);
		self.version = self.version.next();
		trace!(buffer = %self.id, version = %self.version, "undo");
		true
	}

	/// Re-applies the most recently undone step.
	pub fn redo(&mut self) -> bool {
		if self.disposed || self.history.is_grouping() {
			return false;
		}
		let Some(revision) = self.history.pop_redo() else {
			return false;
		};
		revision.replay(&mut self.content);
		self.history.push_undo_after_redo(revision);
		self.version = self.version.next();
		trace!(buffer = %self.id, version = %self.version, "redo");
		true
	}
}

impl TextBuffer for Document {
	fn id(&self) -> BufferId {
		self.id
	}

	fn version(&self) -> Version {
		self.version
	}

	fn is_alive(&self) -> bool {
		!self.disposed
	}

	fn snapshot(&self) -> BufferSnapshot {
		BufferSnapshot::new(self.id, self.content.clone(), self.version)
	}

	fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	fn begin_compound_change(&mut self) {
		self.history.begin_group();
	}

	fn end_compound_change(&mut self) {
		self.history.end_group();
	}

	fn replace_range(&mut self, start: CharIdx, end: CharIdx, text: &str) -> Result<(), BufferError> {
		if self.disposed {
			return Err(BufferError::Disposed);
		}
		if self.read_only {
			return Err(BufferError::ReadOnly);
		}
		let len = self.content.len_chars();
		if start > end || end > len {
			return Err(BufferError::OutOfRange { start, end, len });
		}

		let removed = self.content.slice(start..end).to_string();
		self.content.remove(start..end);
		self.content.insert(start, text);
		self.version = self.version.next();
		self.history.record(Replacement {
			start,
			removed,
			inserted: text.to_string(),
		});
		Ok(())
	}
}
