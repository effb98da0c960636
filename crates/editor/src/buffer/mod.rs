//! The buffer contract consumed by the patch applier.
//!
//! A host exposes its buffer through [`TextBuffer`]. The applier only needs a
//! snapshot with a version token, a liveness check, a compound undo scope,
//! and one mutation primitive. [`Document`] is an in-memory implementation
//! with an undo/redo history.

use std::ops::{Deref, DerefMut};
use std::path::Path;

use splice_primitives::{BufferId, BufferSnapshot, CharIdx, Version};

use crate::error::BufferError;

mod document;
mod undo_store;

pub use document::Document;
pub use undo_store::{History, MAX_UNDO, Replacement, Revision};

/// A mutable text buffer owned by a host.
pub trait TextBuffer {
	/// Returns the buffer's identity.
	fn id(&self) -> BufferId;

	/// Returns the current version token.
	fn version(&self) -> Version;

	/// Returns `false` once the buffer has been closed.
	fn is_alive(&self) -> bool;

	/// Captures the current content and version.
	fn snapshot(&self) -> BufferSnapshot;

	/// Returns the file backing the buffer, if any.
	fn path(&self) -> Option<&Path> {
		None
	}

	/// Opens an undo group. Groups nest; only the outermost one is recorded.
	fn begin_compound_change(&mut self);

	/// Closes the innermost undo group. An empty group records nothing.
	fn end_compound_change(&mut self);

	/// Replaces the chars in `start..end` with `text`.
	///
	/// # Errors
	///
	/// Returns [`BufferError`] if the span is out of range or the buffer
	/// refuses the edit. A failed call leaves the content unchanged.
	fn replace_range(&mut self, start: CharIdx, end: CharIdx, text: &str) -> Result<(), BufferError>;
}

/// An open compound change on a buffer.
///
/// Dropping the guard ends the change, so every exit path of a transaction
/// closes the undo group exactly once.
pub struct CompoundChange<'a, B: TextBuffer + ?Sized> {
	buffer: &'a mut B,
}

impl<'a, B: TextBuffer + ?Sized> CompoundChange<'a, B> {
	/// Begins a compound change on `buffer`.
	pub fn begin(buffer: &'a mut B) -> Self {
		buffer.begin_compound_change();
		Self { buffer }
	}
}

impl<B: TextBuffer + ?Sized> Deref for CompoundChange<'_, B> {
	type Target = B;

	fn deref(&self) -> &B {
		self.buffer
	}
}

impl<B: TextBuffer + ?Sized> DerefMut for CompoundChange<'_, B> {
	fn deref_mut(&mut self) -> &mut B {
		self.buffer
	}
}

impl<B: TextBuffer + ?Sized> Drop for CompoundChange<'_, B> {
	fn drop(&mut self) {
		self.buffer.end_compound_change();
	}
}
