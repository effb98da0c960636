//! Undo history for [`Document`](super::Document).
//!
//! History records the text each replacement removed and inserted, so undo
//! and redo are replays rather than full-content snapshots. Replacements made
//! inside a compound change are collected into one [`Revision`] and undone
//! together.


use ropey::Rope;
use splice_primitives::CharIdx;
use tracing::{trace, warn};

/// Maximum undo history size.
pub const MAX_UNDO: usize = 100;

/// One committed replacement, in the coordinates it was applied at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
	/// Char index where the replacement happened.
	pub start: CharIdx,
	/// Text that was removed.
	pub removed: String,
	/// Text that was inserted.
	pub inserted: String,
}

/// A group of replacements undone and redone as one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Revision {
	changes: Vec<Replacement>,
}

impl Revision {
	/// Returns the replacements in the order they were applied.
	pub fn changes(&self) -> &[Replacement] {
		&self.changes
	}

	/// Returns `true` if the revision holds no replacements.
	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}

	/// Reverts the revision on `text`, newest replacement first.
	pub(crate) fn revert(&self, text: &mut Rope) {
		for change in self.changes.iter().rev() {
			let end = change.start + change.inserted.chars().count();
			text.remove(change.start..end);
			text.insert(change.start, &change.removed);
		}
	}

	/// Re-applies the revision on `text`, oldest replacement first.
	pub(crate) fn replay(&self, text: &mut Rope) {
		for change in &self.changes {
			let end = change.start + change.removed.chars().count();
			text.remove(change.start..end);
			text.insert(change.start, &change.inserted);
		}
	}
}

/// Undo and redo stacks plus the currently open compound group.
#[derive(Debug, Default)]
pub struct History {
	undo_stack: Vec<Revision>,
	redo_stack: Vec<Revision>,
	open: Option<Revision>,
	depth: usize,
}

impl History {
	/// Creates an empty history.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of undo steps.
	pub fn undo_len(&self) -> usize {
		self.undo_stack.len()
	}

	/// Returns the number of redo steps.
	pub fn redo_len(&self) -> usize {
		self.redo_stack.len()
	}

	/// Returns `true` if there are undo steps.
	pub fn can_undo(&self) -> bool {
		!self.undo_stack.is_empty()
	}

	/// Returns `true` if there are redo steps.
	pub fn can_redo(&self) -> bool {
		!self.redo_stack.is_empty()
	}

	/// Returns `true` while a compound group is open.
	pub fn is_grouping(&self) -> bool {
		self.depth > 0
	}

	/// Returns the most recent undo step, if any.
	pub fn last_undo(&self) -> Option<&Revision> {
		self.undo_stack.last()
	}

	/// Opens a compound group. Nested groups fold into the outermost one.
	pub fn begin_group(&mut self) {
		if self.depth == 0 {
			self.open = Some(Revision::default());
		}
		self.depth += 1;
		trace!(depth = self.depth, "undo group opened");
	}

	/// Closes the innermost compound group.
	///
	/// Closing the outermost group pushes its revision unless it is empty.
	pub fn end_group(&mut self) {
		if self.depth == 0 {
			warn!("end_group without matching begin_group");
			return;
		}
		self.depth -= 1;
		trace!(depth = self.depth, "undo group closed");
		if self.depth == 0
			&& let Some(revision) = self.open.take()
			&& !revision.is_empty()
		{
			self.push(revision);
		}
	}

	/// Records a committed replacement.
	pub fn record(&mut self, change: Replacement) {
		match self.open.as_mut() {
			Some(revision) => revision.changes.push(change),
			None => self.push(Revision { changes: vec![change] }),
		}
	}

	fn push(&mut self, revision: Revision) {
		self.redo_stack.clear();
		self.undo_stack.push(revision);
		if self.undo_stack.len() > MAX_UNDO {
			self.undo_stack.remove(0);
		}
	}

	pub(crate) fn pop_undo(&mut self) -> Option<Revision> {
		self.undo_stack.pop()
	}

	pub(crate) fn pop_redo(&mut self) -> Option<Revision> {
		self.redo_stack.pop()
	}

	pub(crate) fn push_redo(&mut self, revision: Revision) {
		self.redo_stack.push(revision);
	}

	pub(crate) fn push_undo_after_redo(&mut self, revision: Revision) {
		self.undo_stack.push(revision);
	}
}
