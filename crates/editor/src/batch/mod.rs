//! Validated edit batches.

use splice_primitives::{BufferId, BufferSnapshot, OffsetEdit, Version};

use crate::error::ResolveError;

/// Offset edits for one buffer, sorted and mutually non-overlapping.
///
/// A batch can only be built through validation, and the applier consumes it
/// by value, so a batch is applied at most once and never with partial
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBatch {
	buffer: BufferId,
	version: Version,
	edits: Vec<OffsetEdit>,
}

impl EditBatch {
	pub(crate) fn validated(buffer: BufferId, version: Version, mut edits: Vec<OffsetEdit>) -> Result<Self, ResolveError> {
		sort_and_validate(&mut edits)?;
		edits.retain(|edit| !edit.is_noop());
		Ok(Self { buffer, version, edits })
	}

	/// Builds a batch from edits that are already in offset form.
	///
	/// # Errors
	///
	/// [`ResolveError::OffsetOutOfRange`] if an edit does not fit `snapshot`,
	/// or [`ResolveError::OverlappingEdits`].
	pub fn from_offsets(snapshot: &BufferSnapshot, edits: Vec<OffsetEdit>) -> Result<Self, ResolveError> {
		let len = snapshot.len_chars();
		if let Some(bad) = edits.iter().find(|e| e.start > e.end || e.end > len) {
			return Err(ResolveError::OffsetOutOfRange {
				start: bad.start,
				end: bad.end,
				len,
			});
		}
		Self::validated(snapshot.buffer(), snapshot.version(), edits)
	}

	/// Returns the target buffer.
	pub fn buffer(&self) -> BufferId {
		self.buffer
	}

	/// Returns the snapshot version the edits were resolved against.
	pub fn version(&self) -> Version {
		self.version
	}

	/// Returns the edits in ascending offset order.
	pub fn edits(&self) -> &[OffsetEdit] {
		&self.edits
	}

	/// Returns the number of edits.
	pub fn len(&self) -> usize {
		self.edits.len()
	}

	/// Returns `true` if there is nothing to apply.
	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}
}

/// Sorts edits by start offset and rejects overlaps.
///
/// The sort is stable on `(start, end)`: insertions at one offset keep their
/// input order and precede a replacement starting at the same offset. Edits
/// whose spans merely touch (`a.end == b.start`) are accepted.
///
/// # Errors
///
/// [`ResolveError::OverlappingEdits`] naming the first conflicting pair.
pub fn sort_and_validate(edits: &mut [OffsetEdit]) -> Result<(), ResolveError> {
	edits.sort_by_key(|edit| (edit.start, edit.end));
	for pair in edits.windows(2) {
		let (first, second) = (&pair[0], &pair[1]);
		if first.end > second.start {
			return Err(ResolveError::OverlappingEdits {
				first_start: first.start,
				first_end: first.end,
				second_start: second.start,
				second_end: second.end,
			});
		}
	}
	Ok(())
}
