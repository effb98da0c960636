//! Transactional patch application.
//!
//! Edits are applied from the highest start offset to the lowest. Mutating a
//! span only shifts text after it, so the offsets of the edits still pending
//! (all of which lie before it) stay valid without any adjustment.

use tracing::{debug, trace, warn};

use crate::batch::EditBatch;
use crate::buffer::{CompoundChange, TextBuffer};
use crate::error::ApplyError;

/// Number of replacements committed by a successful [`apply`].
pub type AppliedCount = usize;

/// Applies `batch` to `buffer` as one compound undo step.
///
/// Checks run in order before anything is mutated: liveness, target identity,
/// emptiness (an empty batch is a successful no-op that opens no undo group),
/// and version. The compound change is closed on every path once opened.
///
/// # Errors
///
/// - [`ApplyError::TargetGone`], [`ApplyError::WrongTarget`],
///   [`ApplyError::StaleBatch`]: nothing was mutated.
/// - [`ApplyError::Buffer`]: the first replacement failed.
/// - [`ApplyError::PartialApplyFailure`]: a later replacement failed; the
///   committed ones form a single undo step.
pub fn apply<B: TextBuffer + ?Sized>(buffer: &mut B, batch: EditBatch) -> Result<AppliedCount, ApplyError> {
	if !buffer.is_alive() {
		debug!(buffer = %batch.buffer(), "target buffer gone; discarding batch");
		return Err(ApplyError::TargetGone);
	}
	if buffer.id() != batch.buffer() {
		return Err(ApplyError::WrongTarget {
			expected: batch.buffer(),
			actual: buffer.id(),
		});
	}
	if batch.is_empty() {
		trace!(buffer = %batch.buffer(), "empty batch");
		return Ok(0);
	}
	let actual = buffer.version();
	if actual != batch.version() {
		debug!(buffer = %batch.buffer(), expected = %batch.version(), %actual, "stale batch rejected");
		return Err(ApplyError::StaleBatch {
			expected: batch.version(),
			actual,
		});
	}

	let total = batch.len();
	let mut change = CompoundChange::begin(buffer);
	let mut committed = 0;
	for edit in batch.edits().iter().rev() {
		trace!(start = edit.start, end = edit.end, len = edit.replacement.len(), "replace");
		if let Err(source) = change.replace_range(edit.start, edit.end, &edit.replacement) {
			warn!(buffer = %batch.buffer(), committed, total, error = %source, "edit batch aborted mid-pass");
			return Err(if committed == 0 {
				ApplyError::Buffer(source)
			} else {
				ApplyError::PartialApplyFailure { committed, total, source }
			});
		}
		committed += 1;
	}

	debug!(buffer = %batch.buffer(), edits = committed, "edit batch committed");
	Ok(committed)
}
