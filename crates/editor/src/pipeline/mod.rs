//! The asynchronous edit pipeline.
//!
//! A run snapshots the buffer, awaits an [`EditSource`], then resolves,
//! validates, and applies the produced edits while holding the buffer's lock.
//! Awaiting the producer is the only suspension point; the buffer lock is
//! never held across it. During the await the pipeline keeps only a [`Weak`]
//! handle, so a buffer closed in the meantime is simply skipped.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use splice_primitives::{BufferId, Range};
use thiserror::Error;
use tracing::{debug, warn};

use crate::apply::{AppliedCount, apply};
use crate::buffer::TextBuffer;
use crate::config::Config;
use crate::error::{ApplyError, ResolveError};
use crate::resolve::{ColumnPolicy, ResolveOptions, resolve_and_validate};
use crate::source::{EditRequest, EditSource, SourceError};

/// Successful end of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
	/// The batch was committed.
	Applied(AppliedCount),
	/// The buffer was closed before the edits arrived; they were discarded.
	TargetGone,
}

/// Failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
	/// Another run on the same buffer has not finished yet.
	#[error("{0} already has an edit request in flight")]
	Busy(BufferId),
	/// The producer did not answer in time.
	#[error("edit source timed out after {0:?}")]
	Timeout(Duration),
	/// The producer failed.
	#[error("edit source failed: {0}")]
	Source(#[from] SourceError),
	/// The produced edits do not fit the snapshot they were requested for.
	#[error(transparent)]
	Resolve(#[from] ResolveError),
	/// The batch could not be applied.
	#[error(transparent)]
	Apply(#[from] ApplyError),
}

impl PipelineError {
	/// Returns `true` if the buffer may have been modified.
	pub fn is_post_mutation(&self) -> bool {
		matches!(self, Self::Apply(err) if err.is_post_mutation())
	}

	/// Returns `true` if the failure deserves a user-visible notice.
	///
	/// Resolution failures reject the batch before any mutation and are
	/// retried like a stale batch.
	pub fn is_user_visible(&self) -> bool {
		match self {
			Self::Apply(err) => err.is_user_visible(),
			Self::Busy(_) | Self::Resolve(_) => false,
			Self::Timeout(_) | Self::Source(_) => true,
		}
	}
}

/// Tunables of an [`EditPipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
	/// Handling of columns past end-of-line.
	pub column_policy: ColumnPolicy,
	/// Upper bound on the producer await. `None` waits forever.
	pub timeout: Option<Duration>,
}

impl Default for PipelineOptions {
	fn default() -> Self {
		Self::from_config(&Config::default())
	}
}

impl PipelineOptions {
	/// Reads the options from a loaded configuration.
	pub fn from_config(config: &Config) -> Self {
		Self {
			column_policy: config.resolve.column_policy,
			timeout: config.format.timeout(),
		}
	}
}

/// Runs edit producers against buffers, one request per buffer at a time.
#[derive(Debug, Default)]
pub struct EditPipeline {
	options: PipelineOptions,
	in_flight: Mutex<HashSet<BufferId>>,
}

impl EditPipeline {
	/// Creates a pipeline with `options`.
	pub fn new(options: PipelineOptions) -> Self {
		Self {
			options,
			in_flight: Mutex::new(HashSet::new()),
		}
	}

	/// Returns the pipeline's options.
	pub fn options(&self) -> PipelineOptions {
		self.options
	}

	/// Returns `true` if a run on `buffer` is outstanding.
	pub fn is_in_flight(&self, buffer: BufferId) -> bool {
		self.in_flight.lock().contains(&buffer)
	}

	/// Produces edits for `handle` with `source` and applies them.
	///
	/// The produced edits are resolved against the snapshot taken before the
	/// await. If the buffer changed in the meantime the batch is rejected as
	/// stale rather than applied to different content.
	///
	/// # Errors
	///
	/// - [`PipelineError::Busy`] if a run on the same buffer is outstanding.
	/// - [`PipelineError::Timeout`] and [`PipelineError::Source`] for
	///   producer failures.
	/// - [`PipelineError::Resolve`] and [`PipelineError::Apply`] as raised by
	///   [`resolve_and_validate`] and [`apply`].
	pub async fn run<B, S>(&self, handle: &Weak<Mutex<B>>, source: &S, selection: Option<Range>) -> Result<PipelineOutcome, PipelineError>
	where
		B: TextBuffer,
		S: EditSource + ?Sized,
	{
		let Some(request) = Self::request(handle, selection) else {
			debug!("buffer closed before the request was issued");
			return Ok(PipelineOutcome::TargetGone);
		};
		let _slot = InFlightSlot::acquire(&self.in_flight, request.buffer)?;

		debug!(buffer = %request.buffer, version = %request.snapshot.version(), "requesting edits");
		let produced = source.produce(&request);
		let edits = match self.options.timeout {
			Some(limit) => tokio::time::timeout(limit, produced).await.map_err(|_| PipelineError::Timeout(limit))??,
			None => produced.await?,
		};

		let Some(shared) = handle.upgrade() else {
			debug!(buffer = %request.buffer, "buffer dropped while awaiting edits");
			return Ok(PipelineOutcome::TargetGone);
		};
		let mut buffer = shared.lock();
		if !buffer.is_alive() {
			debug!(buffer = %request.buffer, "buffer closed while awaiting edits");
			return Ok(PipelineOutcome::TargetGone);
		}

		let options = ResolveOptions {
			encoding: source.encoding(),
			column_policy: self.options.column_policy,
		};
		let batch = resolve_and_validate(&request.snapshot, &edits, options)?;
		match apply(&mut *buffer, batch) {
			Ok(count) => Ok(PipelineOutcome::Applied(count)),
			Err(ApplyError::TargetGone) => Ok(PipelineOutcome::TargetGone),
			Err(err) => {
				match &err {
					ApplyError::PartialApplyFailure { committed, total, .. } => {
						warn!(buffer = %request.buffer, committed, total, error = %err, "edit batch left the buffer partially modified");
					}
					ApplyError::Buffer(_) => warn!(buffer = %request.buffer, error = %err, "buffer refused the edit batch; nothing committed"),
					_ => debug!(buffer = %request.buffer, error = %err, "edit batch rejected"),
				}
				Err(err.into())
			}
		}
	}

	fn request<B: TextBuffer>(handle: &Weak<Mutex<B>>, selection: Option<Range>) -> Option<EditRequest> {
		let shared = handle.upgrade()?;
		let buffer = shared.lock();
		buffer.is_alive().then(|| EditRequest {
			buffer: buffer.id(),
			snapshot: buffer.snapshot(),
			path: buffer.path().map(Path::to_path_buf),
			selection,
		})
	}
}

/// Marks a buffer as having a run in flight until dropped.
struct InFlightSlot<'a> {
	set: &'a Mutex<HashSet<BufferId>>,
	buffer: BufferId,
}

impl<'a> InFlightSlot<'a> {
	fn acquire(set: &'a Mutex<HashSet<BufferId>>, buffer: BufferId) -> Result<Self, PipelineError> {
		if !set.lock().insert(buffer) {
			debug!(%buffer, "edit request rejected; another is in flight");
			return Err(PipelineError::Busy(buffer));
		}
		Ok(Self { set, buffer })
	}
}

impl Drop for InFlightSlot<'_> {
	fn drop(&mut self) {
		self.set.lock().remove(&self.buffer);
	}
}

#[cfg(test)]
mod tests;
