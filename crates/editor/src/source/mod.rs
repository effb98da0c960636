//! Edit producers.
//!
//! An [`EditSource`] is asked once per pipeline run for the edits to apply to
//! a snapshot. Producing is the only asynchronous step of a run.

use std::path::PathBuf;

use async_trait::async_trait;
use splice_lsp::lsp_types::FormattingOptions;
use splice_lsp::{FormattingClient, FormattingKind, negotiated_encoding, request_edits, uri_from_path};
use splice_primitives::{BufferId, BufferSnapshot, OffsetEncoding, PositionEdit, Range};
use thiserror::Error;
use tracing::debug;

use crate::config::FormatConfig;

/// Failure of an [`EditSource`].
#[derive(Debug, Error)]
pub enum SourceError {
	/// The language server request failed.
	#[error(transparent)]
	Lsp(#[from] splice_lsp::Error),
	/// The producer needs a file path and the buffer has none.
	#[error("buffer has no file path")]
	NoPath,
	/// The buffer's path cannot be expressed as a URI.
	#[error("path cannot be converted to a URI: {0}")]
	InvalidPath(PathBuf),
	/// Any other producer failure.
	#[error("{0}")]
	Other(String),
}

/// What an [`EditSource`] is asked to produce edits for.
#[derive(Debug, Clone)]
pub struct EditRequest {
	/// Target buffer.
	pub buffer: BufferId,
	/// Content the edits must be expressed against.
	pub snapshot: BufferSnapshot,
	/// File backing the buffer, if any.
	pub path: Option<PathBuf>,
	/// Selected range, if the request is scoped to one.
	pub selection: Option<Range>,
}

/// An asynchronous producer of position-based edits.
#[async_trait]
pub trait EditSource: Send + Sync {
	/// Column unit of the positions this source produces.
	fn encoding(&self) -> OffsetEncoding;

	/// Produces the edits for `request`, in coordinates of `request.snapshot`.
	async fn produce(&self, request: &EditRequest) -> Result<Vec<PositionEdit>, SourceError>;
}

/// A source whose edits are already known.
#[derive(Debug, Clone)]
pub struct ReadySource {
	edits: Vec<PositionEdit>,
	encoding: OffsetEncoding,
}

impl ReadySource {
	/// Wraps `edits` counted in `encoding` units.
	pub fn new(edits: Vec<PositionEdit>, encoding: OffsetEncoding) -> Self {
		Self { edits, encoding }
	}
}

#[async_trait]
impl EditSource for ReadySource {
	fn encoding(&self) -> OffsetEncoding {
		self.encoding
	}

	async fn produce(&self, _request: &EditRequest) -> Result<Vec<PositionEdit>, SourceError> {
		Ok(self.edits.clone())
	}
}

/// Formats a buffer through a language server.
pub struct LspFormatSource<C> {
	client: C,
	encoding: OffsetEncoding,
	options: FormattingOptions,
	prefer_range: bool,
}

impl<C: FormattingClient> LspFormatSource<C> {
	/// Creates a source for `client`, using the encoding its server negotiated.
	pub fn new(client: C, config: &FormatConfig) -> Self {
		let encoding = negotiated_encoding(client.capabilities());
		Self {
			client,
			encoding,
			options: config.formatting_options(),
			prefer_range: config.prefer_range_formatting,
		}
	}

	/// Returns the wrapped client.
	pub fn client(&self) -> &C {
		&self.client
	}
}

#[async_trait]
impl<C: FormattingClient> EditSource for LspFormatSource<C> {
	fn encoding(&self) -> OffsetEncoding {
		self.encoding
	}

	async fn produce(&self, request: &EditRequest) -> Result<Vec<PositionEdit>, SourceError> {
		let path = request.path.as_deref().ok_or(SourceError::NoPath)?;
		let uri = uri_from_path(path).ok_or_else(|| SourceError::InvalidPath(path.to_path_buf()))?;
		let kind = FormattingKind::choose(self.client.capabilities(), request.selection, self.prefer_range)?;
		debug!(buffer = %request.buffer, ?kind, encoding = %self.encoding, "requesting formatting");
		Ok(request_edits(&self.client, uri, kind, self.options.clone()).await?)
	}
}
