//! Formatting requests.
//!
//! The transport is abstracted by [`FormattingClient`]; this module decides
//! which request to send and turns the reply into [`PositionEdit`]s.

use async_trait::async_trait;
use lsp_types::{
	DocumentFormattingParams, DocumentRangeFormattingParams, FormattingOptions, ServerCapabilities, TextDocumentIdentifier, TextEdit, Uri,
	WorkDoneProgressParams,
};
use splice_primitives::{PositionEdit, Range};
use tracing::debug;

use crate::capabilities::{supports_formatting, supports_range_formatting};
use crate::convert::{edits_from_lsp, range_to_lsp};
use crate::{Error, Result};

/// A connection to a language server able to answer formatting requests.
#[async_trait]
pub trait FormattingClient: Send + Sync {
	/// Capabilities the server announced during initialization.
	fn capabilities(&self) -> &ServerCapabilities;

	/// Sends `textDocument/formatting`.
	async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>>;

	/// Sends `textDocument/rangeFormatting`.
	async fn range_formatting(&self, params: DocumentRangeFormattingParams) -> Result<Option<Vec<TextEdit>>>;
}

/// Which formatting request to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattingKind {
	/// Format the whole document.
	Document,
	/// Format only the given range.
	Range(Range),
}

impl FormattingKind {
	/// Picks a request for the server's capabilities.
	///
	/// A non-empty selection formats only that range when the server supports
	/// range formatting and `prefer_range` is set; otherwise the whole document
	/// is formatted.
	///
	/// # Errors
	///
	/// Returns [`Error::Unsupported`] if the server supports neither request.
	pub fn choose(caps: &ServerCapabilities, selection: Option<Range>, prefer_range: bool) -> Result<Self> {
		if let Some(range) = selection
			&& prefer_range
			&& !range.is_empty()
			&& supports_range_formatting(caps)
		{
			return Ok(Self::Range(range));
		}
		if supports_formatting(caps) {
			return Ok(Self::Document);
		}
		Err(Error::Unsupported("textDocument/formatting"))
	}
}

/// Builds `textDocument/formatting` parameters.
pub fn formatting_params(uri: Uri, options: FormattingOptions) -> DocumentFormattingParams {
	DocumentFormattingParams {
		text_document: TextDocumentIdentifier { uri },
		options,
		work_done_progress_params: WorkDoneProgressParams::default(),
	}
}

/// Builds `textDocument/rangeFormatting` parameters.
pub fn range_formatting_params(uri: Uri, range: Range, options: FormattingOptions) -> DocumentRangeFormattingParams {
	DocumentRangeFormattingParams {
		text_document: TextDocumentIdentifier { uri },
		range: range_to_lsp(range),
		options,
		work_done_progress_params: WorkDoneProgressParams::default(),
	}
}

/// Sends the chosen formatting request and converts the reply.
///
/// A `null` reply means the server has nothing to change and yields an
/// empty edit list.
pub async fn request_edits<C>(client: &C, uri: Uri, kind: FormattingKind, options: FormattingOptions) -> Result<Vec<PositionEdit>>
where
	C: FormattingClient + ?Sized,
{
	let reply = match kind {
		FormattingKind::Document => client.formatting(formatting_params(uri, options)).await?,
		FormattingKind::Range(range) => client.range_formatting(range_formatting_params(uri, range, options)).await?,
	};
	let edits = reply.map(edits_from_lsp).unwrap_or_default();
	debug!(?kind, edits = edits.len(), "formatting reply");
	Ok(edits)
}
