//! Capability negotiation for formatting requests.

use lsp_types::{
	ClientCapabilities, DocumentFormattingClientCapabilities, DocumentRangeFormattingClientCapabilities, GeneralClientCapabilities, OneOf,
	PositionEncodingKind, ServerCapabilities, TextDocumentClientCapabilities,
};
use splice_primitives::OffsetEncoding;
use tracing::warn;

/// Parses an LSP position encoding kind.
pub fn offset_encoding_from_lsp(kind: &PositionEncodingKind) -> Option<OffsetEncoding> {
	match kind.as_str() {
		"utf-8" => Some(OffsetEncoding::Utf8),
		"utf-16" => Some(OffsetEncoding::Utf16),
		"utf-32" => Some(OffsetEncoding::Utf32),
		_ => None,
	}
}

/// Returns the column unit a server will use for positions it sends.
///
/// Servers that do not announce a `positionEncoding` speak UTF-16, the
/// protocol default. An unrecognized announcement also falls back to UTF-16.
pub fn negotiated_encoding(caps: &ServerCapabilities) -> OffsetEncoding {
	match caps.position_encoding.as_ref() {
		None => OffsetEncoding::Utf16,
		Some(kind) => offset_encoding_from_lsp(kind).unwrap_or_else(|| {
			warn!(encoding = kind.as_str(), "server announced unknown position encoding; assuming utf-16");
			OffsetEncoding::Utf16
		}),
	}
}

/// Returns `true` if the server handles `textDocument/formatting`.
pub fn supports_formatting(caps: &ServerCapabilities) -> bool {
	match &caps.document_formatting_provider {
		Some(OneOf::Left(enabled)) => *enabled,
		Some(OneOf::Right(_)) => true,
		None => false,
	}
}

/// Returns `true` if the server handles `textDocument/rangeFormatting`.
pub fn supports_range_formatting(caps: &ServerCapabilities) -> bool {
	match &caps.document_range_formatting_provider {
		Some(OneOf::Left(enabled)) => *enabled,
		Some(OneOf::Right(_)) => true,
		None => false,
	}
}

/// Client capabilities advertising formatting support.
///
/// All three position encodings are accepted since edits are resolved against
/// a char-indexed snapshot that can walk any of them.
pub fn formatting_client_capabilities() -> ClientCapabilities {
	ClientCapabilities {
		text_document: Some(TextDocumentClientCapabilities {
			formatting: Some(DocumentFormattingClientCapabilities {
				dynamic_registration: Some(false),
			}),
			range_formatting: Some(DocumentRangeFormattingClientCapabilities {
				dynamic_registration: Some(false),
				..Default::default()
			}),
			..Default::default()
		}),
		general: Some(GeneralClientCapabilities {
			position_encodings: Some(vec![PositionEncodingKind::UTF32, PositionEncodingKind::UTF8, PositionEncodingKind::UTF16]),
			..Default::default()
		}),
		..Default::default()
	}
}
