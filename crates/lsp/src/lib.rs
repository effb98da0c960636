//! [Language Server Protocol][lsp] adapters for position-based edits.
//!
//! [lsp]: https://microsoft.github.io/language-server-protocol/overviews/lsp/overview/
//!
//! Language servers describe formatting results as `TextEdit`s: a line/character
//! range plus replacement text. This crate converts those into the protocol
//! independent [`PositionEdit`](splice_primitives::PositionEdit), negotiates
//! which column unit a server speaks, and builds formatting request
//! parameters. The transport itself stays behind the [`FormattingClient`]
//! trait so callers can plug in any client implementation.
#![warn(missing_docs)]

/// Re-export of the [`lsp_types`] dependency of this crate.
pub use lsp_types;

pub mod capabilities;
pub mod convert;
pub mod formatting;

pub use capabilities::{formatting_client_capabilities, negotiated_encoding, offset_encoding_from_lsp, supports_formatting, supports_range_formatting};
pub use convert::{edit_from_lsp, edits_from_lsp, normalize_text_edits, position_from_lsp, range_from_lsp, range_to_lsp};
pub use formatting::{FormattingClient, FormattingKind, formatting_params, range_formatting_params, request_edits};

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Possible errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The client connection stopped before a reply arrived.
	#[error("service stopped")]
	ServiceStopped,
	/// The server replied with an error.
	#[error("server error {code}: {message}")]
	Response {
		/// JSON-RPC error code.
		code: i32,
		/// Human readable message from the server.
		message: String,
	},
	/// The server replied with an undecodable payload.
	#[error("deserialization failed: {0}")]
	Deserialize(#[from] serde_json::Error),
	/// The server does not advertise the requested capability.
	#[error("server does not support {0}")]
	Unsupported(&'static str),
}

/// Converts a filesystem path to an LSP URI.
///
/// Relative paths are resolved against the current working directory.
pub fn uri_from_path(path: &std::path::Path) -> Option<lsp_types::Uri> {
	use std::str::FromStr;

	let abs_path = if path.is_absolute() {
		path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
	} else {
		path.canonicalize().or_else(|_| std::env::current_dir().map(|cwd| cwd.join(path))).ok()?
	};

	let url = url::Url::from_file_path(abs_path).ok()?;
	lsp_types::Uri::from_str(url.as_str()).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn uri_from_absolute_path() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("main.rs");
		std::fs::write(&file, "fn main() {}\n").unwrap();

		let uri = uri_from_path(&file).unwrap();
		assert!(uri.as_str().starts_with("file://"));
		assert!(uri.as_str().ends_with("/main.rs"));
	}

	#[test]
	fn uri_from_missing_absolute_path() {
		let uri = uri_from_path(std::path::Path::new("/nonexistent/dir/lib.rs")).unwrap();
		assert_eq!(uri.as_str(), "file:///nonexistent/dir/lib.rs");
	}
}
