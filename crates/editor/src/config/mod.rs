//! User configuration.
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//!
//! ```toml
//! [resolve]
//! column_policy = "clamp"
//! encoding = "utf-32"
//!
//! [format]
//! timeout_ms = 5000
//! tab_size = 4
//! insert_spaces = true
//! prefer_range_formatting = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use splice_lsp::lsp_types::FormattingOptions;
use splice_primitives::OffsetEncoding;
use thiserror::Error;

use crate::resolve::{ColumnPolicy, ResolveOptions};

/// Errors raised while loading a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The file could not be read.
	#[error("failed to read {path}: {error}")]
	Io {
		/// File that was being read.
		path: PathBuf,
		/// Underlying I/O error.
		error: std::io::Error,
	},
	/// The file is not valid TOML for this schema.
	#[error("invalid configuration: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Position resolution settings.
	pub resolve: ResolveConfig,
	/// Formatting request settings.
	pub format: FormatConfig,
}

impl Config {
	/// Parses a configuration from TOML text.
	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses the configuration file at `path`.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&text)
	}

	/// Returns the resolver options described by the `[resolve]` section.
	pub fn resolve_options(&self) -> ResolveOptions {
		ResolveOptions {
			encoding: self.resolve.encoding,
			column_policy: self.resolve.column_policy,
		}
	}
}

/// `[resolve]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
	/// Handling of columns past end-of-line.
	pub column_policy: ColumnPolicy,
	/// Column unit for sources that do not announce one.
	pub encoding: OffsetEncoding,
}

/// `[format]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
	/// How long to wait for an edit producer, in milliseconds. `0` waits forever.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Width of a tab in spaces.
	#[serde(default = "default_tab_size")]
	pub tab_size: u32,
	/// Prefer spaces over tabs.
	#[serde(default = "default_true")]
	pub insert_spaces: bool,
	/// Format only the selection when the server supports range formatting.
	#[serde(default = "default_true")]
	pub prefer_range_formatting: bool,
}

fn default_timeout_ms() -> u64 {
	5000
}

fn default_tab_size() -> u32 {
	4
}

fn default_true() -> bool {
	true
}

impl Default for FormatConfig {
	fn default() -> Self {
		Self {
			timeout_ms: default_timeout_ms(),
			tab_size: default_tab_size(),
			insert_spaces: true,
			prefer_range_formatting: true,
		}
	}
}

impl FormatConfig {
	/// Returns the producer timeout, or `None` if waiting is unbounded.
	pub fn timeout(&self) -> Option<Duration> {
		(self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
	}

	/// Returns the options sent with formatting requests.
	pub fn formatting_options(&self) -> FormattingOptions {
		FormattingOptions {
			tab_size: self.tab_size,
			insert_spaces: self.insert_spaces,
			..FormattingOptions::default()
		}
	}
}
