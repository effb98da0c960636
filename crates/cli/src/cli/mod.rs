//! CLI schema and parsing helpers for the splice binary.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use splice_lsp::lsp_types::{AnnotatedTextEdit, OneOf, TextEdit};
use splice_lsp::{edits_from_lsp, normalize_text_edits};
use splice_primitives::{OffsetEncoding, PositionEdit};

#[derive(Parser, Debug)]
#[command(name = "splice")]
#[command(about = "Apply position-based text edits to files as one transaction")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Log debug output (RUST_LOG overrides)
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Apply a JSON array of LSP TextEdits to a file
	Apply(ApplyArgs),
}

/// Arguments of `splice apply`.
#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
	/// File to edit.
	pub file: PathBuf,

	/// JSON file holding `TextEdit[]` (`-` reads stdin)
	#[arg(long, short = 'e', value_name = "JSON")]
	pub edits: PathBuf,

	/// Rewrite FILE instead of printing the result
	#[arg(long, short = 'i')]
	pub in_place: bool,

	/// Reject columns past the end of their line
	#[arg(long)]
	pub strict_columns: bool,

	/// Column unit of the edits: utf-8, utf-16 or utf-32
	#[arg(long, value_name = "ENCODING")]
	pub encoding: Option<OffsetEncoding>,

	/// TOML configuration file
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,
}

/// Parses a JSON array of `TextEdit` or `AnnotatedTextEdit` objects.
pub fn parse_edits(json: &str) -> anyhow::Result<Vec<PositionEdit>> {
	let edits: Vec<OneOf<TextEdit, AnnotatedTextEdit>> = serde_json::from_str(json).context("edits must be a JSON array of TextEdit objects")?;
	Ok(edits_from_lsp(normalize_text_edits(edits)))
}

/// Reads and parses edits from `path`, or from stdin if `path` is `-`.
pub fn read_edits(path: &Path) -> anyhow::Result<Vec<PositionEdit>> {
	let json = if path == Path::new("-") {
		let mut json = String::new();
		std::io::stdin().read_to_string(&mut json).context("failed to read edits from stdin")?;
		json
	} else {
		std::fs::read_to_string(path).with_context(|| format!("failed to read edits from {}", path.display()))?
	};
	parse_edits(&json)
}

#[cfg(test)]
mod tests;
