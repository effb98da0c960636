//! `splice apply`: runs a ready set of edits through the pipeline against a file.

use std::sync::Arc;

use anyhow::{Context, bail};
use parking_lot::Mutex;
use splice_editor::{ColumnPolicy, Config, Document, EditPipeline, PipelineOptions, PipelineOutcome, ReadySource};
use splice_primitives::BufferId;
use tracing::{debug, info};

use crate::cli::{ApplyArgs, read_edits};

/// Result of a successful `splice apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
	/// Replacements committed.
	pub applied: usize,
	/// File content after the edits.
	pub text: String,
	/// Whether the file on disk was rewritten.
	pub written: bool,
}

/// Applies the edits named by `args` to `args.file`.
///
/// The file is only rewritten with `--in-place` and when at least one edit
/// changed it.
pub async fn apply_file(args: &ApplyArgs) -> anyhow::Result<ApplyReport> {
	let config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	let mut options = PipelineOptions::from_config(&config);
	if args.strict_columns {
		options.column_policy = ColumnPolicy::Strict;
	}
	let encoding = args.encoding.unwrap_or(config.resolve.encoding);

	let edits = read_edits(&args.edits)?;
	let text = std::fs::read_to_string(&args.file).with_context(|| format!("failed to read {}", args.file.display()))?;
	debug!(file = %args.file.display(), edits = edits.len(), %encoding, "loaded edits");

	let document = Arc::new(Mutex::new(Document::new(BufferId(0), &text).with_path(&args.file)));
	let source = ReadySource::new(edits, encoding);
	let applied = match EditPipeline::new(options).run(&Arc::downgrade(&document), &source, None).await? {
		PipelineOutcome::Applied(count) => count,
		PipelineOutcome::TargetGone => bail!("{} was closed before the edits arrived", args.file.display()),
	};

	let text = document.lock().content().to_string();
	let written = args.in_place && applied > 0;
	if written {
		std::fs::write(&args.file, &text).with_context(|| format!("failed to write {}", args.file.display()))?;
	}
	info!(file = %args.file.display(), applied, written, "edits applied");

	Ok(ApplyReport { applied, text, written })
}

#[cfg(test)]
mod tests;
