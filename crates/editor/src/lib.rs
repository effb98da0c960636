#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Atomic application of position-based edits.
//!
//! External tools such as language servers describe changes as lists of
//! line/column ranges with replacement text, all expressed against one
//! version of a buffer. This crate turns such a list into a single undoable
//! transaction.
//!
//! # Main Types
//!
//! - [`resolve_and_validate`] - Maps position edits onto one [`BufferSnapshot`]
//!   and produces a sorted, non-overlapping [`EditBatch`]
//! - [`apply`] - Commits a batch to a [`TextBuffer`] as one compound undo step
//! - [`EditPipeline`] - Awaits an [`EditSource`] and applies its edits, one
//!   request per buffer at a time
//!
//! # Architecture
//!
//! ```text
//! EditSource ──produce──▶ Vec<PositionEdit>
//!                              │ resolve_and_validate(snapshot)
//!                              ▼
//!                          EditBatch ──apply──▶ TextBuffer (one undo step)
//! ```
//!
//! Resolution reads only the snapshot taken before the producer was awaited.
//! Application checks that the live buffer still has that snapshot's version
//! and writes from the last edit to the first, so no offset needs adjusting.
//!
//! [`BufferSnapshot`]: splice_primitives::BufferSnapshot

/// Transactional patch application.
pub mod apply;
/// Validated edit batches.
pub mod batch;
pub mod buffer;
/// TOML configuration.
pub mod config;
/// Error types for resolution and application.
pub mod error;
/// The asynchronous edit pipeline.
pub mod pipeline;
/// Line/column to char offset resolution.
pub mod resolve;
/// Edit producers.
pub mod source;

pub use apply::{AppliedCount, apply};
pub use batch::{EditBatch, sort_and_validate};
pub use buffer::{CompoundChange, Document, History, TextBuffer};
pub use config::{Config, ConfigError, FormatConfig, ResolveConfig};
pub use error::{ApplyError, BufferError, ResolveError};
pub use pipeline::{EditPipeline, PipelineError, PipelineOptions, PipelineOutcome};
pub use resolve::{ColumnPolicy, ResolveOptions, resolve_and_validate, resolve_edit, resolve_position, resolve_range};
pub use source::{EditRequest, EditSource, LspFormatSource, ReadySource, SourceError};
