//! Core types for applying position-based edits: positions, ranges, edits, and
//! immutable buffer snapshots.

/// Column units used to interpret [`Position::column`].
pub mod encoding;
/// Position-based and offset-based edit types.
pub mod edit;
/// Identifier and version types for buffers.
pub mod ids;
/// Line/column positions, ranges, and char offset aliases.
pub mod position;
/// Immutable buffer snapshots with a precomputed line table.
pub mod snapshot;

pub use edit::{OffsetEdit, PositionEdit};
pub use encoding::OffsetEncoding;
pub use ids::{BufferId, Version};
pub use position::{CharIdx, CharLen, Position, Range};
pub use ropey::{Rope, RopeSlice};
pub use snapshot::{BufferSnapshot, ColumnLookup, LineSpan, LineTable};
