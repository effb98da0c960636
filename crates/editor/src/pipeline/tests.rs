use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use splice_primitives::{OffsetEncoding, Position, PositionEdit, Version};
use tokio::sync::{Notify, oneshot};

use super::*;
use crate::buffer::Document;
use crate::error::BufferError;
use crate::source::ReadySource;

type Reply = Result<Vec<PositionEdit>, SourceError>;

/// A source that announces when it is awaited and answers when told to.
struct GatedSource {
	started: Notify,
	reply: Mutex<Option<oneshot::Receiver<Reply>>>,
}

impl GatedSource {
	fn new() -> (Self, oneshot::Sender<Reply>) {
		let (tx, rx) = oneshot::channel();
		let source = Self {
			started: Notify::new(),
			reply: Mutex::new(Some(rx)),
		};
		(source, tx)
	}
}

#[async_trait]
impl EditSource for GatedSource {
	fn encoding(&self) -> OffsetEncoding {
		OffsetEncoding::Utf32
	}

	async fn produce(&self, _request: &EditRequest) -> Result<Vec<PositionEdit>, SourceError> {
		let rx = self.reply.lock().take().ok_or_else(|| SourceError::Other("source polled twice".into()))?;
		self.started.notify_one();
		rx.await.map_err(|_| SourceError::Other("producer dropped".into()))?
	}
}

/// A source that never answers.
struct StalledSource;

#[async_trait]
impl EditSource for StalledSource {
	fn encoding(&self) -> OffsetEncoding {
		OffsetEncoding::Utf32
	}

	async fn produce(&self, _request: &EditRequest) -> Result<Vec<PositionEdit>, SourceError> {
		std::future::pending().await
	}
}

fn edit(sl: u32, sc: u32, el: u32, ec: u32, text: &str) -> PositionEdit {
	PositionEdit::new(Range::new(Position::new(sl, sc), Position::new(el, ec)), text)
}

fn example_edits() -> Vec<PositionEdit> {
	vec![edit(0, 1, 0, 1, "X"), edit(1, 0, 1, 1, "Y")]
}

fn shared(text: &str) -> Arc<Mutex<Document>> {
	Arc::new(Mutex::new(Document::new(BufferId(1), text)))
}

fn text_of(doc: &Arc<Mutex<Document>>) -> String {
	doc.lock().content().to_string()
}

#[tokio::test]
async fn applies_produced_edits() {
	let _ = tracing_subscriber::fmt::try_init();
	let doc = shared("abc\ndef\n");
	let pipeline = EditPipeline::default();
	let source = ReadySource::new(example_edits(), OffsetEncoding::Utf32);

	let outcome = pipeline.run(&Arc::downgrade(&doc), &source, None).await.unwrap();

	assert_eq!(outcome, PipelineOutcome::Applied(2));
	assert_eq!(text_of(&doc), "aXbc\nYef\n");
	assert_eq!(doc.lock().history().undo_len(), 1);
	assert!(!pipeline.is_in_flight(BufferId(1)));
}

#[tokio::test]
async fn columns_use_the_source_encoding() {
	let doc = shared("\u{1F600}x\n");
	let pipeline = EditPipeline::default();
	// Column 2 in UTF-16 lands after the surrogate pair.
	let source = ReadySource::new(vec![edit(0, 2, 0, 3, "y")], OffsetEncoding::Utf16);

	pipeline.run(&Arc::downgrade(&doc), &source, None).await.unwrap();
	assert_eq!(text_of(&doc), "\u{1F600}y\n");
}

#[tokio::test]
async fn buffer_disposed_during_await_is_target_gone() {
	let _ = tracing_subscriber::fmt::try_init();
	let doc = shared("abc\ndef\n");
	let pipeline = EditPipeline::default();
	let (source, tx) = GatedSource::new();

	let weak = Arc::downgrade(&doc);
	let (outcome, ()) = tokio::join!(pipeline.run(&weak, &source, None), async {
		source.started.notified().await;
		doc.lock().dispose();
		let _ = tx.send(Ok(example_edits()));
	});

	assert_eq!(outcome.unwrap(), PipelineOutcome::TargetGone);
	assert_eq!(text_of(&doc), "abc\ndef\n");
	assert_eq!(doc.lock().history().undo_len(), 0);
}

#[tokio::test]
async fn buffer_dropped_during_await_is_target_gone() {
	let doc = shared("abc\ndef\n");
	let weak = Arc::downgrade(&doc);
	let mut doc = Some(doc);
	let pipeline = EditPipeline::default();
	let (source, tx) = GatedSource::new();

	let (outcome, ()) = tokio::join!(pipeline.run(&weak, &source, None), async {
		source.started.notified().await;
		drop(doc.take());
		let _ = tx.send(Ok(example_edits()));
	});

	assert_eq!(outcome.unwrap(), PipelineOutcome::TargetGone);
	assert!(weak.upgrade().is_none());
}

#[tokio::test]
async fn closed_buffer_is_skipped_without_asking_the_source() {
	let doc = shared("abc");
	doc.lock().dispose();
	let pipeline = EditPipeline::default();

	let outcome = pipeline.run(&Arc::downgrade(&doc), &StalledSource, None).await.unwrap();
	assert_eq!(outcome, PipelineOutcome::TargetGone);
}

#[tokio::test]
async fn second_request_for_same_buffer_is_busy() {
	let doc = shared("abc\ndef\n");
	let weak = Arc::downgrade(&doc);
	let pipeline = EditPipeline::default();
	let (source, tx) = GatedSource::new();

	let (first, second) = tokio::join!(pipeline.run(&weak, &source, None), async {
		source.started.notified().await;
		assert!(pipeline.is_in_flight(BufferId(1)));
		let second = pipeline.run(&weak, &ReadySource::new(Vec::new(), OffsetEncoding::Utf32), None).await;
		let _ = tx.send(Ok(example_edits()));
		second
	});

	assert!(matches!(second, Err(PipelineError::Busy(BufferId(1)))));
	assert!(!second.as_ref().unwrap_err().is_user_visible());
	assert_eq!(first.unwrap(), PipelineOutcome::Applied(2));
	assert_eq!(text_of(&doc), "aXbc\nYef\n");
	assert!(!pipeline.is_in_flight(BufferId(1)));
}

#[tokio::test]
async fn other_buffers_are_not_blocked() {
	let busy = shared("abc\ndef\n");
	let other = Arc::new(Mutex::new(Document::new(BufferId(2), "xyz")));
	let pipeline = EditPipeline::default();
	let (source, tx) = GatedSource::new();

	let busy_weak = Arc::downgrade(&busy);
	let (first, second) = tokio::join!(pipeline.run(&busy_weak, &source, None), async {
		source.started.notified().await;
		let insert = ReadySource::new(vec![edit(0, 3, 0, 3, "!")], OffsetEncoding::Utf32);
		let second = pipeline.run(&Arc::downgrade(&other), &insert, None).await;
		let _ = tx.send(Ok(Vec::new()));
		second
	});

	assert_eq!(second.unwrap(), PipelineOutcome::Applied(1));
	assert_eq!(first.unwrap(), PipelineOutcome::Applied(0));
	assert_eq!(text_of(&other), "xyz!");
}

#[tokio::test]
async fn user_edit_during_await_makes_batch_stale() {
	let doc = shared("abc\ndef\n");
	let pipeline = EditPipeline::default();
	let (source, tx) = GatedSource::new();

	let weak = Arc::downgrade(&doc);
	let (outcome, ()) = tokio::join!(pipeline.run(&weak, &source, None), async {
		source.started.notified().await;
		doc.lock().replace_range(0, 0, ">").unwrap();
		let _ = tx.send(Ok(example_edits()));
	});

	let err = outcome.unwrap_err();
	assert!(matches!(err, PipelineError::Apply(ApplyError::StaleBatch { .. })));
	assert!(!err.is_post_mutation());
	assert_eq!(text_of(&doc), ">abc\ndef\n");
}

#[tokio::test(start_paused = true)]
async fn stalled_source_times_out_and_releases_the_slot() {
	let doc = shared("abc");
	let weak = Arc::downgrade(&doc);
	let pipeline = EditPipeline::new(PipelineOptions {
		timeout: Some(Duration::from_secs(1)),
		..PipelineOptions::default()
	});

	let err = pipeline.run(&weak, &StalledSource, None).await.unwrap_err();
	assert!(matches!(err, PipelineError::Timeout(limit) if limit == Duration::from_secs(1)));
	assert!(!pipeline.is_in_flight(BufferId(1)));

	let source = ReadySource::new(vec![edit(0, 0, 0, 0, "<")], OffsetEncoding::Utf32);
	assert_eq!(pipeline.run(&weak, &source, None).await.unwrap(), PipelineOutcome::Applied(1));
	assert_eq!(text_of(&doc), "<abc");
}

#[tokio::test]
async fn source_failure_is_reported() {
	let doc = shared("abc");
	let pipeline = EditPipeline::default();
	let (source, tx) = GatedSource::new();

	let weak = Arc::downgrade(&doc);
	let (outcome, ()) = tokio::join!(pipeline.run(&weak, &source, None), async {
		source.started.notified().await;
		drop(tx);
	});

	assert!(matches!(outcome, Err(PipelineError::Source(SourceError::Other(_)))));
	assert_eq!(text_of(&doc), "abc");
}

#[tokio::test]
async fn invalid_edits_leave_buffer_untouched() {
	let doc = shared("abc\ndef\n");
	let pipeline = EditPipeline::default();
	let source = ReadySource::new(vec![edit(0, 0, 0, 2, "Q"), edit(0, 1, 0, 3, "R")], OffsetEncoding::Utf32);

	let err = pipeline.run(&Arc::downgrade(&doc), &source, None).await.unwrap_err();
	assert!(matches!(err, PipelineError::Resolve(ResolveError::OverlappingEdits { .. })));
	assert!(!err.is_user_visible());
	assert_eq!(text_of(&doc), "abc\ndef\n");
}

#[tokio::test]
async fn strict_columns_come_from_options() {
	let doc = shared("ab\n");
	let pipeline = EditPipeline::new(PipelineOptions {
		column_policy: ColumnPolicy::Strict,
		timeout: None,
	});
	let source = ReadySource::new(vec![edit(0, 9, 0, 9, "!")], OffsetEncoding::Utf32);

	let err = pipeline.run(&Arc::downgrade(&doc), &source, None).await.unwrap_err();
	assert!(matches!(err, PipelineError::Resolve(ResolveError::ColumnOutOfBounds { .. })));
}

#[tokio::test]
async fn refused_mutation_is_surfaced() {
	let doc = shared("abc\ndef\n");
	doc.lock().set_read_only(true);
	let pipeline = EditPipeline::default();
	let source = ReadySource::new(example_edits(), OffsetEncoding::Utf32);

	let err = pipeline.run(&Arc::downgrade(&doc), &source, None).await.unwrap_err();
	assert!(matches!(err, PipelineError::Apply(ApplyError::Buffer(BufferError::ReadOnly))));
	assert!(err.is_user_visible());
	assert_eq!(text_of(&doc), "abc\ndef\n");
}

#[tokio::test]
async fn out_of_bounds_line_is_quiet() {
	let doc = shared("abc\ndef");
	let pipeline = EditPipeline::default();
	let source = ReadySource::new(vec![edit(5, 0, 5, 0, "!")], OffsetEncoding::Utf32);

	let err = pipeline.run(&Arc::downgrade(&doc), &source, None).await.unwrap_err();
	assert!(matches!(
		err,
		PipelineError::Resolve(ResolveError::OutOfBoundsPosition { line: 5, line_count: 2 })
	));
	assert!(!err.is_user_visible());
	assert!(!err.is_post_mutation());
	assert_eq!(text_of(&doc), "abc\ndef");
}

#[test]
fn only_mutation_failures_and_producer_failures_are_user_visible() {
	let quiet = [
		PipelineError::Busy(BufferId(1)),
		PipelineError::Resolve(ResolveError::OutOfBoundsPosition { line: 5, line_count: 2 }),
		PipelineError::Resolve(ResolveError::OverlappingEdits {
			first_start: 0,
			first_end: 2,
			second_start: 1,
			second_end: 3,
		}),
		PipelineError::Apply(ApplyError::StaleBatch {
			expected: Version(1),
			actual: Version(2),
		}),
	];
	for err in &quiet {
		assert!(!err.is_user_visible(), "{err:?} should be quiet");
	}

	let partial = PipelineError::Apply(ApplyError::PartialApplyFailure {
		committed: 1,
		total: 2,
		source: BufferError::ReadOnly,
	});
	assert!(partial.is_user_visible());
	assert!(partial.is_post_mutation());
	assert!(PipelineError::Apply(ApplyError::Buffer(BufferError::Disposed)).is_user_visible());
}
