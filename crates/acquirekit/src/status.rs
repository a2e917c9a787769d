//! Status reporting for tool invocations
//!
//! A [`StatusChannel`] receives ordered [`StatusEvent`]s for a single
//! invocation. The pipeline drives it through a [`StatusReporter`], which
//! guarantees at most one terminal event.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::warn;

/// Status carried by a [`StatusEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Error,
    Success,
}

/// A single progress, error or success notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub status: Status,
    pub description: String,
    /// True only for the terminal event of an invocation
    pub done: bool,
}

impl StatusEvent {
    /// Non-terminal progress event
    pub fn progress(description: impl Into<String>) -> Self {
        Self {
            status: Status::InProgress,
            description: description.into(),
            done: false,
        }
    }

    /// Terminal error event
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            description: description.into(),
            done: true,
        }
    }

    /// Terminal success event
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            description: description.into(),
            done: true,
        }
    }

    /// Wire envelope: `{"type": "status", "data": {...}}`
    pub fn to_message(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "status",
            "data": self,
        })
    }
}

/// Sink for status events
///
/// Emission is best-effort. Implementations should swallow (and log) their
/// own delivery failures instead of reporting them back to the pipeline.
#[async_trait]
pub trait StatusChannel: Send + Sync {
    async fn emit(&self, event: StatusEvent);
}

/// Channel that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChannel;

#[async_trait]
impl StatusChannel for NoopChannel {
    async fn emit(&self, _event: StatusEvent) {}
}

/// Channel that keeps events in memory
#[derive(Debug, Default)]
pub struct CollectingChannel {
    events: Mutex<Vec<StatusEvent>>,
}

impl CollectingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<StatusEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drain the events received so far
    pub fn take(&self) -> Vec<StatusEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl StatusChannel for CollectingChannel {
    async fn emit(&self, event: StatusEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Channel backed by a synchronous callback
pub struct FnChannel<F>(F);

impl<F> FnChannel<F>
where
    F: Fn(StatusEvent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

#[async_trait]
impl<F> StatusChannel for FnChannel<F>
where
    F: Fn(StatusEvent) + Send + Sync,
{
    async fn emit(&self, event: StatusEvent) {
        (self.0)(event);
    }
}

#[async_trait]
impl StatusChannel for mpsc::UnboundedSender<StatusEvent> {
    async fn emit(&self, event: StatusEvent) {
        if self.send(event).is_err() {
            warn!("Status receiver dropped, event discarded");
        }
    }
}

const IDLE: u8 = 0;
const IN_PROGRESS: u8 = 1;
const FINISHED: u8 = 2;

/// Per-invocation driver around an optional [`StatusChannel`]
///
/// Tracks the `Idle -> InProgress -> {Success, Error}` lifecycle. Events
/// sent after the terminal one are discarded. A missing channel turns every
/// emission into a no-op.
pub struct StatusReporter<'a> {
    channel: Option<&'a dyn StatusChannel>,
    state: AtomicU8,
}

impl<'a> StatusReporter<'a> {
    pub fn new(channel: Option<&'a dyn StatusChannel>) -> Self {
        Self {
            channel,
            state: AtomicU8::new(IDLE),
        }
    }

    pub async fn progress(&self, description: impl Into<String>) {
        let accepted = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                (state != FINISHED).then_some(IN_PROGRESS)
            })
            .is_ok();
        self.send(StatusEvent::progress(description), accepted).await;
    }

    pub async fn error(&self, description: impl Into<String>) {
        self.finish(StatusEvent::error(description)).await;
    }

    pub async fn success(&self, description: impl Into<String>) {
        self.finish(StatusEvent::success(description)).await;
    }

    async fn finish(&self, event: StatusEvent) {
        let accepted = self.state.swap(FINISHED, Ordering::AcqRel) != FINISHED;
        self.send(event, accepted).await;
    }

    async fn send(&self, event: StatusEvent, accepted: bool) {
        if !accepted {
            warn!(description = %event.description, "Invocation already finished, status event dropped");
            return;
        }
        if let Some(channel) = self.channel {
            channel.emit(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let event = StatusEvent::progress("Scraping https://example.com");
        assert_eq!(event.status, Status::InProgress);
        assert!(!event.done);

        assert!(StatusEvent::error("boom").done);
        assert!(StatusEvent::success("ok").done);
    }

    #[test]
    fn test_event_envelope() {
        let message = StatusEvent::success("Done").to_message();
        assert_eq!(message["type"], "status");
        assert_eq!(message["data"]["status"], "success");
        assert_eq!(message["data"]["description"], "Done");
        assert_eq!(message["data"]["done"], true);

        let message = StatusEvent::progress("Working").to_message();
        assert_eq!(message["data"]["status"], "in_progress");
        assert_eq!(message["data"]["done"], false);
    }

    #[tokio::test]
    async fn test_reporter_orders_events() {
        let channel = CollectingChannel::new();
        let reporter = StatusReporter::new(Some(&channel));

        reporter.progress("one").await;
        reporter.progress("two").await;
        reporter.success("three").await;

        let events = channel.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].description, "one");
        assert_eq!(events[1].description, "two");
        assert_eq!(events[2], StatusEvent::success("three"));
    }

    #[tokio::test]
    async fn test_reporter_single_terminal_event() {
        let channel = CollectingChannel::new();
        let reporter = StatusReporter::new(Some(&channel));

        reporter.progress("start").await;
        reporter.error("failed").await;
        reporter.success("late").await;
        reporter.progress("later").await;

        let events = channel.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events.iter().filter(|e| e.done).count(), 1);
        assert_eq!(events[1].status, Status::Error);
    }

    #[tokio::test]
    async fn test_reporter_without_channel() {
        let reporter = StatusReporter::new(None);
        reporter.progress("start").await;
        reporter.success("done").await;
        reporter.error("late").await;
    }

    #[tokio::test]
    async fn test_mpsc_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.emit(StatusEvent::progress("queued")).await;
        assert_eq!(rx.recv().await.unwrap().description, "queued");

        drop(rx);
        // Closed receiver must not panic
        tx.emit(StatusEvent::progress("lost")).await;
    }

    #[tokio::test]
    async fn test_fn_channel() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let channel = FnChannel::new(move |event: StatusEvent| {
            sink.lock().unwrap().push(event.description);
        });

        channel.emit(StatusEvent::progress("hello")).await;
        assert_eq!(*seen.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_collecting_channel_take() {
        let channel = CollectingChannel::new();
        channel.emit(StatusEvent::progress("a")).await;
        assert_eq!(channel.take().len(), 1);
        assert!(channel.events().is_empty());
    }
}
