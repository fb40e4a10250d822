//! In-process pub/sub for audit events: `tokio::sync::broadcast` wrapped
//! with a subscriber-count readout. A caller outside this crate's scope (a
//! metrics exporter, an alerting hook) subscribes without this crate
//! depending on any specific observability backend.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::event::AuditEvent;
use crate::sink::AuditSink;

const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Publishes every recorded [`AuditEvent`] to its subscribers. Also
/// itself an [`AuditSink`], so it can sit alongside [`crate::TracingSink`]
/// wherever a caller accumulates a `Vec<Box<dyn AuditSink>>`.
pub struct AuditBus {
    sender: broadcast::Sender<AuditEvent>,
}

impl AuditBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to every future event. Events published before this
    /// call are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<AuditEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AuditBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for AuditBus {
    async fn record(&self, event: AuditEvent) {
        // No subscribers is a normal, non-error state — nothing lost
        // that anyone asked to be told about.
        let _ = self.sender.send(event);
    }
}
