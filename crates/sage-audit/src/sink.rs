//! The `AuditSink` port and its default `tracing`-backed implementation.

use async_trait::async_trait;
use tracing::warn;

use crate::event::AuditEvent;

/// Receives every [`AuditEvent`] recorded across the security engine.
/// An embedder may implement this itself (to forward into its own
/// alerting pipeline) in addition to, or instead of, [`TracingSink`].
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent);
}

/// Logs every event at `tracing::warn!` with structured fields. The
/// default sink — always active, regardless of whether an embedder also
/// subscribes to [`crate::AuditBus`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl AuditSink for TracingSink {
    async fn record(&self, event: AuditEvent) {
        warn!(
            peer_did = event.peer_did.as_ref().map(|d| d.as_str()).unwrap_or("unknown"),
            error_code = %event.error_code,
            packet_id = %event.packet_id,
            timestamp = %event.timestamp,
            "rejected packet"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sage_types::error::ErrorCode;
    use time::OffsetDateTime;

    #[tokio::test]
    async fn tracing_sink_does_not_panic_on_record() {
        let sink = TracingSink;
        let event = AuditEvent::new(OffsetDateTime::UNIX_EPOCH, None, ErrorCode::ReplayAttack, "n-1");
        sink.record(event).await;
    }
}
