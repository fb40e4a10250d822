//! # Message Validation Pipeline (C5)
//!
//! Runs the ordered checks of §4.5 against an inbound, already
//! signature-verified packet: timestamp tolerance, nonce replay, per-session
//! ordering, and duplicate message-id. The pipeline stops at the first
//! failing check and reports which one failed, matching the ordering the
//! spec requires so a stale-but-fresh-nonce packet is reported as stale
//! rather than as a replay.

mod config;
mod order;
mod result;

pub use config::ValidatorConfig;
pub use result::{ValidationFailure, ValidationResult};

use sage_stores::NonceStore;
use time::OffsetDateTime;

use order::OrderTracker;

/// Validates inbound packets against a session's replay and ordering
/// state. One `MessageValidator` is expected to be shared across a
/// session's lifetime (it owns the per-session order tracker); callers
/// key a map of these by `SessionId` in practice.
pub struct MessageValidator<N> {
    nonce_store: N,
    config: ValidatorConfig,
    order: OrderTracker,
}

impl<N: NonceStore> MessageValidator<N> {
    pub fn new(nonce_store: N, config: ValidatorConfig) -> Self {
        Self {
            nonce_store,
            config,
            order: OrderTracker::new(),
        }
    }

    /// Runs the full pipeline against one packet.
    ///
    /// `packet_ts` is the packet's application timestamp (distinct from
    /// the RFC 9421 signature `created` parameter, which `sage-signature`
    /// already checked before this is called). `message_id` is an
    /// application-supplied identifier used only for the duplicate check;
    /// the nonce and message-id checks are independent even though both
    /// guard against replay, because a message can be resent verbatim
    /// (same nonce) or resubmitted with a fresh nonce but identical
    /// business payload (same message-id).
    pub async fn validate(
        &mut self,
        now: OffsetDateTime,
        packet_ts: OffsetDateTime,
        nonce: &str,
        message_id: &str,
    ) -> ValidationResult {
        let drift = if packet_ts > now { packet_ts - now } else { now - packet_ts };
        if drift > self.config.timestamp_tolerance {
            return ValidationResult::failure(ValidationFailure::TimestampOutsideTolerance);
        }

        if !self.nonce_store.check_and_store(nonce, self.config.nonce_ttl).await {
            return ValidationResult::failure(ValidationFailure::NonceReplayed);
        }

        if !self.order.accept(packet_ts, self.config.max_out_of_order_window) {
            return ValidationResult::failure(ValidationFailure::OutOfOrder);
        }

        if !self.order.accept_message_id(message_id.to_string(), now, self.config.duplicate_ttl) {
            return ValidationResult::failure(ValidationFailure::DuplicateMessage);
        }

        ValidationResult::success()
    }
}
