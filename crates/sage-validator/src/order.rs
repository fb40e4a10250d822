//! Per-session ordering and duplicate message-id tracking.
//!
//! Grounded on the sliding-window replay-token tracker pattern (seen-set
//! plus a retention window), adapted here to two distinct checks: a
//! monotonic timestamp watermark with a small backward-slack allowance,
//! and a TTL-bounded seen-set of message ids.

use std::collections::HashMap;

use time::{Duration, OffsetDateTime};

pub struct OrderTracker {
    high_watermark: Option<OffsetDateTime>,
    seen_message_ids: HashMap<String, OffsetDateTime>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self {
            high_watermark: None,
            seen_message_ids: HashMap::new(),
        }
    }

    /// Accepts `packet_ts` if it is no further than `window` behind the
    /// highest timestamp seen so far on this session. Advances the
    /// watermark on acceptance.
    pub fn accept(&mut self, packet_ts: OffsetDateTime, window: Duration) -> bool {
        match self.high_watermark {
            None => {
                self.high_watermark = Some(packet_ts);
                true
            }
            Some(watermark) => {
                if packet_ts + window < watermark {
                    false
                } else {
                    if packet_ts > watermark {
                        self.high_watermark = Some(packet_ts);
                    }
                    true
                }
            }
        }
    }

    /// Accepts `message_id` if it has not been recorded within `ttl` of
    /// `now`. Sweeps expired entries on every call so the map does not
    /// grow unbounded between background cleanup passes.
    pub fn accept_message_id(&mut self, message_id: String, now: OffsetDateTime, ttl: Duration) -> bool {
        self.seen_message_ids.retain(|_, seen_at| now - *seen_at < ttl);

        if self.seen_message_ids.contains_key(&message_id) {
            return false;
        }
        self.seen_message_ids.insert(message_id, now);
        true
    }
}

impl Default for OrderTracker {
    fn default() -> Self {
        Self::new()
    }
}
