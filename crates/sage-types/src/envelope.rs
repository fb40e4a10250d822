//! The packet envelope: the set of fields the RFC 9421 signature layer
//! covers and verifies on every protected-channel request.
//!
//! Reference §3 "Packet envelope (signature layer)". This is a
//! transport-agnostic representation — `sage-gateway` builds one of these
//! from whatever concrete request type its embedder owns; this crate never
//! touches an actual socket or HTTP library.

use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime, UtcOffset, Weekday};

/// The components covered by an RFC 9421 signature on a protected-channel
/// request, plus the signature itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketEnvelope {
    pub method: String,
    pub authority: String,
    pub path: String,
    pub content_type: String,
    pub content_length: u64,
    /// `sha-256=:<base64(SHA-256(body))>:`
    pub content_digest: String,
    /// The `Date:` header value, rendered RFC 1123-style (see
    /// [`format_http_date`]). One of the five components §4.6 requires the
    /// signature to cover.
    pub date: String,
    /// Unix timestamp from the `created` signature parameter.
    pub created_ts: i64,
    pub nonce: String,
    /// The RFC 9421 `keyid`, which names a `SessionId`.
    pub key_id: String,
    /// `sig1=:<base64(signature)>:`
    pub signature: String,
}

/// Renders `ts` as an RFC 1123 `Date:` header value, e.g.
/// `"Tue, 15 Nov 1994 08:12:31 GMT"`, always in GMT.
pub fn format_http_date(ts: OffsetDateTime) -> String {
    let ts = ts.to_offset(UtcOffset::UTC);
    let weekday = match ts.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    };
    let month = match ts.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };
    format!(
        "{weekday}, {:02} {month} {:04} {:02}:{:02}:{:02} GMT",
        ts.day(),
        ts.year(),
        ts.hour(),
        ts.minute(),
        ts.second(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trips_through_json() {
        let envelope = PacketEnvelope {
            method: "POST".to_string(),
            authority: "agent.example".to_string(),
            path: "/sage/v1/messages".to_string(),
            content_type: "application/json".to_string(),
            content_length: 42,
            content_digest: "sha-256=:X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=:".to_string(),
            date: "Tue, 15 Nov 1994 08:12:31 GMT".to_string(),
            created_ts: 1_234_567_890,
            nonce: "n-1".to_string(),
            key_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            signature: "sig1=:AAAA:".to_string(),
        };

        let json = serde_json::to_string(&envelope).unwrap();
        let round_tripped: PacketEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(round_tripped.nonce, envelope.nonce);
        assert_eq!(round_tripped.key_id, envelope.key_id);
    }

    #[test]
    fn http_date_matches_rfc1123_shape() {
        let ts = OffsetDateTime::from_unix_timestamp(784_857_600).unwrap(); // 1994-11-15 00:00:00 UTC
        assert_eq!(format_http_date(ts), "Tue, 15 Nov 1994 00:00:00 GMT");
    }
}
