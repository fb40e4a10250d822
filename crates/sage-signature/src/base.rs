//! Canonical signature-base construction (§4.6): each covered component
//! rendered as `"name": value\n`, terminated by the `@signature-params`
//! line with no trailing newline.

use sage_types::envelope::PacketEnvelope;

use crate::input::SignatureInput;

/// Builds the exact byte sequence that gets Ed25519-signed (and, on
/// verification, re-built and compared against). Each of
/// [`crate::COVERED_COMPONENTS`] contributes one `"name": value` line in
/// order, followed by the `@signature-params` line carrying the rendered
/// `SignatureInput` — with no trailing newline after the final line.
pub fn build_signature_base(envelope: &PacketEnvelope, input: &SignatureInput) -> Vec<u8> {
    let lines = [
        format!("\"@method\": {}", envelope.method),
        format!("\"@authority\": {}", envelope.authority),
        format!("\"@path\": {}", envelope.path),
        format!("\"content-digest\": {}", envelope.content_digest),
        format!("\"date\": {}", envelope.date),
        format!("\"@signature-params\": {input}"),
    ];
    lines.join("\n").into_bytes()
}
