//! Readiness sentinel handling.
//!
//! The chat service embeds a marker token in the assistant reply once enough
//! context has been gathered for card selection. The marker is stripped from
//! the displayed text; it only sets a flag, it never advances the phase.

/// Sentinel token the chat service embeds in its reply.
pub const READINESS_MARKER: &str = "[[READY]]";

/// Remove every occurrence of the readiness marker.
///
/// Returns the cleaned display text and whether the marker was present.
pub fn strip_readiness_marker(reply: &str) -> (String, bool) {
    if !reply.contains(READINESS_MARKER) {
        return (reply.trim().to_string(), false);
    }
    let cleaned = reply.replace(READINESS_MARKER, "");
    (cleaned.trim().to_string(), true)
}
