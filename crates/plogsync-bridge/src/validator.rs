//! Precondition gate for peer-targeted commands.
//!
//! Runs strictly before any codec or connection-handle interaction. Pure
//! and synchronous, no side effects; a rejection is reported through the
//! same [`BridgeError`] surface as network failures.

use crate::error::{BridgeError, BridgeResult};

/// Check that a peer identifier is usable as a dispatch target.
///
/// Rejects empty input and anything that is not an identifier (embedded
/// whitespace or control characters). Peer ids on the wire are base58
/// strings; content beyond that is left for the runtime to judge.
pub fn validate_peer_id(peer_id: &str) -> BridgeResult<()> {
    if peer_id.is_empty() {
        return Err(BridgeError::MissingPeerIdentifier("peer_id is empty"));
    }
    if peer_id
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(BridgeError::MissingPeerIdentifier(
            "peer_id contains whitespace or control characters",
        ));
    }
    Ok(())
}
