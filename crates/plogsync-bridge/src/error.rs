//! The uniform failure surface of the bridge.

use std::time::Duration;

use plogsync_core::CodecError;
use thiserror::Error;

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Every way a dispatched command can fail.
///
/// All variants are surfaced as values from the dispatcher; none escape it
/// as a panic. Validation and codec failures are caught before any network
/// I/O is attempted.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A peer-targeted command was attempted without a usable peer
    /// identifier.
    #[error("peer request rejected: {0}")]
    MissingPeerIdentifier(&'static str),

    /// A record publish was attempted while the vlad or the log is still
    /// absent.
    #[error("cannot publish a record while {0} is absent")]
    MissingPrerequisite(&'static str),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),

    /// The connection handle rejected the command or the underlying
    /// network operation failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The runtime answered with its own failure report.
    #[error("runtime reported failure: {0}")]
    Runtime(String),

    /// No response arrived within the configured command timeout.
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

impl From<CodecError> for BridgeError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::MissingPeerIdentifier => {
                BridgeError::MissingPeerIdentifier("peer_id is absent")
            }
            CodecError::MissingPrerequisite(half) => BridgeError::MissingPrerequisite(half),
            CodecError::Encode(msg) => BridgeError::Encode(msg),
            CodecError::Decode(msg) => BridgeError::Decode(msg),
        }
    }
}
