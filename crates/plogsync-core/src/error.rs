//! Error types for command construction and the wire codec.

use thiserror::Error;

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while building or translating commands.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A peer-targeted command was built without a usable peer identifier.
    #[error("peer_id is required to make a PeerRequest")]
    MissingPeerIdentifier,

    /// A record publish was attempted while half of the key/value pair is
    /// still absent. Names the missing half.
    #[error("cannot publish a record while {0} is absent")]
    MissingPrerequisite(&'static str),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),
}
