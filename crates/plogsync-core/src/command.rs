//! The typed command set sent to the runtime, and the decoded replies.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::types::{ContentAddress, Plog, Vlad};

/// One requested network operation.
///
/// Commands are built per invocation, encoded, sent through the connection
/// handle, and discarded once their response resolves. The set is closed:
/// the codec and the dispatcher both match it exhaustively, so a new
/// command kind is a compile-checked extension.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Publish the current log's content address under the stable key.
    PutRecord { key: Vlad, value: ContentAddress },
    /// Ask a specific peer to act on a request payload, e.g. pin the log.
    PeerRequest { request: Vec<u8>, peer_id: String },
}

impl Command {
    /// Build a `PutRecord` from the current state snapshots.
    ///
    /// A record needs both halves of the key/value pair; while either is
    /// still absent this fails with `MissingPrerequisite` naming the
    /// missing one, before anything touches the network.
    pub fn put_record(vlad: Option<&Vlad>, plog: Option<&Plog>) -> CodecResult<Self> {
        let vlad = vlad.ok_or(CodecError::MissingPrerequisite("vlad"))?;
        let plog = plog.ok_or(CodecError::MissingPrerequisite("plog"))?;
        Ok(Self::PutRecord {
            key: vlad.clone(),
            value: plog.content_address(),
        })
    }

    /// Build a peer-targeted request.
    ///
    /// The dispatcher validates the peer identifier before calling this;
    /// the check is repeated here so the command cannot be constructed
    /// around the validator.
    pub fn peer_request(request: &[u8], peer_id: &str) -> CodecResult<Self> {
        if peer_id.is_empty() {
            return Err(CodecError::MissingPeerIdentifier);
        }
        Ok(Self::PeerRequest {
            request: request.to_vec(),
            peer_id: peer_id.to_string(),
        })
    }

    /// Human-readable name of this command kind, for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Command::PutRecord { .. } => "PutRecord",
            Command::PeerRequest { .. } => "PeerRequest",
        }
    }
}

/// Decoded reply from the runtime, correlated one-to-one with the command
/// that produced it.
///
/// The runtime acknowledges a publish by echoing the stored record and
/// answers a peer request with the request envelope the peer acted on. A
/// runtime-side failure arrives as `Error`; the dispatcher converts it to
/// a typed failure instead of returning it to callers as a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Response {
    /// Acknowledgement for a published record.
    PutRecord { key: Vec<u8>, value: Vec<u8> },
    /// Reply to a peer-targeted request.
    PeerRequest { request: Vec<u8>, peer_id: String },
    /// Failure reported by the runtime itself.
    Error { message: String },
}

impl Response {
    /// Human-readable name of this response kind, for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Response::PutRecord { .. } => "PutRecord",
            Response::PeerRequest { .. } => "PeerRequest",
            Response::Error { .. } => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_record_requires_vlad() {
        let plog = Plog::new(b"log".to_vec());
        let err = Command::put_record(None, Some(&plog)).unwrap_err();
        assert!(matches!(err, CodecError::MissingPrerequisite("vlad")));
    }

    #[test]
    fn put_record_requires_plog() {
        let vlad = Vlad::new(b"addr".to_vec());
        let err = Command::put_record(Some(&vlad), None).unwrap_err();
        assert!(matches!(err, CodecError::MissingPrerequisite("plog")));
    }

    #[test]
    fn put_record_derives_content_address() {
        let vlad = Vlad::new(b"addr".to_vec());
        let plog = Plog::new(b"log".to_vec());

        let cmd = Command::put_record(Some(&vlad), Some(&plog)).unwrap();
        match cmd {
            Command::PutRecord { key, value } => {
                assert_eq!(key, vlad);
                assert_eq!(value, plog.content_address());
            }
            other => panic!("expected PutRecord, got {}", other.type_name()),
        }
    }

    #[test]
    fn peer_request_rejects_empty_peer_id() {
        let err = Command::peer_request(&[1, 2, 3], "").unwrap_err();
        assert!(matches!(err, CodecError::MissingPeerIdentifier));
    }

    #[test]
    fn peer_request_keeps_payload_and_peer() {
        let cmd = Command::peer_request(&[9, 8, 7], "12D3KooWPeer").unwrap();
        assert_eq!(
            cmd,
            Command::PeerRequest {
                request: vec![9, 8, 7],
                peer_id: "12D3KooWPeer".to_string(),
            }
        );
    }

    #[test]
    fn peer_request_allows_empty_payload() {
        // A zero-length request is a valid payload; only the peer id is
        // a hard prerequisite.
        let cmd = Command::peer_request(&[], "12D3KooWPeer").unwrap();
        assert!(matches!(cmd, Command::PeerRequest { request, .. } if request.is_empty()));
    }
}
