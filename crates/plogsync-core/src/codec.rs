//! Wire codec for the runtime's command envelope.
//!
//! The runtime speaks a JSON envelope tagged by `action`, with byte
//! payloads spelled as arrays of integers 0 through 255 so they survive
//! transports without native binary support. The conversion is lossless
//! and order-preserving for payloads of any length, including empty.

use serde::Serialize;

use crate::command::{Command, Response};
use crate::error::{CodecError, CodecResult};

/// Wire form of [`Command`], tagged the way the runtime expects.
#[derive(Serialize)]
#[serde(tag = "action")]
enum WireCommand {
    PutRecord { key: Vec<u8>, value: Vec<u8> },
    PeerRequest { request: Vec<u8>, peer_id: String },
}

/// Encode a command into the runtime's wire representation.
pub fn encode(command: &Command) -> CodecResult<Vec<u8>> {
    let wire = match command {
        Command::PutRecord { key, value } => WireCommand::PutRecord {
            key: key.as_bytes().to_vec(),
            value: value.to_vec(),
        },
        Command::PeerRequest { request, peer_id } => WireCommand::PeerRequest {
            request: request.clone(),
            peer_id: peer_id.clone(),
        },
    };
    serde_json::to_vec(&wire).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode and validate a raw runtime reply.
pub fn decode(raw: &[u8]) -> CodecResult<Response> {
    serde_json::from_slice(raw).map_err(|e| CodecError::Decode(e.to_string()))
}
