//! Domain newtypes shared across the plogsync crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The current verifiable log snapshot, opaque bytes at this layer.
///
/// A `Plog` is replaced wholesale on every update and never mutated in
/// place. State containers hold `Option<Plog>` so "not yet established"
/// stays distinct from an empty log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plog(Vec<u8>);

impl Plog {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive the content address of this snapshot.
    pub fn content_address(&self) -> ContentAddress {
        ContentAddress::of(&self.0)
    }
}

/// The stable address under which a log's content address is published.
///
/// Invariant: once established for a log lineage, the vlad does not change
/// across log updates. It is the key of the published record; the log's
/// content address is the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vlad(Vec<u8>);

impl Vlad {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Vlad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// SHA-256 content address of a log snapshot.
///
/// The value half of a published record; hex-encoded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAddress([u8; 32]);

impl ContentAddress {
    /// Compute the address of a byte sequence.
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
