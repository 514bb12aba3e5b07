//! The runtime connection handle contract.

use async_trait::async_trait;

/// The single command/response channel into the peer-to-peer runtime.
///
/// One logical connection exists per application instance, shared as
/// `Arc<dyn Piper>` by everything that issues commands. `command` takes an
/// encoded command envelope and resolves with the raw reply bytes once the
/// runtime's correlated response arrives, or with an error if the
/// underlying operation failed. Correlation bookkeeping lives inside the
/// handle; concurrent calls resolve independently and may complete in any
/// order.
#[async_trait]
pub trait Piper: Send + Sync {
    async fn command(&self, encoded: Vec<u8>) -> anyhow::Result<Vec<u8>>;
}
