//! Command dispatcher, the single orchestration point between local state
//! and the network runtime.
//!
//! Every operation follows the same pipeline: validate preconditions,
//! build a typed command, encode it, send it through the connection
//! handle, await the one correlated response, decode it. Validation and
//! encoding are pure and synchronous; the awaited response is the only
//! suspension point, bounded by the configured command timeout. All
//! failure paths collapse to a typed [`BridgeError`] and are logged on the
//! operator channel; nothing panics across this boundary and no failure
//! mutates local state.

use std::sync::Arc;
use std::time::Duration;

use plogsync_core::{Command, Plog, Response, Vlad, codec};
use plogsync_state::StateCell;
use tracing::{debug, error};

use crate::config::{BridgeConfig, DEFAULT_COMMAND_TIMEOUT};
use crate::error::{BridgeError, BridgeResult};
use crate::piper::Piper;
use crate::validator::validate_peer_id;

/// Explicitly constructed connection context.
///
/// Owns the reactive cells and the connection handle for one application
/// instance. Created once at connection start and shared by reference;
/// nothing lives in module-level state.
pub struct SyncContext {
    /// Current log snapshot, absent until first established.
    pub log: StateCell<Plog>,
    /// Stable publish address, absent until first established. Once set
    /// for a log lineage it does not change across log updates.
    pub vlad: StateCell<Vlad>,
    piper: Arc<dyn Piper>,
}

impl SyncContext {
    /// Create a context around a connection handle, both cells absent.
    pub fn new(piper: Arc<dyn Piper>) -> Self {
        Self {
            log: StateCell::new(),
            vlad: StateCell::new(),
            piper,
        }
    }
}

/// Sends commands over the context's handle and correlates responses.
///
/// Cheap to clone; clones share the same context. Commands are
/// fire-and-resolve: no queueing, no coalescing, no retry. Concurrent
/// calls are independent and independently correlated by the handle.
#[derive(Clone)]
pub struct Dispatcher {
    ctx: Arc<SyncContext>,
    command_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher with the default command timeout.
    pub fn new(ctx: Arc<SyncContext>) -> Self {
        Self {
            ctx,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Create a dispatcher with the configured command timeout.
    pub fn with_config(ctx: Arc<SyncContext>, config: &BridgeConfig) -> Self {
        Self {
            command_timeout: config.command_timeout(),
            ctx,
        }
    }

    /// The context this dispatcher operates on.
    pub fn context(&self) -> &Arc<SyncContext> {
        &self.ctx
    }

    /// Ask a specific peer to act on a request payload, e.g. pin the
    /// current log.
    ///
    /// The peer identifier is validated before anything touches the
    /// codec or the connection handle.
    pub async fn request_peer_pin(
        &self,
        request: &[u8],
        peer_id: &str,
    ) -> BridgeResult<Response> {
        let result = self.try_request_peer_pin(request, peer_id).await;
        if let Err(e) = &result {
            error!(%peer_id, error = %e, "peer pin request failed");
        }
        result
    }

    async fn try_request_peer_pin(
        &self,
        request: &[u8],
        peer_id: &str,
    ) -> BridgeResult<Response> {
        validate_peer_id(peer_id)?;
        let command = Command::peer_request(request, peer_id)?;
        debug!(%peer_id, bytes = request.len(), "requesting peer pin");
        self.send(command).await
    }

    /// Publish the current log's content address under the stable key.
    ///
    /// Reads the vlad and log snapshots from the context cells at call
    /// time; while either is absent the call fails before any network
    /// I/O. Two concurrent calls each publish their own snapshot.
    pub async fn publish_log_update(&self) -> BridgeResult<Response> {
        let result = self.try_publish_log_update().await;
        if let Err(e) = &result {
            error!(error = %e, "log publish failed");
        }
        result
    }

    async fn try_publish_log_update(&self) -> BridgeResult<Response> {
        let vlad = self.ctx.vlad.get();
        let plog = self.ctx.log.get();
        let command = Command::put_record(vlad.as_ref(), plog.as_ref())?;
        if let Some(vlad) = &vlad {
            debug!(key = %vlad, "publishing log update");
        }
        self.send(command).await
    }

    /// Encode, send, and decode one command.
    ///
    /// A reply the runtime itself marks as a failure is converted to a
    /// typed error here rather than handed to callers as a success.
    async fn send(&self, command: Command) -> BridgeResult<Response> {
        let kind = command.type_name();
        let encoded = codec::encode(&command)?;

        let raw = tokio::time::timeout(self.command_timeout, self.ctx.piper.command(encoded))
            .await
            .map_err(|_| BridgeError::Timeout(self.command_timeout))?
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        match codec::decode(&raw)? {
            Response::Error { message } => Err(BridgeError::Runtime(message)),
            response => {
                debug!(command = kind, response = response.type_name(), "command resolved");
                Ok(response)
            }
        }
    }
}
