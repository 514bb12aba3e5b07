//! Auto-publisher, the reactive wiring from log changes to the network.
//!
//! Every replacement of the log snapshot triggers one publish of its
//! content address under the stable key. A failed publish is logged and
//! the loop keeps running; one failed network operation never tears down
//! the pipeline.

use plogsync_state::Subscription;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::dispatcher::Dispatcher;

/// Background task republishing the log on every change.
///
/// Change notifications arrive synchronously from the cell and are
/// forwarded over a channel, so the subscriber callback never blocks the
/// writer; the publish itself runs on the spawned task.
pub struct AutoPublisher {
    handle: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
    _subscription: Subscription,
}

impl AutoPublisher {
    /// Subscribe to the context's log cell and start the publish loop.
    ///
    /// Must be called within a tokio runtime. Only replacements with a
    /// value trigger a publish; clearing the log is not an update to push
    /// to the network. Dropping the publisher without [`stop`] closes the
    /// tick channel and the task drains and exits on its own.
    ///
    /// [`stop`]: AutoPublisher::stop
    pub fn start(dispatcher: Dispatcher) -> Self {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let subscription = dispatcher.context().log.subscribe(move |value| {
            if value.is_some() {
                let _ = tick_tx.send(());
            }
        });

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    tick = tick_rx.recv() => {
                        if tick.is_none() {
                            break;
                        }
                        match dispatcher.publish_log_update().await {
                            Ok(response) => {
                                debug!(response = response.type_name(), "log change published");
                            }
                            // The dispatcher already reported this on the
                            // operator channel.
                            Err(e) => debug!(error = %e, "log change publish failed"),
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("auto-publisher shutting down");
                        break;
                    }
                }
            }
        });

        info!("auto-publisher started");
        Self {
            handle,
            shutdown_tx,
            _subscription: subscription,
        }
    }

    /// Stop observing and end the publish loop.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        self.handle.abort();
        info!("auto-publisher stopped");
    }
}
