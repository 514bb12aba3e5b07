//! plogsync-bridge: the orchestration core between local reactive state
//! and the peer-to-peer runtime.
//!
//! # Architecture
//!
//! A [`SyncContext`] owns the two reactive cells (current log, stable
//! publish address) and the shared [`Piper`] connection handle; it is
//! constructed once per application instance. The [`Dispatcher`] turns
//! explicit calls and observed state changes into typed commands, sends
//! them through the handle, and correlates the asynchronous responses.
//! The [`AutoPublisher`] subscribes to the log cell so every local log
//! replacement republishes its content address under the stable key.
//!
//! All failures, from a rejected peer identifier to a hung transport,
//! collapse into the typed [`BridgeError`] surface and are logged; no
//! command mutates local state and no failure tears down the reactive
//! pipeline.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod piper;
pub mod publisher;
pub mod validator;

pub use config::BridgeConfig;
pub use dispatcher::{Dispatcher, SyncContext};
pub use error::{BridgeError, BridgeResult};
pub use piper::Piper;
pub use publisher::AutoPublisher;
pub use validator::validate_peer_id;
