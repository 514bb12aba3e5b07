//! plogsync-state: reactive state cells.
//!
//! A [`StateCell`] holds one optional value (absent until first
//! established), supports atomic replacement, and notifies subscribers
//! synchronously on every replacement. The cell is `Clone` + `Send` +
//! `Sync` (backed by `Arc`) and can be shared across threads and tasks.
//!
//! # Notification contract
//!
//! `set` and `clear` notify every subscriber registered at that moment
//! exactly once, with the new value, before returning control. Callbacks
//! run with no cell lock held, so a callback may read the cell, subscribe,
//! or set it again; a nested `set` performs its own full notification pass
//! before the outer pass resumes (depth-first). Subscribers added during a
//! pass are not invoked for the value that triggered it.

pub mod cell;

pub use cell::{StateCell, Subscription};
