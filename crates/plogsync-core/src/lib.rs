//! plogsync-core: shared types, the typed command set, and the wire codec.
//!
//! The runtime connection speaks a JSON envelope tagged by `action`. This
//! crate owns the typed side of that boundary: the domain newtypes
//! ([`Plog`], [`Vlad`], [`ContentAddress`]), the closed [`Command`] set,
//! the decoded [`Response`] shape, and the [`codec`] that converts between
//! them and raw wire bytes.

pub mod codec;
pub mod command;
pub mod error;
pub mod types;

pub use command::{Command, Response};
pub use error::{CodecError, CodecResult};
pub use types::{ContentAddress, Plog, Vlad};
