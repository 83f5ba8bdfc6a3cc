//! The message-index seam for maildex.
//!
//! The index itself — the database that records which messages have been
//! indexed, under what source — belongs to the host indexer. This crate
//! defines the narrow interface maildex needs from it: iterate every recorded
//! message so a discovery pass can skip the ones already known.
//!
//! # Modules
//!
//! - [`error`] — Error types for index operations
//! - [`traits`] — The [`MessageIndex`] trait defining the iteration interface
//! - [`memory`] — In-memory [`InMemoryIndex`] for tests and embedding
//! - [`stamp`] — The last-run stamp read from the index file's mtime

pub mod error;
pub mod memory;
pub mod stamp;
pub mod traits;

pub use error::{IndexError, IndexResult};
pub use memory::InMemoryIndex;
pub use stamp::last_indexed_at;
pub use traits::MessageIndex;
