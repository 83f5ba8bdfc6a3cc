//! Git object-store message source.
//!
//! A git repository can serve as a message store: one message per blob,
//! committed under a two-level folder layout (`folder/subfolder/message`).
//! This crate implements the ingestion side of that arrangement. It decides
//! which blobs are new — a [`SeenSet`] of already-indexed identifiers plus a
//! byte-level filter over `rev-list --objects` output — and retrieves blob
//! contents on demand, either into memory or straight into a file.
//!
//! All repository access goes through the external `git` binary; this crate
//! never opens the object database itself. Each operation spawns one child
//! process, consumes its standard output, and waits for it to finish before
//! returning.

pub mod error;
pub mod list;
pub mod seen;
pub mod source;

pub use error::{GitError, GitResult};
pub use list::parse_listing_line;
pub use seen::SeenSet;
pub use source::GitSource;
