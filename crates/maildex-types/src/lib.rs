//! Foundation types for maildex.
//!
//! This crate provides the identifier and source-descriptor types used
//! throughout the maildex system. Every other maildex crate depends on
//! `maildex-types`.
//!
//! # Key Types
//!
//! - [`BlobId`] — Fixed-length hexadecimal identifier naming one object in a
//!   content-addressed store
//! - [`MessageSource`] — Where an indexed message's raw bytes live (plain
//!   file or git blob)
//! - [`PendingMessage`] — A newly discovered message awaiting indexing

pub mod blob;
pub mod error;
pub mod source;

pub use blob::BlobId;
pub use error::TypeError;
pub use source::{MessageSource, PendingMessage, SourceKind};
