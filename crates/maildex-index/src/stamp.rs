//! The last-run stamp: when did the previous indexing run happen?
//!
//! The host indexer rewrites its database file at the end of every run, so the
//! file's modification time is a usable "last indexed at" instant. Discovery
//! uses it to bound an incremental scan; when the file cannot be read (first
//! run, missing database) there is no bound and the scan is a full one.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Modification time of the index database file, as a UTC instant.
///
/// Returns `None` when the file does not exist or its metadata cannot be
/// read — callers treat that as "no previous run".
pub fn last_indexed_at(database: &Path) -> Option<DateTime<Utc>> {
    let modified = fs::metadata(database).ok()?.modified().ok()?;
    Some(DateTime::<Utc>::from(modified))
}
