use std::sync::RwLock;

use maildex_types::{MessageSource, SourceKind};

use crate::error::IndexResult;
use crate::traits::MessageIndex;

/// In-memory, `Vec`-backed message index.
///
/// Intended for tests and embedding. Records are held behind a `RwLock` and
/// returned in insertion order, which stands in for the host database's
/// own ordering.
pub struct InMemoryIndex {
    records: RwLock<Vec<MessageSource>>,
}

impl InMemoryIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Create an index pre-populated with the given sources.
    pub fn with_sources(sources: impl IntoIterator<Item = MessageSource>) -> Self {
        Self {
            records: RwLock::new(sources.into_iter().collect()),
        }
    }

    /// Number of records of the given kind.
    pub fn count_kind(&self, kind: SourceKind) -> usize {
        self.records
            .read()
            .expect("lock poisoned")
            .iter()
            .filter(|s| s.kind() == kind)
            .count()
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.records.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageIndex for InMemoryIndex {
    fn sources(&self) -> IndexResult<Vec<MessageSource>> {
        Ok(self.records.read().expect("lock poisoned").clone())
    }

    fn record(&self, source: MessageSource) -> IndexResult<()> {
        self.records.write().expect("lock poisoned").push(source);
        Ok(())
    }

    fn len(&self) -> IndexResult<usize> {
        Ok(self.records.read().expect("lock poisoned").len())
    }
}

impl std::fmt::Debug for InMemoryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.records.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryIndex")
            .field("record_count", &count)
            .finish()
    }
}
