//! Seeding and discovery for one indexing run.

use chrono::{DateTime, Utc};
use maildex_git::{GitSource, SeenSet};
use maildex_index::MessageIndex;
use maildex_types::PendingMessage;
use tracing::{debug, warn};

use crate::error::IngestResult;

/// Seed `seen` with every blob the index already records.
///
/// File-backed records carry no blob identifier and are skipped; an index
/// that never ingested from a repository seeds nothing.
pub fn seed_seen(index: &dyn MessageIndex, seen: &mut SeenSet) -> IngestResult<()> {
    let mut seeded = 0usize;
    for source in index.sources()? {
        if let Some(id) = source.blob_id() {
            seen.insert(id);
            seeded += 1;
        }
    }
    debug!(seeded, "seen set seeded from index");
    Ok(())
}

/// One full discovery pass: seed from the index, then enumerate.
///
/// Returns the messages present in the repository but absent from the
/// index, in listing order. The seen-set lives only for this pass.
pub fn scan_git_source(
    source: &GitSource,
    index: &dyn MessageIndex,
    since: Option<DateTime<Utc>>,
) -> IngestResult<Vec<PendingMessage>> {
    let mut seen = SeenSet::new();
    seed_seen(index, &mut seen)?;
    let pending = source.discover(&mut seen, since)?;
    Ok(pending)
}

/// Propagation policy for an indexing run: an unconfigured repository
/// contributes nothing, and a failing one is logged and contributes
/// nothing, so the run carries on with its other sources.
pub fn collect_pending(
    source: Option<&GitSource>,
    index: &dyn MessageIndex,
    since: Option<DateTime<Utc>>,
) -> Vec<PendingMessage> {
    let Some(source) = source else {
        return Vec::new();
    };
    match scan_git_source(source, index, since) {
        Ok(pending) => pending,
        Err(e) => {
            warn!(error = %e, "skipping object-store source");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use maildex_index::{InMemoryIndex, IndexError, IndexResult};
    use maildex_types::{BlobId, MessageSource};

    use super::*;

    fn id(n: u8) -> BlobId {
        BlobId::from_bytes(&[n; 20])
    }

    /// Index whose every operation fails, for exercising the error paths.
    struct BrokenIndex;

    impl MessageIndex for BrokenIndex {
        fn sources(&self) -> IndexResult<Vec<MessageSource>> {
            Err(IndexError::Read("database unavailable".to_string()))
        }

        fn record(&self, _source: MessageSource) -> IndexResult<()> {
            Err(IndexError::Write("database unavailable".to_string()))
        }

        fn len(&self) -> IndexResult<usize> {
            Err(IndexError::Read("database unavailable".to_string()))
        }
    }

    #[test]
    fn seeding_takes_blob_records_and_skips_files() {
        let index = InMemoryIndex::with_sources(vec![
            MessageSource::git_blob(id(1)),
            MessageSource::file("/mail/cur/msg1"),
            MessageSource::git_blob(id(2)),
        ]);
        let mut seen = SeenSet::new();
        seed_seen(&index, &mut seen).unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&id(1)));
        assert!(seen.contains(&id(2)));
    }

    #[test]
    fn seeding_from_empty_index_seeds_nothing() {
        let index = InMemoryIndex::new();
        let mut seen = SeenSet::new();
        seed_seen(&index, &mut seen).unwrap();
        assert!(seen.is_empty());
    }

    #[test]
    fn broken_index_aborts_the_scan() {
        let source = GitSource::new("/tmp/repo.git");
        let err = scan_git_source(&source, &BrokenIndex, None).unwrap_err();
        assert!(matches!(err, crate::IngestError::Index(_)), "got {err:?}");
    }

    #[test]
    fn unconfigured_source_contributes_nothing() {
        let index = InMemoryIndex::new();
        let pending = collect_pending(None, &index, None);
        assert!(pending.is_empty());
    }

    #[test]
    fn failing_source_downgrades_to_nothing() {
        let index = InMemoryIndex::new();
        let source =
            GitSource::new("/tmp/repo.git").with_program("/nonexistent/maildex-no-such-program");
        let pending = collect_pending(Some(&source), &index, None);
        assert!(pending.is_empty());
    }

    #[test]
    fn broken_index_also_downgrades_in_collect() {
        let source = GitSource::new("/tmp/repo.git");
        let pending = collect_pending(Some(&source), &BrokenIndex, None);
        assert!(pending.is_empty());
    }

    #[cfg(unix)]
    mod with_fake_store {
        use std::fs;
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        use tempfile::TempDir;

        use super::*;

        fn fake_store(dir: &TempDir, body: &str) -> GitSource {
            let program = dir.path().join("fake-git");
            let mut f = fs::File::create(&program).unwrap();
            writeln!(f, "#!/bin/sh").unwrap();
            writeln!(f, "{body}").unwrap();
            drop(f);
            fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
            GitSource::new(dir.path().join("repo.git")).with_program(program)
        }

        #[test]
        fn scan_reports_only_unindexed_blobs() {
            let dir = TempDir::new().unwrap();
            let indexed = id(0x11);
            let fresh = id(0x22);
            let body = format!(
                "cat <<'LISTING'\n\
                 {indexed} aa/bb/oldmsg\n\
                 {fresh} aa/bb/newmsg\n\
                 {fresh} aa/bb/newmsg\n\
                 LISTING"
            );
            let source = fake_store(&dir, &body);
            let index =
                InMemoryIndex::with_sources(vec![MessageSource::git_blob(indexed)]);

            let pending = scan_git_source(&source, &index, None).unwrap();

            assert_eq!(pending.len(), 1, "one new message despite the repeat");
            assert_eq!(pending[0].source.blob_id(), Some(&fresh));
        }

        #[test]
        fn collect_passes_scan_results_through() {
            let dir = TempDir::new().unwrap();
            let fresh = id(0x33);
            let body = format!("printf '%s aa/bb/msg\\n' {fresh}");
            let source = fake_store(&dir, &body);
            let index = InMemoryIndex::new();

            let pending = collect_pending(Some(&source), &index, None);

            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].source.blob_id(), Some(&fresh));
        }
    }
}
