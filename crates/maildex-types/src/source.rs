use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::blob::BlobId;

/// Where an indexed message's raw bytes live.
///
/// The message index records one of these per message. Plain-file sources
/// (maildir/MH style folders) are enumerated elsewhere; this crate only
/// defines the descriptor so the index can carry both kinds side by side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSource {
    /// A message stored as a single file on disk.
    File { path: PathBuf },
    /// A message stored as a blob in a git object store.
    GitBlob { id: BlobId },
}

impl MessageSource {
    /// A source naming a blob in a git object store.
    pub fn git_blob(id: BlobId) -> Self {
        MessageSource::GitBlob { id }
    }

    /// A source naming a plain file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        MessageSource::File { path: path.into() }
    }

    /// The source's type tag.
    pub fn kind(&self) -> SourceKind {
        match self {
            MessageSource::File { .. } => SourceKind::File,
            MessageSource::GitBlob { .. } => SourceKind::GitBlob,
        }
    }

    /// The blob identifier, when the message lives in an object store.
    pub fn blob_id(&self) -> Option<&BlobId> {
        match self {
            MessageSource::File { .. } => None,
            MessageSource::GitBlob { id } => Some(id),
        }
    }
}

/// Discriminant of [`MessageSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    File,
    GitBlob,
}

/// A newly discovered message that has not been indexed yet.
///
/// Produced by discovery passes in listing order; the caller owns the
/// growing list and later retrieves and parses each entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMessage {
    /// Where the message's bytes can be retrieved from.
    pub source: MessageSource,
}

impl PendingMessage {
    /// A pending message backed by a git blob.
    pub fn git_blob(id: BlobId) -> Self {
        Self {
            source: MessageSource::git_blob(id),
        }
    }

    /// A pending message backed by a plain file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: MessageSource::file(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_id() -> BlobId {
        BlobId::from_bytes(&[0x5e; 20])
    }

    #[test]
    fn git_blob_source_reports_kind_and_id() {
        let id = sample_id();
        let source = MessageSource::GitBlob { id };
        assert_eq!(source.kind(), SourceKind::GitBlob);
        assert_eq!(source.blob_id(), Some(&id));
    }

    #[test]
    fn file_source_has_no_blob_id() {
        let source = MessageSource::File {
            path: PathBuf::from("cur/1234.msg"),
        };
        assert_eq!(source.kind(), SourceKind::File);
        assert_eq!(source.blob_id(), None);
    }

    #[test]
    fn pending_message_constructors() {
        let pending = PendingMessage::git_blob(sample_id());
        assert_eq!(pending.source.kind(), SourceKind::GitBlob);

        let pending = PendingMessage::file("new/abc.eml");
        assert_eq!(pending.source.kind(), SourceKind::File);
    }

    #[test]
    fn serde_roundtrip() {
        let pending = PendingMessage::git_blob(sample_id());
        let json = serde_json::to_string(&pending).unwrap();
        let parsed: PendingMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pending);
    }
}
