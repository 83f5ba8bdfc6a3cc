//! Filter for `rev-list --objects` listing lines.
//!
//! The listing interleaves every reachable object: commits (a bare id),
//! trees (id plus directory path), and blobs (id plus file path). Message
//! blobs are recognized purely by the shape of the line — no extra object
//! lookups — which keeps discovery to a single child process.

use maildex_types::BlobId;

/// The identifier occupies bytes `0..40` of a listing line.
const ID_LEN: usize = BlobId::LEN;

/// Per-folder ignore file; present in message trees but never a message.
const IGNORE_SUFFIX: &[u8] = b"/.gitignore";

/// Extract the blob identifier from one listing line, if the line names a
/// message blob.
///
/// `line` is the raw line without its trailing newline. It need not be valid
/// UTF-8: paths in a listing are arbitrary bytes. A line qualifies when all
/// of the following hold, and `None` is returned otherwise:
///
/// - it is longer than the identifier, with a space in column 40;
/// - the identifier is forty lowercase hex characters;
/// - the path does not start with `.`;
/// - the path is exactly two directories deep (`folder/subfolder/message`);
/// - the path does not end in `/.gitignore`.
pub fn parse_listing_line(line: &[u8]) -> Option<BlobId> {
    if line.len() <= ID_LEN || line[ID_LEN] != b' ' {
        return None;
    }
    let path = &line[ID_LEN + 1..];
    if path.first() == Some(&b'.') {
        return None;
    }
    if path.iter().filter(|&&b| b == b'/').count() != 2 {
        return None;
    }
    if path.ends_with(IGNORE_SUFFIX) {
        return None;
    }
    BlobId::from_hex_bytes(&line[..ID_LEN]).ok()
}
