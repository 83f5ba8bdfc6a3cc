//! Blob-to-message construction.

use maildex_git::GitSource;
use maildex_mail::{Message, MessageParser};
use maildex_types::BlobId;
use tracing::{debug, warn};

/// Retrieves a blob and parses it into a [`Message`].
///
/// One unreadable or unparseable blob must never sink a whole indexing run,
/// so this layer converts both failure kinds into `None` and a log line;
/// the caller simply moves on to the next pending message.
pub struct MessageBuilder<'a> {
    source: &'a GitSource,
    parser: &'a dyn MessageParser,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(source: &'a GitSource, parser: &'a dyn MessageParser) -> Self {
        Self { source, parser }
    }

    /// Retrieve and parse one blob. `None` means "skip this message".
    ///
    /// A failed read is warned about with the full identifier (it points at
    /// a store problem worth noticing); a failed parse is only a debug line,
    /// since repositories legitimately hold blobs that are not mail.
    pub fn build(&self, id: &BlobId) -> Option<Message> {
        let data = match self.source.read_blob(id) {
            Ok(data) => data,
            Err(e) => {
                warn!(id = %id, error = %e, "could not read message blob");
                return None;
            }
        };
        match self.parser.parse(id.as_str(), &data) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!(id = %id.short(), error = %e, "blob is not a parseable message");
                None
            }
        }
    }
}
