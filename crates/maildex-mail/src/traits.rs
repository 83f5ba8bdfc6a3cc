//! Parsing seam.

use crate::error::MailResult;
use crate::message::Message;

/// Turns retrieved bytes into a [`Message`].
///
/// `source` is a diagnostic label (a path or a blob id); implementations
/// carry it into the result and into error messages but never interpret it.
pub trait MessageParser: Send + Sync {
    fn parse(&self, source: &str, data: &[u8]) -> MailResult<Message>;
}
