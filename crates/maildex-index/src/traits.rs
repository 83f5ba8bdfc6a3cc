//! The [`MessageIndex`] trait defining the index iteration interface.

use maildex_types::MessageSource;

use crate::error::IndexResult;

/// The external record of which messages have been indexed.
///
/// maildex only ever asks the index two things: "what do you already hold?"
/// (so discovery can skip known messages) and "remember this one". The
/// shape of the database behind the trait — flat file, SQL, whatever the
/// host indexer uses — is none of this crate's business.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait MessageIndex: Send + Sync {
    /// Every message currently recorded, in index order.
    fn sources(&self) -> IndexResult<Vec<MessageSource>>;

    /// Record a newly indexed message.
    fn record(&self, source: MessageSource) -> IndexResult<()>;

    /// Number of recorded messages.
    fn len(&self) -> IndexResult<usize>;

    /// Returns `true` if nothing has been recorded.
    fn is_empty(&self) -> IndexResult<bool> {
        Ok(self.len()? == 0)
    }
}
