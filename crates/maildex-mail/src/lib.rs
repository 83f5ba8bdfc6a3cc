//! Message model and parsing seam.
//!
//! Retrieval hands back raw bytes; this crate turns them into something an
//! index or a reader can use. The [`MessageParser`] trait is the seam — a
//! full MIME stack can sit behind it — and [`Rfc822Parser`] is the bundled
//! implementation: a lenient header-block splitter that copes with the mail
//! that actually exists rather than the mail the RFC describes.

pub mod error;
pub mod message;
pub mod rfc822;
pub mod traits;

pub use error::{MailError, MailResult};
pub use message::{Header, Message};
pub use rfc822::Rfc822Parser;
pub use traits::MessageParser;
