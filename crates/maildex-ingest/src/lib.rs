//! Scan orchestration.
//!
//! The pieces below this crate are deliberately independent: the index knows
//! nothing about repositories, the object-store source knows nothing about
//! what is already indexed, and the parser sees only bytes. This crate wires
//! them into the ingestion sequence an indexing run actually performs —
//! seed the seen-set from the index, discover new blobs, and turn blobs
//! into messages — together with the propagation policy at each step
//! (which failures abort, which downgrade to "nothing new").

pub mod builder;
pub mod error;
pub mod scan;

pub use builder::MessageBuilder;
pub use error::{IngestError, IngestResult};
pub use scan::{collect_pending, scan_git_source, seed_seen};
