//! Persistence Module
//!
//! Translates between in-memory entities and a fixed plain-text line
//! format: one record file per product, one append-only review file
//! per product, and transient whole-catalog snapshot files.
//!
//! ## Responsibilities
//! - Format/parse the line-oriented record format
//! - Create product files once, never overwrite them
//! - Append review lines as a permanent audit trail
//! - Tolerate partial failure: a bad file is skipped, never fatal
//! - Snapshot dump/restore for bulk save/reload
//!
//! ## File Layout
//! ```text
//! data/
//!   ├── product-000101.txt     <kind>,<id>,<name>,<price>,<rating>[,<date>]
//!   └── review-000101.txt      <rating>,<comment>   (append-only)
//! temp/
//!   └── snapshot-1a2b3c4d.tmp  magic | crc32 | len | bincode payload
//! ```

mod record;
mod files;
mod snapshot;

pub use record::{format_product, format_review, parse_product, parse_review};
pub use files::ProductFiles;
pub use snapshot::SnapshotStore;
