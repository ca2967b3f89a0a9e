//! # rateshelf
//!
//! A concurrent product catalog with customer reviews:
//! - Derived aggregate ratings recomputed on every review
//! - One reader/writer lock guarding the whole catalog map
//! - Plain-text record files, one per product plus a review audit trail
//! - Whole-catalog snapshot dump/restore
//! - TCP-based client protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Catalog                                 │
//! │            (RwLock: many readers / one writer)               │
//! └──────┬──────────────────┬───────────────────────┬───────────┘
//!        │                  │                       │
//!        ▼                  ▼                       ▼
//! ┌─────────────┐   ┌──────────────┐       ┌─────────────┐
//! │   Records   │   │  Snapshots   │       │   Reports   │
//! │ (text files)│   │(dump/restore)│       │ (formatter) │
//! └─────────────┘   └──────────────┘       └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod catalog;
pub mod persist;
pub mod report;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, ShelfError};
pub use config::Config;
pub use catalog::{Catalog, CatalogEntry};
pub use model::{Product, ProductId, ProductKind, Rating, Review};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rateshelf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
