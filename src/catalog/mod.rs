//! Catalog Module
//!
//! The concurrent product catalog that coordinates all components.
//!
//! ## Responsibilities
//! - Own the id-keyed map of products and their reviews
//! - Serialize access through one reader/writer lock
//! - Recompute aggregate ratings when reviews arrive
//! - Drive the persistence layer for record files and snapshots
//! - Render and land per-product reports

mod entry;
mod store;

pub use entry::CatalogEntry;
pub use store::Catalog;
