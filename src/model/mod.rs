//! Data Model Module
//!
//! The leaf value types the catalog stores.
//!
//! ## Responsibilities
//! - Star ratings with ordinal identity and display glyphs
//! - Immutable customer reviews, ordered best-first for display
//! - The product sum type (drink/food) with pure rating updates

mod rating;
mod review;
mod product;

pub use rating::Rating;
pub use review::Review;
pub use product::{Product, ProductId, ProductKind, DISCOUNT_RATE};
