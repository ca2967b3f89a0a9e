//! Report Module
//!
//! Locale-aware rendering of products and reviews, and the writer that
//! lands rendered reports in the reports directory.
//!
//! ## Responsibilities
//! - Format products, reviews, prices and dates per language tag
//! - Supply localized placeholder text (missing product, no reviews)
//! - Write one report file per product, optionally per client

mod formatter;
mod writer;

pub use formatter::Formatter;
pub use writer::ReportWriter;
