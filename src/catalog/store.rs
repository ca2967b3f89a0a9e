//! Catalog Store
//!
//! The concurrent store of products and their reviews.
//!
//! ## Responsibilities
//! - Serve lookups, scans and discount aggregation under the read lock
//! - Serialize creates, reviews and snapshots under the write lock
//! - Keep the aggregate rating consistent with the review list
//! - Mirror every in-memory change to the record files

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{Result, ShelfError};
use crate::model::{Product, ProductId, Rating, Review};
use crate::persist::{format_product, ProductFiles, SnapshotStore};
use crate::protocol::Command;
use crate::report::{Formatter, ReportWriter};

use super::CatalogEntry;

/// The concurrent product catalog
///
/// ## Concurrency Model: Reader/Writer Lock
///
/// One `parking_lot::RwLock` guards the whole map:
/// - **Writes** (create/review/dump/restore): exclusive lock
/// - **Reads** (find/scan/discounts/report): shared lock, many at once
///
/// The lock scope always covers both the map access and the
/// co-dependent file I/O, so a reader can never observe a review on
/// disk that the aggregate rating does not yet reflect. Writers to
/// unrelated products contend on the single lock; there is no
/// per-product locking.
pub struct Catalog {
    /// Catalog configuration
    config: Config,

    /// The product map, keyed by id
    /// Protected by RwLock - only mutable state shared across threads
    entries: RwLock<HashMap<ProductId, CatalogEntry>>,

    /// Per-product record files (products + review audit trail)
    files: ProductFiles,

    /// Whole-catalog snapshot dump/restore
    snapshots: SnapshotStore,

    /// Rendered report files
    reports: ReportWriter,
}

impl Catalog {
    /// Open or create a catalog with the given config
    ///
    /// On startup:
    /// 1. Open/create the data directory
    /// 2. Load every parseable product/review file (bad files are
    ///    skipped, the load never aborts)
    /// 3. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Open the record store (creates the data directory)
        let files = ProductFiles::open(&config.data_dir)?;

        // Step 2: Load existing products; first record per id wins
        let mut entries: HashMap<ProductId, CatalogEntry> = HashMap::new();
        for (product, reviews) in files.load_all()? {
            entries
                .entry(product.id())
                .or_insert(CatalogEntry { product, reviews });
        }

        info!(
            "Catalog opened with {} products from {}",
            entries.len(),
            config.data_dir.display()
        );

        // Step 3: Wire up the snapshot store and report writer
        let snapshots = SnapshotStore::new(&config.temp_dir);
        let reports = ReportWriter::new(&config.reports_dir);

        Ok(Self {
            config,
            entries: RwLock::new(entries),
            files,
            snapshots,
            reports,
        })
    }

    /// Open with a root path (convenience method)
    ///
    /// Derives `{root}/data`, `{root}/reports` and `{root}/temp` from
    /// one directory, with default settings otherwise.
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::rooted_at(path))
    }

    /// Execute a wire command
    ///
    /// Routes commands to the operations below and renders payloads as
    /// record-format text lines.
    pub fn execute(&self, command: Command) -> Result<Option<Vec<u8>>> {
        match command {
            Command::Find { id } => {
                let product = self.find_product(id)?;
                Ok(Some(format_product(&product).into_bytes()))
            }
            Command::Review {
                id,
                rating,
                comment,
            } => {
                let product = self.review_product(id, Rating::from_stars(rating as i32), comment)?;
                Ok(Some(format_product(&product).into_bytes()))
            }
            Command::Discounts => {
                let mut buckets: Vec<(u8, Decimal)> = self
                    .get_discounts()
                    .into_iter()
                    .map(|(rating, total)| (rating.ordinal(), total))
                    .collect();
                buckets.sort_by_key(|&(ordinal, _)| ordinal);

                let text = buckets
                    .into_iter()
                    .map(|(ordinal, total)| format!("{},{}", ordinal, total))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Some(text.into_bytes()))
            }
            Command::Ping => Ok(Some(b"PONG".to_vec())),
        }
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Create a drink
    ///
    /// Idempotent: if the id already exists, the resident product is
    /// returned and nothing is written.
    pub fn create_drink(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
    ) -> Result<Product> {
        self.create(Product::drink(id, name, price, rating))
    }

    /// Create a food item with a best-before date
    ///
    /// Idempotent: if the id already exists, the resident product is
    /// returned and nothing is written.
    pub fn create_food(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Result<Product> {
        self.create(Product::food(id, name, price, rating, best_before))
    }

    /// Submit a review and recompute the product's aggregate rating
    ///
    /// Steps:
    /// 1. Append the review to the entry's list
    /// 2. Append the review line to the audit file (a fault here is
    ///    logged and absorbed; memory stays authoritative)
    /// 3. Replace the product with one carrying the recomputed rating
    ///
    /// Returns the updated product, or `ProductNotFound` for an
    /// unknown id.
    pub fn review_product(
        &self,
        id: ProductId,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Result<Product> {
        let mut entries = self.entries.write();

        let entry = entries
            .get_mut(&id)
            .ok_or(ShelfError::ProductNotFound(id))?;

        // Step 1: Record the review in memory
        let review = Review::new(rating, comment);
        entry.reviews.push(review.clone());

        // Step 2: Append to the audit file
        if let Err(e) = self.files.append_review(id, &review) {
            warn!("Failed to append review for product {}: {}", id, e);
        }

        // Step 3: Recompute the aggregate and swap the product
        let aggregate = entry.average_rating();
        entry.product = entry.product.with_rating(aggregate);

        Ok(entry.product.clone())
    }

    /// Dump the whole catalog to a snapshot file and reset the map
    ///
    /// Returns the snapshot path. A dump fault leaves the map intact.
    pub fn dump_data(&self) -> Result<PathBuf> {
        let mut entries = self.entries.write();

        // Step 1: Serialize every entry
        let payload: Vec<(Product, Vec<Review>)> = entries
            .values()
            .map(|entry| (entry.product.clone(), entry.reviews.clone()))
            .collect();

        // Step 2: Write the snapshot file
        let path = self.snapshots.dump(&payload)?;

        // Step 3: Reset the map; the data now lives in the snapshot
        entries.clear();

        info!("Dumped {} products to {}", payload.len(), path.display());
        Ok(path)
    }

    /// Restore the catalog from the first snapshot file found
    ///
    /// The snapshot replaces the in-memory map wholesale (never a
    /// merge) and its file is consumed, corrupt or not. A missing or
    /// corrupt snapshot is an error and leaves the current map
    /// untouched. Returns a copy of the restored map.
    pub fn restore_data(&self) -> Result<HashMap<ProductId, CatalogEntry>> {
        let mut entries = self.entries.write();

        let loaded = self.snapshots.restore()?;

        let mut map = HashMap::with_capacity(loaded.len());
        for (product, reviews) in loaded {
            map.insert(product.id(), CatalogEntry { product, reviews });
        }

        *entries = map;
        info!("Restored {} products from snapshot", entries.len());

        Ok(entries.clone())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Find a product by id
    pub fn find_product(&self, id: ProductId) -> Result<Product> {
        let entries = self.entries.read();

        entries
            .get(&id)
            .map(|entry| entry.product.clone())
            .ok_or(ShelfError::ProductNotFound(id))
    }

    /// Find every product satisfying a predicate
    ///
    /// One coherent pass under the read lock; result order is
    /// unspecified.
    pub fn find_products<F>(&self, filter: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let entries = self.entries.read();

        entries
            .values()
            .map(|entry| &entry.product)
            .filter(|product| filter(product))
            .cloned()
            .collect()
    }

    /// The reviews submitted for a product
    ///
    /// A resident id answers from memory. An absent id falls back to
    /// whatever the review file holds, and a missing file yields an
    /// empty list — never an error.
    pub fn find_reviews(&self, id: ProductId) -> Vec<Review> {
        let entries = self.entries.read();

        if let Some(entry) = entries.get(&id) {
            return entry.reviews.clone();
        }

        match self.files.load_reviews(id) {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!("Failed to load reviews for product {}: {}", id, e);
                Vec::new()
            }
        }
    }

    /// Total discount per rating group
    ///
    /// Groups products by their current rating and sums each
    /// product's discount (price × 6%, rounded half-up to 2 places)
    /// per group. One coherent pass under the read lock.
    pub fn get_discounts(&self) -> HashMap<Rating, Decimal> {
        let entries = self.entries.read();

        let mut totals: HashMap<Rating, Decimal> = HashMap::new();
        for entry in entries.values() {
            let product = &entry.product;
            *totals.entry(product.rating()).or_insert(Decimal::ZERO) += product.discount();
        }

        totals
    }

    /// Render and write a product report in the default locale
    pub fn print_report(&self, id: ProductId) -> Result<PathBuf> {
        self.print_report_as(id, &self.config.language_tag, None)
    }

    /// Render and write a product report for a language tag and an
    /// optional client tag
    ///
    /// The report carries the product line and its reviews sorted
    /// best-first (a display copy; the entry's own order stays), or
    /// a localized placeholder when there are no reviews. A missing
    /// id writes the localized no-product placeholder instead of
    /// failing. Returns the written path.
    pub fn print_report_as(
        &self,
        id: ProductId,
        language_tag: &str,
        client: Option<&str>,
    ) -> Result<PathBuf> {
        let formatter = Formatter::new(language_tag);
        let entries = self.entries.read();

        let mut text = String::new();
        match entries.get(&id) {
            Some(entry) => {
                text.push_str(&formatter.format_product(&entry.product));
                text.push('\n');

                if entry.reviews.is_empty() {
                    text.push_str(formatter.text("no.reviews"));
                    text.push('\n');
                } else {
                    for review in entry.sorted_reviews() {
                        text.push_str(&formatter.format_review(&review));
                        text.push('\n');
                    }
                }
            }
            None => {
                debug!("Report requested for unknown product {}", id);
                text.push_str(formatter.text("no.product"));
                text.push('\n');
            }
        }

        self.reports.write(id, client, &text)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the number of resident products
    pub fn product_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        self.files.data_dir()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Insert a new product, or return the resident one for its id
    ///
    /// The record file write happens after the map insertion and its
    /// fault propagates without rolling the insertion back, so memory
    /// and disk may diverge after an I/O fault.
    fn create(&self, product: Product) -> Result<Product> {
        let mut entries = self.entries.write();

        // Step 1: An existing id wins; nothing is written again
        if let Some(entry) = entries.get(&product.id()) {
            debug!("Product {} already exists, returning resident", product.id());
            return Ok(entry.product.clone());
        }

        // Step 2: Insert with an empty review list
        entries.insert(product.id(), CatalogEntry::new(product.clone()));

        // Step 3: Write the record file (create-new, never overwrite)
        self.files.write_product(&product)?;

        Ok(product)
    }
}
