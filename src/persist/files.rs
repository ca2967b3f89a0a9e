//! Product record files
//!
//! Manages the per-product files inside the data directory.
//!
//! ## Responsibilities
//! - Discover existing product files on startup
//! - Write each product record exactly once (create-new, no overwrite)
//! - Append review lines to the product's review file
//! - Skip unreadable records on load instead of failing the startup

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, ShelfError};
use crate::model::{Product, ProductId, Review};

use super::record;

/// Manages the record files for the catalog
///
/// All methods use `&self`; callers serialize access through the
/// catalog's own lock, so no interior locking is needed here.
pub struct ProductFiles {
    /// Directory where product and review files are stored
    data_dir: PathBuf,
}

impl ProductFiles {
    /// Open or create the record store in the given directory
    pub fn open(path: &Path) -> Result<Self> {
        // Create directory if it doesn't exist
        fs::create_dir_all(path)?;

        Ok(Self {
            data_dir: path.to_path_buf(),
        })
    }

    /// Load every product with its reviews from disk
    ///
    /// On startup:
    /// 1. Discover files matching the product naming pattern
    /// 2. Parse the single record line of each
    /// 3. Load the matching review file (missing file = no reviews)
    /// 4. Skip files that fail to parse, with a warning
    pub fn load_all(&self) -> Result<Vec<(Product, Vec<Review>)>> {
        let mut loaded = Vec::new();

        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let file_path = entry.path();

            if !file_path.is_file() || Self::parse_product_id(&file_path).is_none() {
                continue;
            }

            // A bad product file loses that product, never the startup
            let product = match self.load_product(&file_path) {
                Ok(product) => product,
                Err(e) => {
                    warn!("Skipping product file {}: {}", file_path.display(), e);
                    continue;
                }
            };

            // Reviews are keyed by the record's own id, not the file name
            let reviews = match self.load_reviews(product.id()) {
                Ok(reviews) => reviews,
                Err(e) => {
                    warn!("Dropping reviews for product {}: {}", product.id(), e);
                    Vec::new()
                }
            };

            loaded.push((product, reviews));
        }

        Ok(loaded)
    }

    /// Write a product's record file
    ///
    /// Created with create-new semantics: if the file already exists
    /// the write fails, so an existing record can never be clobbered.
    pub fn write_product(&self, product: &Product) -> Result<()> {
        let path = self.product_path(product.id());

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        writeln!(file, "{}", record::format_product(product))?;

        Ok(())
    }

    /// Append one review line to the product's review file
    ///
    /// The file is created on the first review and only ever grows.
    pub fn append_review(&self, id: ProductId, review: &Review) -> Result<()> {
        let path = self.review_path(id);

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", record::format_review(review))?;

        Ok(())
    }

    /// Load the reviews recorded for a product
    ///
    /// A missing review file means the product was never reviewed and
    /// yields an empty list. Unparseable lines are skipped.
    pub fn load_reviews(&self, id: ProductId) -> Result<Vec<Review>> {
        let path = self.review_path(id);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let mut reviews = Vec::new();

        for line in content.lines() {
            if line.is_empty() {
                continue;
            }
            match record::parse_review(line) {
                Ok(review) => reviews.push(review),
                Err(e) => warn!("Skipping review line in {}: {}", path.display(), e),
            }
        }

        Ok(reviews)
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Read and parse the single record line of a product file
    fn load_product(&self, path: &Path) -> Result<Product> {
        let content = fs::read_to_string(path)?;
        let line = content
            .lines()
            .next()
            .ok_or_else(|| ShelfError::Parse(format!("empty product file {}", path.display())))?;
        record::parse_product(line)
    }

    /// Generate the record file path for a product ID
    fn product_path(&self, id: ProductId) -> PathBuf {
        self.data_dir.join(format!("product-{:06}.txt", id))
    }

    /// Generate the review file path for a product ID
    fn review_path(&self, id: ProductId) -> PathBuf {
        self.data_dir.join(format!("review-{:06}.txt", id))
    }

    /// Parse a product ID from a filename
    /// "product-000042.txt" → Some(42)
    fn parse_product_id(path: &Path) -> Option<ProductId> {
        let name = path.file_stem()?.to_string_lossy();
        let id_str = name.strip_prefix("product-")?;
        id_str.parse().ok()
    }
}
