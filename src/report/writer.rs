//! Report Writer
//!
//! Lands rendered report text in the reports directory, one file per
//! product and optionally per client.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::ProductId;

/// Writes rendered reports into the reports directory
pub struct ReportWriter {
    /// Directory where report files are written
    reports_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer rooted at the given reports directory
    ///
    /// The directory itself is created lazily on the first write.
    pub fn new(path: &Path) -> Self {
        Self {
            reports_dir: path.to_path_buf(),
        }
    }

    /// Write a rendered report, returning the path written
    ///
    /// File name is `report-<id>.txt`, or `report-<id>-<client>.txt`
    /// when a client tag is given so parallel clients never clobber
    /// each other's reports.
    pub fn write(&self, id: ProductId, client: Option<&str>, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.reports_dir)?;

        let path = self.report_path(id, client);
        fs::write(&path, text)?;

        Ok(path)
    }

    /// Get the reports directory path
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Generate the report file path for a product and optional client
    fn report_path(&self, id: ProductId, client: Option<&str>) -> PathBuf {
        let name = match client {
            Some(client) => format!("report-{}-{}.txt", id, client),
            None => format!("report-{}.txt", id),
        };
        self.reports_dir.join(name)
    }
}
