//! Configuration for rateshelf
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

/// Main configuration for a catalog instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Directories
    // -------------------------------------------------------------------------
    /// Directory for the per-product record files
    /// Layout:
    ///   {data_dir}/
    ///     ├── product-000101.txt   (one record line per product)
    ///     └── review-000101.txt    (append-only review lines)
    pub data_dir: PathBuf,

    /// Directory for rendered report files
    pub reports_dir: PathBuf,

    /// Directory for transient snapshot files (dump/restore)
    pub temp_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Report Configuration
    // -------------------------------------------------------------------------
    /// Default language tag for report rendering (e.g. "en-US")
    pub language_tag: String,

    // -------------------------------------------------------------------------
    // Server Configuration
    // -------------------------------------------------------------------------
    /// Address the TCP listener binds
    pub listen_addr: String,

    /// Number of connection worker threads
    pub worker_threads: usize,

    /// Socket read timeout in milliseconds
    pub read_timeout_ms: u64,

    /// Socket write timeout in milliseconds
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            reports_dir: PathBuf::from("./reports"),
            temp_dir: PathBuf::from("./temp"),
            language_tag: "en-US".to_string(),
            listen_addr: "127.0.0.1:7979".to_string(),
            worker_threads: 8,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Start a builder over the defaults
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Config with all three directories derived from one root:
    /// `{root}/data`, `{root}/reports`, `{root}/temp`
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.join("data"),
            reports_dir: root.join("reports"),
            temp_dir: root.join("temp"),
            ..Self::default()
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (per-product record files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the reports directory (rendered report files)
    pub fn reports_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.reports_dir = path.into();
        self
    }

    /// Set the temp directory (transient snapshot files)
    pub fn temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = path.into();
        self
    }

    /// Set the default report language tag
    pub fn language_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.language_tag = tag.into();
        self
    }

    /// Set the listener bind address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the number of connection worker threads
    pub fn worker_threads(mut self, count: usize) -> Self {
        self.config.worker_threads = count;
        self
    }

    /// Set the socket read timeout
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the socket write timeout
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
