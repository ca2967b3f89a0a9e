//! Snapshot Store
//!
//! Whole-catalog dump/restore through transient snapshot files.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (16 bytes)                                       │
//! │   Magic: "RSNP" (4) | CRC: u32 (4) | PayloadLen: u64 (8)│
//! ├─────────────────────────────────────────────────────────┤
//! │ Payload (variable)                                      │
//! │   bincode-encoded Vec<(Product, Vec<Review>)>           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Snapshot files are transient by contract: `restore` deletes the
//! file it reads before decoding, so a corrupt snapshot is consumed
//! rather than retried forever.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShelfError};
use crate::model::{Product, Review};

/// Magic bytes identifying a snapshot file
const MAGIC: &[u8; 4] = b"RSNP";

/// Header size: Magic (4) + CRC (4) + PayloadLen (8) = 16 bytes
const HEADER_SIZE: usize = 16;

/// Extension marking transient snapshot files
const SNAPSHOT_EXT: &str = "tmp";

/// Dumps and restores the whole catalog through snapshot files
pub struct SnapshotStore {
    /// Directory where snapshot files are kept
    temp_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given temp directory
    ///
    /// The directory itself is created lazily on the first dump.
    pub fn new(path: &Path) -> Self {
        Self {
            temp_dir: path.to_path_buf(),
        }
    }

    /// Serialize the catalog into a fresh snapshot file
    ///
    /// Returns the path of the file written. File names carry a random
    /// suffix so repeated dumps never collide.
    pub fn dump(&self, entries: &[(Product, Vec<Review>)]) -> Result<PathBuf> {
        fs::create_dir_all(&self.temp_dir)?;

        let payload = bincode::serialize(entries)
            .map_err(|e| ShelfError::Serialization(e.to_string()))?;
        let crc = crc32fast::hash(&payload);

        let mut data = Vec::with_capacity(HEADER_SIZE + payload.len());
        data.extend_from_slice(MAGIC);
        data.extend_from_slice(&crc.to_be_bytes());
        data.extend_from_slice(&(payload.len() as u64).to_be_bytes());
        data.extend_from_slice(&payload);

        let path = self
            .temp_dir
            .join(format!("snapshot-{:08x}.{}", rand::random::<u32>(), SNAPSHOT_EXT));
        fs::write(&path, data)?;

        Ok(path)
    }

    /// Read back the first snapshot found and consume it
    ///
    /// The file is deleted as soon as its bytes are read; a snapshot
    /// that fails validation is still gone afterwards. Returns
    /// `ShelfError::Snapshot` when no snapshot file exists.
    pub fn restore(&self) -> Result<Vec<(Product, Vec<Review>)>> {
        let path = self.first_snapshot()?.ok_or_else(|| {
            ShelfError::Snapshot(format!("no snapshot file in {}", self.temp_dir.display()))
        })?;

        let data = fs::read(&path)?;
        fs::remove_file(&path)?;

        Self::decode(&data, &path)
    }

    /// Get the temp directory path
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Find the first snapshot file in lexicographic order
    fn first_snapshot(&self) -> Result<Option<PathBuf>> {
        if !self.temp_dir.exists() {
            return Ok(None);
        }

        let mut candidates: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&self.temp_dir)? {
            let entry = entry?;
            let file_path = entry.path();

            let is_snapshot = file_path.is_file()
                && file_path
                    .extension()
                    .map(|ext| ext == SNAPSHOT_EXT)
                    .unwrap_or(false);
            if is_snapshot {
                candidates.push(file_path);
            }
        }

        candidates.sort();
        Ok(candidates.into_iter().next())
    }

    /// Validate the header and decode the payload
    fn decode(data: &[u8], path: &Path) -> Result<Vec<(Product, Vec<Review>)>> {
        if data.len() < HEADER_SIZE {
            return Err(ShelfError::Snapshot(format!(
                "truncated header in {}",
                path.display()
            )));
        }

        if &data[0..4] != MAGIC {
            return Err(ShelfError::Snapshot(format!(
                "invalid magic in {}: expected RSNP, got {:?}",
                path.display(),
                &data[0..4]
            )));
        }

        let expected_crc = u32::from_be_bytes(data[4..8].try_into().unwrap());
        let payload_len = u64::from_be_bytes(data[8..16].try_into().unwrap()) as usize;

        let payload = &data[HEADER_SIZE..];
        if payload.len() != payload_len {
            return Err(ShelfError::Snapshot(format!(
                "payload length mismatch in {}: header says {}, found {}",
                path.display(),
                payload_len,
                payload.len()
            )));
        }

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(ShelfError::Snapshot(format!(
                "checksum mismatch in {}: expected {:#010x}, got {:#010x}",
                path.display(),
                expected_crc,
                actual_crc
            )));
        }

        bincode::deserialize(payload).map_err(|e| ShelfError::Serialization(e.to_string()))
    }
}
