//! Tests for the persistence layer
//!
//! These tests verify:
//! - Product record files round-trip through write and load
//! - Review files append and reload with comments intact
//! - Corrupt or unrelated files degrade gracefully on load
//! - Snapshot framing: magic, checksum and length validation
//! - Snapshot files are consumed on restore, valid or not

use std::fs;

use chrono::NaiveDate;
use rateshelf::persist::{ProductFiles, SnapshotStore};
use rateshelf::{Product, Rating, Review, ShelfError};
use rust_decimal::Decimal;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_files() -> (TempDir, ProductFiles) {
    let temp_dir = TempDir::new().unwrap();
    let files = ProductFiles::open(temp_dir.path()).unwrap();
    (temp_dir, files)
}

fn setup_temp_snapshots() -> (TempDir, SnapshotStore) {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = SnapshotStore::new(temp_dir.path());
    (temp_dir, snapshots)
}

fn tea() -> Product {
    Product::drink(101, "Tea", Decimal::new(199, 2), Rating::FourStar)
}

fn cake() -> Product {
    let best_before = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    Product::food(103, "Cake", Decimal::new(399, 2), Rating::FiveStar, best_before)
}

// =============================================================================
// Record File Tests
// =============================================================================

#[test]
fn test_write_then_load_product_round_trip() {
    let (_temp, files) = setup_temp_files();

    files.write_product(&tea()).unwrap();
    files.write_product(&cake()).unwrap();

    let mut loaded = files.load_all().unwrap();
    loaded.sort_by_key(|(product, _)| product.id());

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].0, tea());
    assert_eq!(loaded[1].0, cake());
    assert!(loaded.iter().all(|(_, reviews)| reviews.is_empty()));
}

#[test]
fn test_write_product_never_overwrites() {
    let (_temp, files) = setup_temp_files();

    files.write_product(&tea()).unwrap();

    let err = files.write_product(&tea()).unwrap_err();
    assert!(matches!(err, ShelfError::Io(_)));
}

#[test]
fn test_append_and_load_reviews() {
    let (_temp, files) = setup_temp_files();

    files
        .append_review(101, &Review::new(Rating::FourStar, "Fine tea"))
        .unwrap();
    files
        .append_review(101, &Review::new(Rating::TwoStar, "Looks like tea, but is it?"))
        .unwrap();

    let reviews = files.load_reviews(101).unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].rating(), Rating::FourStar);
    assert_eq!(reviews[0].comment(), "Fine tea");
    assert_eq!(reviews[1].comment(), "Looks like tea, but is it?");
}

#[test]
fn test_load_reviews_missing_file_is_empty() {
    let (_temp, files) = setup_temp_files();

    assert!(files.load_reviews(101).unwrap().is_empty());
}

#[test]
fn test_load_reviews_skips_bad_lines() {
    let (temp, files) = setup_temp_files();

    fs::write(
        temp.path().join("review-000101.txt"),
        "4,Fine tea\nno comma here\n5,Perfect tea\n",
    )
    .unwrap();

    let reviews = files.load_reviews(101).unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].comment(), "Fine tea");
    assert_eq!(reviews[1].comment(), "Perfect tea");
}

#[test]
fn test_load_all_skips_corrupt_product_file() {
    let (temp, files) = setup_temp_files();

    files.write_product(&tea()).unwrap();
    fs::write(temp.path().join("product-000999.txt"), "garbage\n").unwrap();

    let loaded = files.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].0.id(), 101);
}

#[test]
fn test_load_all_ignores_unrelated_files() {
    let (temp, files) = setup_temp_files();

    files.write_product(&tea()).unwrap();
    files
        .append_review(101, &Review::new(Rating::FourStar, "Fine tea"))
        .unwrap();
    fs::write(temp.path().join("notes.txt"), "not a record\n").unwrap();

    // Only the product file counts as a product; its reviews ride along
    let loaded = files.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].1.len(), 1);
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[test]
fn test_snapshot_dump_restore_round_trip() {
    let (_temp, snapshots) = setup_temp_snapshots();

    let entries = vec![
        (tea(), vec![Review::new(Rating::FourStar, "Fine tea")]),
        (cake(), vec![]),
    ];

    let path = snapshots.dump(&entries).unwrap();
    assert!(path.exists());

    let restored = snapshots.restore().unwrap();
    assert_eq!(restored, entries);
}

#[test]
fn test_restore_consumes_snapshot_file() {
    let (_temp, snapshots) = setup_temp_snapshots();

    let path = snapshots.dump(&[(tea(), vec![])]).unwrap();
    snapshots.restore().unwrap();

    assert!(!path.exists());

    // A second restore has nothing left to read
    assert!(matches!(
        snapshots.restore().unwrap_err(),
        ShelfError::Snapshot(_)
    ));
}

#[test]
fn test_restore_without_snapshot_fails() {
    let (_temp, snapshots) = setup_temp_snapshots();

    let err = snapshots.restore().unwrap_err();
    assert!(matches!(err, ShelfError::Snapshot(_)));
}

#[test]
fn test_restore_rejects_bad_magic() {
    let (temp, snapshots) = setup_temp_snapshots();

    let path = temp.path().join("snapshot-00000001.tmp");
    fs::write(&path, b"XXXX0000000000000000").unwrap();

    let err = snapshots.restore().unwrap_err();
    assert!(matches!(err, ShelfError::Snapshot(_)));

    // Even an invalid snapshot is consumed
    assert!(!path.exists());
}

#[test]
fn test_restore_rejects_truncated_file() {
    let (temp, snapshots) = setup_temp_snapshots();

    fs::write(temp.path().join("snapshot-00000001.tmp"), b"RSNP").unwrap();

    let err = snapshots.restore().unwrap_err();
    assert!(matches!(err, ShelfError::Snapshot(_)));
}

#[test]
fn test_restore_rejects_corrupted_payload() {
    let (_temp, snapshots) = setup_temp_snapshots();

    let path = snapshots.dump(&[(tea(), vec![])]).unwrap();

    // Flip the last payload byte; the checksum no longer matches
    let mut data = fs::read(&path).unwrap();
    let last = data.len() - 1;
    data[last] ^= 0xFF;
    fs::write(&path, data).unwrap();

    let err = snapshots.restore().unwrap_err();
    assert!(matches!(err, ShelfError::Snapshot(_)));
}

#[test]
fn test_restore_picks_first_snapshot_lexicographically() {
    let (temp, snapshots) = setup_temp_snapshots();

    let first = snapshots.dump(&[(tea(), vec![])]).unwrap();
    fs::rename(first, temp.path().join("snapshot-aaaaaaaa.tmp")).unwrap();

    let second = snapshots.dump(&[(cake(), vec![])]).unwrap();
    fs::rename(second, temp.path().join("snapshot-bbbbbbbb.tmp")).unwrap();

    let restored = snapshots.restore().unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].0.id(), 101);

    // The second snapshot is still waiting
    let restored = snapshots.restore().unwrap();
    assert_eq!(restored[0].0.id(), 103);
}
