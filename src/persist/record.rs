//! Record codec
//!
//! Formatting and parsing for the plain-text record format. Records
//! are single lines with comma-separated fields.
//!
//! ## Record Formats
//!
//! Product record, one per product file:
//! ```text
//! D,<id>,<name>,<price>,<rating>             (drink, exactly 5 fields)
//! F,<id>,<name>,<price>,<rating>,<date>      (food, exactly 6 fields)
//! ```
//! `<rating>` is the star count 0..=5 and `<date>` is an ISO
//! `YYYY-MM-DD` best-before date.
//!
//! Review record, one per line of a review file:
//! ```text
//! <rating>,<comment>
//! ```
//!
//! Commas are plain separators with no escaping. The review comment is
//! the final field and is split off at the first comma, so commas
//! inside it survive. A comma inside a product name breaks the field
//! count and the record is rejected on load.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Result, ShelfError};
use crate::model::{Product, ProductKind, Rating, Review};

/// Kind tag marking a drink record
const KIND_DRINK: &str = "D";

/// Kind tag marking a food record
const KIND_FOOD: &str = "F";

/// Date format used for the best-before field
const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Formatting
// ============================================================================

/// Format a product as its single record line (without trailing newline)
pub fn format_product(product: &Product) -> String {
    match product.kind() {
        ProductKind::Drink => format!(
            "{},{},{},{},{}",
            KIND_DRINK,
            product.id(),
            product.name(),
            product.price(),
            product.rating().ordinal()
        ),
        ProductKind::Food { best_before } => format!(
            "{},{},{},{},{},{}",
            KIND_FOOD,
            product.id(),
            product.name(),
            product.price(),
            product.rating().ordinal(),
            best_before.format(DATE_FORMAT)
        ),
    }
}

/// Format a review as its single record line (without trailing newline)
pub fn format_review(review: &Review) -> String {
    format!("{},{}", review.rating().ordinal(), review.comment())
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a product record line
///
/// The field count must match the kind tag exactly: 5 for drinks,
/// 6 for foods. An out-of-range star count clamps to zero stars.
pub fn parse_product(line: &str) -> Result<Product> {
    let fields: Vec<&str> = line.split(',').collect();

    if fields.is_empty() || fields[0].is_empty() {
        return Err(parse_error(line, "missing kind tag"));
    }

    match fields[0] {
        KIND_DRINK => {
            if fields.len() != 5 {
                return Err(parse_error(line, "drink record must have 5 fields"));
            }
            let (id, name, price, rating) = parse_common(&fields, line)?;
            Ok(Product::drink(id, name, price, rating))
        }
        KIND_FOOD => {
            if fields.len() != 6 {
                return Err(parse_error(line, "food record must have 6 fields"));
            }
            let (id, name, price, rating) = parse_common(&fields, line)?;
            let best_before = NaiveDate::parse_from_str(fields[5], DATE_FORMAT)
                .map_err(|_| parse_error(line, "invalid best-before date"))?;
            Ok(Product::food(id, name, price, rating, best_before))
        }
        _ => Err(parse_error(line, "unknown kind tag")),
    }
}

/// Parse a review record line
///
/// Splits at the first comma only, so the comment may itself contain
/// commas. An out-of-range star count clamps to zero stars.
pub fn parse_review(line: &str) -> Result<Review> {
    let (stars, comment) = line
        .split_once(',')
        .ok_or_else(|| parse_error(line, "review record must have 2 fields"))?;

    let stars: i32 = stars
        .trim()
        .parse()
        .map_err(|_| parse_error(line, "invalid star count"))?;

    Ok(Review::new(Rating::from_stars(stars), comment))
}

// ============================================================================
// Private Helpers
// ============================================================================

/// Parse the id/name/price/rating fields shared by both kinds
fn parse_common(fields: &[&str], line: &str) -> Result<(u64, String, Decimal, Rating)> {
    let id: u64 = fields[1]
        .trim()
        .parse()
        .map_err(|_| parse_error(line, "invalid product id"))?;

    let name = fields[2].to_string();

    let price = Decimal::from_str(fields[3].trim())
        .map_err(|_| parse_error(line, "invalid price"))?;

    let stars: i32 = fields[4]
        .trim()
        .parse()
        .map_err(|_| parse_error(line, "invalid star count"))?;

    Ok((id, name, price, Rating::from_stars(stars)))
}

fn parse_error(line: &str, reason: &str) -> ShelfError {
    ShelfError::Parse(format!("{} in record {:?}", reason, line))
}

// ============================================================================
// Tests
// ============================================================================
