//! Catalog entry definitions
//!
//! The aggregate record behind each map key: one product plus every
//! review it has received.

use crate::model::{Product, Rating, Review};

/// A product together with its reviews
///
/// An entry always owns a review list, possibly empty; a product can
/// never be resident without one.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// The product, carrying the current aggregate rating
    pub product: Product,

    /// Every review submitted for the product, in submission order
    pub reviews: Vec<Review>,
}

impl CatalogEntry {
    /// Create an entry for a product with no reviews yet
    pub fn new(product: Product) -> Self {
        Self {
            product,
            reviews: Vec::new(),
        }
    }

    /// The aggregate rating derived from the reviews
    ///
    /// Arithmetic mean of the review star counts, rounded half-up and
    /// clamped to the rating range. No reviews means no stars.
    pub fn average_rating(&self) -> Rating {
        if self.reviews.is_empty() {
            return Rating::NoStar;
        }

        let total: u32 = self
            .reviews
            .iter()
            .map(|review| review.rating().ordinal() as u32)
            .sum();
        let mean = total as f64 / self.reviews.len() as f64;

        Rating::from_stars(mean.round() as i32)
    }

    /// The reviews sorted best-first for display
    ///
    /// Sorts a copy; the submission order of the entry's own list is
    /// preserved.
    pub fn sorted_reviews(&self) -> Vec<Review> {
        let mut sorted = self.reviews.clone();
        sorted.sort();
        sorted
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn entry_with_stars(stars: &[i32]) -> CatalogEntry {
        let product = Product::drink(1, "Tea", Decimal::new(199, 2), Rating::NoStar);
        let mut entry = CatalogEntry::new(product);
        for (i, &s) in stars.iter().enumerate() {
            entry
                .reviews
                .push(Review::new(Rating::from_stars(s), format!("review {}", i)));
        }
        entry
    }

    #[test]
    fn test_average_of_no_reviews_is_no_star() {
        assert_eq!(entry_with_stars(&[]).average_rating(), Rating::NoStar);
    }

    #[test]
    fn test_average_rounds_half_up() {
        // mean 2.5 rounds up to three stars
        assert_eq!(entry_with_stars(&[4, 1]).average_rating(), Rating::ThreeStar);
    }

    #[test]
    fn test_average_rounds_down_below_half() {
        // mean 3.4 rounds down to three stars
        assert_eq!(
            entry_with_stars(&[5, 4, 3, 2, 3]).average_rating(),
            Rating::ThreeStar
        );
    }

    #[test]
    fn test_average_of_single_review() {
        assert_eq!(entry_with_stars(&[5]).average_rating(), Rating::FiveStar);
    }

    #[test]
    fn test_sorted_reviews_leaves_entry_order_alone() {
        let mut entry = entry_with_stars(&[1, 5, 3]);
        entry.reviews[0] = Review::new(Rating::OneStar, "meh");

        let sorted = entry.sorted_reviews();
        assert_eq!(sorted[0].rating(), Rating::FiveStar);
        assert_eq!(sorted[2].rating(), Rating::OneStar);

        // submission order untouched
        assert_eq!(entry.reviews[0].rating(), Rating::OneStar);
        assert_eq!(entry.reviews[1].rating(), Rating::FiveStar);
    }
}
