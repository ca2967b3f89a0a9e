//! Review definitions

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Rating;

/// A customer review: a star rating and a free-text comment
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    rating: Rating,
    comment: String,
}

impl Review {
    pub fn new(rating: Rating, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
        }
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

// Best rating first: sorting a list puts five-star reviews at the top.
// Ties fall back to the comment so the order stays total and
// consistent with equality.
impl Ord for Review {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rating
            .cmp(&self.rating)
            .then_with(|| self.comment.cmp(&other.comment))
    }
}

impl PartialOrd for Review {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_better_review_sorts_first() {
        let good = Review::new(Rating::FiveStar, "Perfect");
        let poor = Review::new(Rating::OneStar, "Meh");

        let mut reviews = vec![poor.clone(), good.clone()];
        reviews.sort();

        assert_eq!(reviews, vec![good, poor]);
    }

    #[test]
    fn test_equal_ratings_tie_break_on_comment() {
        let a = Review::new(Rating::ThreeStar, "Average");
        let b = Review::new(Rating::ThreeStar, "Bland");

        assert!(a < b);
    }
}
