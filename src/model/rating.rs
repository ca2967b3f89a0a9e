//! Rating definitions
//!
//! The fixed ordered set of star ratings a product or review can carry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A star rating, ordered from zero to five stars
///
/// The ordinal (0..5) is the sole identity of a rating: two ratings
/// are equal iff they have the same ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rating {
    NoStar = 0,
    OneStar = 1,
    TwoStar = 2,
    ThreeStar = 3,
    FourStar = 4,
    FiveStar = 5,
}

impl Rating {
    /// All ratings in ordinal order
    pub const ALL: [Rating; 6] = [
        Rating::NoStar,
        Rating::OneStar,
        Rating::TwoStar,
        Rating::ThreeStar,
        Rating::FourStar,
        Rating::FiveStar,
    ];

    /// Convert a star count to a rating
    ///
    /// Any count outside [0, 5] clamps to `NoStar`.
    pub fn from_stars(stars: i32) -> Self {
        match stars {
            0 => Rating::NoStar,
            1 => Rating::OneStar,
            2 => Rating::TwoStar,
            3 => Rating::ThreeStar,
            4 => Rating::FourStar,
            5 => Rating::FiveStar,
            _ => Rating::NoStar,
        }
    }

    /// The ordinal (0..5) identifying this rating
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Display glyphs: one filled star per ordinal, hollow for the rest
    pub fn stars(self) -> &'static str {
        match self {
            Rating::NoStar => "☆☆☆☆☆",
            Rating::OneStar => "★☆☆☆☆",
            Rating::TwoStar => "★★☆☆☆",
            Rating::ThreeStar => "★★★☆☆",
            Rating::FourStar => "★★★★☆",
            Rating::FiveStar => "★★★★★",
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::NoStar
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stars())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stars_maps_the_range() {
        for stars in 0..=5 {
            assert_eq!(Rating::from_stars(stars).ordinal(), stars as u8);
        }
    }

    #[test]
    fn test_from_stars_clamps_out_of_range() {
        assert_eq!(Rating::from_stars(-1), Rating::NoStar);
        assert_eq!(Rating::from_stars(6), Rating::NoStar);
        assert_eq!(Rating::from_stars(42), Rating::NoStar);
    }

    #[test]
    fn test_ratings_order_by_ordinal() {
        assert!(Rating::NoStar < Rating::OneStar);
        assert!(Rating::FourStar < Rating::FiveStar);
        assert_eq!(Rating::ALL.len(), 6);
        assert!(Rating::ALL.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_star_glyphs() {
        assert_eq!(Rating::NoStar.stars(), "☆☆☆☆☆");
        assert_eq!(Rating::ThreeStar.stars(), "★★★☆☆");
        assert_eq!(Rating::FiveStar.to_string(), "★★★★★");
    }
}
