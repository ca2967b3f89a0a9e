//! Product definitions
//!
//! The closed set of product kinds the catalog manages: drinks (no
//! expiry) and food items (best-before date). Identity is the numeric
//! id alone; every other field is plain payload.

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Rating;

/// Identifies a product in the catalog
pub type ProductId = u64;

/// Discount rate applied to a product's price (6%)
pub const DISCOUNT_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Variant-specific product payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductKind {
    /// A drink; never expires
    Drink,

    /// A food item with a best-before date
    Food { best_before: NaiveDate },
}

/// A rateable catalog product
///
/// `id`, `name` and `price` never change after construction; the
/// rating is replaced (never mutated) through [`Product::with_rating`]
/// whenever a review changes the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    rating: Rating,
    kind: ProductKind,
}

impl Product {
    /// Create a drink
    pub fn drink(id: ProductId, name: impl Into<String>, price: Decimal, rating: Rating) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            rating,
            kind: ProductKind::Drink,
        }
    }

    /// Create a food item with a best-before date
    pub fn food(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            rating,
            kind: ProductKind::Food { best_before },
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// The best-before date
    ///
    /// Food returns its stored date; a drink has no expiry and reports
    /// today's date as the "not applicable" sentinel.
    pub fn best_before(&self) -> NaiveDate {
        match self.kind {
            ProductKind::Drink => Local::now().date_naive(),
            ProductKind::Food { best_before } => best_before,
        }
    }

    /// A copy of this product carrying a new rating
    ///
    /// Pure functional update: the variant tag and every other field
    /// are preserved.
    pub fn with_rating(&self, rating: Rating) -> Self {
        Self {
            rating,
            ..self.clone()
        }
    }

    /// This product's discount contribution: price × 6%, rounded
    /// half-up to 2 decimal places
    pub fn discount(&self) -> Decimal {
        (self.price * DISCOUNT_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_is_six_percent_rounded_half_up() {
        let tea = Product::drink(101, "Tea", Decimal::new(10000, 2), Rating::NoStar);
        assert_eq!(tea.discount(), Decimal::new(600, 2));

        // 1.99 × 0.06 = 0.1194 → 0.12
        let coffee = Product::drink(102, "Coffee", Decimal::new(199, 2), Rating::NoStar);
        assert_eq!(coffee.discount(), Decimal::new(12, 2));

        // 1.25 × 0.06 = 0.075 → rounds up to 0.08
        let juice = Product::drink(105, "Juice", Decimal::new(125, 2), Rating::NoStar);
        assert_eq!(juice.discount(), Decimal::new(8, 2));
    }

    #[test]
    fn test_with_rating_preserves_everything_else() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let cake = Product::food(103, "Cake", Decimal::new(399, 2), Rating::NoStar, date);

        let rated = cake.with_rating(Rating::FourStar);

        assert_eq!(rated.rating(), Rating::FourStar);
        assert_eq!(rated.id(), cake.id());
        assert_eq!(rated.name(), cake.name());
        assert_eq!(rated.price(), cake.price());
        assert_eq!(rated.kind(), cake.kind());
    }

    #[test]
    fn test_food_best_before_is_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let cake = Product::food(103, "Cake", Decimal::new(399, 2), Rating::NoStar, date);
        assert_eq!(cake.best_before(), date);
    }

    #[test]
    fn test_drink_best_before_is_today() {
        let tea = Product::drink(101, "Tea", Decimal::new(199, 2), Rating::NoStar);
        assert_eq!(tea.best_before(), Local::now().date_naive());
    }
}
