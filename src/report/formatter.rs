//! Locale Formatter
//!
//! Renders products and reviews as human-readable report text for a
//! fixed set of supported language tags. Formatters are plain values
//! built on demand from static locale tables, so callers construct one
//! per report instead of consulting a global registry.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{Product, Review};

/// Language tag used when the requested tag is not supported
const FALLBACK_TAG: &str = "en-US";

/// Date pattern shared by every supported locale
const DATE_FORMAT: &str = "%Y %m %d";

/// Per-locale rendering rules
struct LocaleSpec {
    /// BCP 47 language tag
    tag: &'static str,
    /// Currency symbol for price rendering
    currency_symbol: &'static str,
    /// Symbol before the amount ("$1.99") or after ("1,99 €")
    symbol_first: bool,
    /// Comma as the decimal separator
    decimal_comma: bool,
    /// Placeholder for a product missing from the catalog
    no_product: &'static str,
    /// Placeholder for a product with no reviews yet
    no_reviews: &'static str,
}

/// The supported locales, fallback first
static LOCALES: [LocaleSpec; 6] = [
    LocaleSpec {
        tag: "en-US",
        currency_symbol: "$",
        symbol_first: true,
        decimal_comma: false,
        no_product: "Product not found",
        no_reviews: "Not reviewed yet",
    },
    LocaleSpec {
        tag: "en-GB",
        currency_symbol: "£",
        symbol_first: true,
        decimal_comma: false,
        no_product: "Product not found",
        no_reviews: "Not reviewed yet",
    },
    LocaleSpec {
        tag: "fr-FR",
        currency_symbol: "€",
        symbol_first: false,
        decimal_comma: true,
        no_product: "Produit introuvable",
        no_reviews: "Pas encore d'avis",
    },
    LocaleSpec {
        tag: "zh-CN",
        currency_symbol: "¥",
        symbol_first: true,
        decimal_comma: false,
        no_product: "未找到商品",
        no_reviews: "暂无评论",
    },
    LocaleSpec {
        tag: "ru-RU",
        currency_symbol: "₽",
        symbol_first: false,
        decimal_comma: true,
        no_product: "Товар не найден",
        no_reviews: "Отзывов пока нет",
    },
    LocaleSpec {
        tag: "en-IN",
        currency_symbol: "₹",
        symbol_first: true,
        decimal_comma: false,
        no_product: "Product not found",
        no_reviews: "Not reviewed yet",
    },
];

/// Formats catalog entities for one language tag
pub struct Formatter {
    locale: &'static LocaleSpec,
}

impl Formatter {
    /// Build a formatter for the given language tag
    ///
    /// Unknown tags fall back to `en-US` rather than failing, so a
    /// report can always be rendered.
    pub fn new(language_tag: &str) -> Self {
        let locale = LOCALES
            .iter()
            .find(|spec| spec.tag == language_tag)
            .or_else(|| LOCALES.iter().find(|spec| spec.tag == FALLBACK_TAG))
            .unwrap_or(&LOCALES[0]);

        Self { locale }
    }

    /// The language tags this formatter knows how to render
    pub fn supported_tags() -> Vec<&'static str> {
        LOCALES.iter().map(|spec| spec.tag).collect()
    }

    /// The tag actually in effect (after fallback)
    pub fn tag(&self) -> &'static str {
        self.locale.tag
    }

    /// Render one product as a report line
    ///
    /// Shape: `id, name, price, stars, best-before`
    pub fn format_product(&self, product: &Product) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            product.id(),
            product.name(),
            self.format_price(product.price()),
            product.rating().stars(),
            self.format_date(product.best_before())
        )
    }

    /// Render one review as a report line
    pub fn format_review(&self, review: &Review) -> String {
        format!("{}\t{}", review.rating().stars(), review.comment())
    }

    /// Render a price with the locale's currency symbol and separator
    pub fn format_price(&self, price: Decimal) -> String {
        let mut amount = price.to_string();
        if self.locale.decimal_comma {
            amount = amount.replace('.', ",");
        }

        if self.locale.symbol_first {
            format!("{}{}", self.locale.currency_symbol, amount)
        } else {
            format!("{} {}", amount, self.locale.currency_symbol)
        }
    }

    /// Render a date with the shared report pattern
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Look up a localized text fragment
    ///
    /// Known keys: `no.product`, `no.reviews`. Unknown keys echo back
    /// so a typo shows up in the report instead of panicking.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        match key {
            "no.product" => self.locale.no_product,
            "no.reviews" => self.locale.no_reviews,
            other => other,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;

    #[test]
    fn test_unknown_tag_falls_back_to_en_us() {
        let formatter = Formatter::new("xx-XX");
        assert_eq!(formatter.tag(), "en-US");
    }

    #[test]
    fn test_supported_tags() {
        let tags = Formatter::supported_tags();
        assert_eq!(tags.len(), 6);
        assert!(tags.contains(&"en-US"));
        assert!(tags.contains(&"zh-CN"));
    }

    #[test]
    fn test_price_rendering_per_locale() {
        let price = Decimal::new(199, 2);
        assert_eq!(Formatter::new("en-US").format_price(price), "$1.99");
        assert_eq!(Formatter::new("en-GB").format_price(price), "£1.99");
        assert_eq!(Formatter::new("fr-FR").format_price(price), "1,99 €");
        assert_eq!(Formatter::new("ru-RU").format_price(price), "1,99 ₽");
        assert_eq!(Formatter::new("en-IN").format_price(price), "₹1.99");
    }

    #[test]
    fn test_format_product_line() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let cake = Product::food(103, "Cake", Decimal::new(399, 2), Rating::FiveStar, date);
        let line = Formatter::new("en-US").format_product(&cake);
        assert_eq!(line, "103, Cake, $3.99, ★★★★★, 2026 09 14");
    }

    #[test]
    fn test_format_review_line() {
        let review = Review::new(Rating::TwoStar, "Fine tea");
        let line = Formatter::new("en-US").format_review(&review);
        assert_eq!(line, "★★☆☆☆\tFine tea");
    }

    #[test]
    fn test_localized_placeholders() {
        assert_eq!(Formatter::new("fr-FR").text("no.product"), "Produit introuvable");
        assert_eq!(Formatter::new("ru-RU").text("no.reviews"), "Отзывов пока нет");
        assert_eq!(Formatter::new("en-US").text("bogus.key"), "bogus.key");
    }
}
