//! Display-derived values for the product detail page.
//!
//! Everything here is computed from an already normalized record; nothing
//! mutates it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::defaults;
use crate::products::{PaymentKind, PaymentMethod, ProductRecord, Review};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Installment count advertised when no card method states one.
pub const FALLBACK_MAX_INSTALLMENTS: u32 = 12;

/// Rounded discount off the original price, in percent.
///
/// Zero when there is no original price, when the product is free, or when
/// the "original" price is not actually higher than the current one.
#[must_use]
pub fn discount_percentage(record: &ProductRecord) -> u32 {
    let Some(original) = record.original_price else {
        return 0;
    };
    if record.price.is_zero() || original <= record.price {
        return 0;
    }
    ((original - record.price) / original * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Five-star rendering of an average, with half stars.
#[must_use]
pub fn star_fill(average: f64) -> [StarFill; 5] {
    let average = if average.is_nan() { 0.0 } else { average };
    let whole = average.floor();
    [1.0, 2.0, 3.0, 4.0, 5.0].map(|position: f64| {
        if position <= whole {
            StarFill::Full
        } else if position - 0.5 <= average {
            StarFill::Half
        } else {
            StarFill::Empty
        }
    })
}

/// Aggregates for the reviews panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStats {
    pub average: f64,
    pub total: u32,
    /// Count of reviews per star, index 0 holding one-star reviews.
    pub distribution: [u32; 5],
}

impl ReviewStats {
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut distribution = [0u32; 5];
        let mut sum = 0u32;
        for review in reviews {
            sum += u32::from(review.rating);
            if (1..=5).contains(&review.rating) {
                distribution[usize::from(review.rating - 1)] += 1;
            }
        }
        let total = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
        let average = if total == 0 {
            0.0
        } else {
            f64::from(sum) / f64::from(total)
        };
        Self {
            average,
            total,
            distribution,
        }
    }

    /// Share of reviews with exactly `stars` stars, in percent.
    #[must_use]
    pub fn percentage(&self, stars: u8) -> f64 {
        if self.total == 0 || !(1..=5).contains(&stars) {
            return 0.0;
        }
        f64::from(self.distribution[usize::from(stars - 1)]) / f64::from(self.total) * 100.0
    }

    /// Whether a "show more" control is needed when listing `limit` reviews.
    #[must_use]
    pub fn has_more(&self, limit: usize) -> bool {
        usize::try_from(self.total).is_ok_and(|total| total > limit)
    }
}

/// The first `limit` reviews, in API order.
#[must_use]
pub fn displayed_reviews(reviews: &[Review], limit: usize) -> &[Review] {
    &reviews[..reviews.len().min(limit)]
}

/// Splits a description on blank lines, dropping empty paragraphs.
#[must_use]
pub fn description_paragraphs(description: &str) -> Vec<&str> {
    description
        .split(PARAGRAPH_SEPARATOR)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Guesses the payment category from a method's display name and optional
/// description. Unrecognized names count as cards.
#[must_use]
pub fn infer_payment_kind(name: &str, description: Option<&str>) -> PaymentKind {
    const CARD_NAME: &[&str] = &[
        "tarjeta",
        "visa",
        "master",
        "amex",
        "american express",
        "credit",
        "crédito",
        "débito",
        "debit",
    ];
    const CARD_DESCRIPTION: &[&str] = &["visa", "master", "amex", "american express"];
    const CASH_NAME: &[&str] = &["efectivo", "cash", "pago fácil", "rapipago"];
    const TRANSFER_NAME: &[&str] = &["transfer", "transferencia", "banco", "bank", "paypal"];
    const TRANSFER_DESCRIPTION: &[&str] = &["paypal"];

    let name = name.to_lowercase();
    let description = description.unwrap_or_default().to_lowercase();
    let any = |haystack: &str, needles: &[&str]| needles.iter().any(|n| haystack.contains(n));

    if any(&name, CARD_NAME) || any(&description, CARD_DESCRIPTION) {
        PaymentKind::Card
    } else if any(&name, CASH_NAME) {
        PaymentKind::Cash
    } else if any(&name, TRANSFER_NAME) || any(&description, TRANSFER_DESCRIPTION) {
        PaymentKind::Transfer
    } else {
        PaymentKind::Card
    }
}

#[must_use]
pub fn default_icon(kind: PaymentKind) -> &'static str {
    match kind {
        PaymentKind::Card => defaults::ICON_CARD,
        PaymentKind::Cash => defaults::ICON_CASH,
        PaymentKind::Transfer => defaults::ICON_TRANSFER,
    }
}

#[must_use]
pub fn methods_of_kind(methods: &[PaymentMethod], kind: PaymentKind) -> Vec<&PaymentMethod> {
    methods.iter().filter(|m| m.kind == kind).collect()
}

/// Largest installment count offered by a card, or
/// [`FALLBACK_MAX_INSTALLMENTS`] when no card states one.
#[must_use]
pub fn max_installments(methods: &[PaymentMethod]) -> u32 {
    methods_of_kind(methods, PaymentKind::Card)
        .into_iter()
        .filter_map(|m| m.installments)
        .max()
        .filter(|&n| n > 0)
        .unwrap_or(FALLBACK_MAX_INSTALLMENTS)
}

/// Some catalog entries point at `.html` pages instead of images; swap the
/// extension for `.jpg`.
#[must_use]
pub fn repair_image_path(url: &str) -> String {
    match url.strip_suffix(".html") {
        Some(stem) => format!("{stem}.jpg"),
        None => url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_product;
    use crate::raw::RawProduct;

    fn record_with_prices(price: Decimal, original: Option<Decimal>) -> ProductRecord {
        normalize_product(RawProduct {
            id: "p".to_owned(),
            title: "Phone".to_owned(),
            price,
            original_price: original,
            ..RawProduct::default()
        })
    }

    fn review(rating: u8) -> Review {
        Review {
            id: format!("r{rating}"),
            user_id: String::new(),
            user_name: String::new(),
            comment: String::new(),
            rating,
            created_at: String::new(),
        }
    }

    fn method(kind: PaymentKind, installments: Option<u32>) -> PaymentMethod {
        PaymentMethod {
            id: kind.to_string(),
            name: kind.to_string(),
            kind,
            installments,
            icon: default_icon(kind).to_owned(),
        }
    }

    #[test]
    fn discount_rounds_to_whole_percent() {
        let record = record_with_prices(Decimal::new(6_000, 2), Some(Decimal::new(9_000, 2)));
        assert_eq!(discount_percentage(&record), 33);
    }

    #[test]
    fn discount_zero_without_original_price() {
        let record = record_with_prices(Decimal::new(6_000, 2), None);
        assert_eq!(discount_percentage(&record), 0);
    }

    #[test]
    fn discount_zero_when_original_not_higher() {
        let record = record_with_prices(Decimal::new(6_000, 2), Some(Decimal::new(5_000, 2)));
        assert_eq!(discount_percentage(&record), 0);
    }

    #[test]
    fn discount_zero_for_free_product() {
        let record = record_with_prices(Decimal::ZERO, Some(Decimal::new(5_000, 2)));
        assert_eq!(discount_percentage(&record), 0);
    }

    #[test]
    fn star_fill_handles_half_stars() {
        use StarFill::{Empty, Full, Half};
        assert_eq!(star_fill(3.5), [Full, Full, Full, Half, Empty]);
        assert_eq!(star_fill(4.0), [Full, Full, Full, Full, Empty]);
        assert_eq!(star_fill(0.0), [Empty; 5]);
        assert_eq!(star_fill(5.0), [Full; 5]);
    }

    #[test]
    fn review_stats_distribution_and_percentage() {
        let reviews = vec![review(5), review(5), review(4), review(1)];
        let stats = ReviewStats::from_reviews(&reviews);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.distribution, [1, 0, 0, 1, 2]);
        assert!((stats.average - 3.75).abs() < f64::EPSILON);
        assert!((stats.percentage(5) - 50.0).abs() < f64::EPSILON);
        assert!(stats.percentage(0).abs() < f64::EPSILON);
    }

    #[test]
    fn review_stats_empty() {
        let stats = ReviewStats::from_reviews(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.average.abs() < f64::EPSILON);
        assert!(stats.percentage(3).abs() < f64::EPSILON);
        assert!(!stats.has_more(5));
    }

    #[test]
    fn displayed_reviews_caps_and_signals_more() {
        let reviews: Vec<_> = (1..=5).chain(1..=2).map(review).collect();
        let stats = ReviewStats::from_reviews(&reviews);
        assert_eq!(displayed_reviews(&reviews, 5).len(), 5);
        assert!(stats.has_more(5));
        assert_eq!(displayed_reviews(&reviews, 50).len(), 7);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let text = "Primera línea.\n\n  \n\nSegunda.\n\nTercera.";
        assert_eq!(
            description_paragraphs(text),
            vec!["Primera línea.", "Segunda.", "Tercera."]
        );
        assert!(description_paragraphs("").is_empty());
    }

    #[test]
    fn infer_payment_kind_by_keywords() {
        assert_eq!(
            infer_payment_kind("Tarjeta de crédito", None),
            PaymentKind::Card
        );
        assert_eq!(infer_payment_kind("Rapipago", None), PaymentKind::Cash);
        assert_eq!(
            infer_payment_kind("Transferencia bancaria", None),
            PaymentKind::Transfer
        );
        assert_eq!(
            infer_payment_kind("Billetera", Some("Pagá con PayPal")),
            PaymentKind::Transfer
        );
        assert_eq!(infer_payment_kind("Mercado Crédito", None), PaymentKind::Card);
        assert_eq!(infer_payment_kind("Otro", None), PaymentKind::Card);
    }

    #[test]
    fn max_installments_prefers_cards() {
        let methods = vec![
            method(PaymentKind::Card, Some(6)),
            method(PaymentKind::Card, Some(18)),
            method(PaymentKind::Cash, Some(24)),
        ];
        assert_eq!(max_installments(&methods), 18);
    }

    #[test]
    fn max_installments_falls_back_without_card_data() {
        assert_eq!(max_installments(&[]), 12);
        assert_eq!(
            max_installments(&[method(PaymentKind::Card, None)]),
            FALLBACK_MAX_INSTALLMENTS
        );
        assert_eq!(
            max_installments(&[method(PaymentKind::Card, Some(0))]),
            FALLBACK_MAX_INSTALLMENTS
        );
    }

    #[test]
    fn methods_of_kind_filters() {
        let methods = crate::defaults::payment_methods();
        assert_eq!(methods_of_kind(&methods, PaymentKind::Card).len(), 3);
        assert_eq!(methods_of_kind(&methods, PaymentKind::Transfer).len(), 0);
    }

    #[test]
    fn repair_image_path_swaps_html_extension() {
        assert_eq!(repair_image_path("/img/phone.html"), "/img/phone.jpg");
        assert_eq!(repair_image_path("/img/phone.png"), "/img/phone.png");
        assert_eq!(repair_image_path(""), "");
    }
}
