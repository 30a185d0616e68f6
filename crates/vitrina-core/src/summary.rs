//! Lightweight search projections of [`ProductRecord`].

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::ProductRecord;

/// Marker appended to a truncated description preview.
pub const ELLIPSIS: &str = "...";

/// A product as shown in the suggestion dropdown and the result grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSummary {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub currency: String,
    /// URL of the first gallery image; empty when the product has none.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
}

impl SearchResultSummary {
    /// Projects a normalized record, cutting the description to
    /// `preview_len` characters followed by [`ELLIPSIS`].
    #[must_use]
    pub fn from_record(record: &ProductRecord, preview_len: usize) -> Self {
        let description = (!record.description.is_empty()).then(|| {
            let mut preview: String = record.description.chars().take(preview_len).collect();
            preview.push_str(ELLIPSIS);
            preview
        });

        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            price: record.price,
            currency: record.currency.clone(),
            image: record.primary_image().unwrap_or_default().to_owned(),
            description,
            product_type: record.has_known_type().then(|| record.product_type.clone()),
        }
    }
}

/// Keeps the first occurrence of each product id and truncates to `limit`.
#[must_use]
pub fn dedupe_and_cap(
    summaries: impl IntoIterator<Item = SearchResultSummary>,
    limit: usize,
) -> Vec<SearchResultSummary> {
    let mut seen = HashSet::new();
    summaries
        .into_iter()
        .filter(|summary| seen.insert(summary.id.clone()))
        .take(limit)
        .collect()
}

/// Client-side match used when the search endpoint is unavailable.
///
/// `needle` must already be lowercased and trimmed. Title, description and
/// seller name are compared case-insensitively.
#[must_use]
pub fn matches_query(record: &ProductRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&record.title)
        || contains(&record.description)
        || record
            .seller
            .as_ref()
            .is_some_and(|seller| contains(&seller.name))
}

/// Lowercases and trims a user query; `None` for a blank query.
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Default description preview length, in characters.
pub const DEFAULT_PREVIEW_LEN: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::normalize_product;
    use crate::products::Seller;
    use crate::raw::{RawImage, RawProduct};

    fn make_record(id: &str, title: &str, description: &str) -> ProductRecord {
        normalize_product(RawProduct {
            id: id.to_owned(),
            title: title.to_owned(),
            price: Decimal::new(1999, 2),
            description: Some(description.to_owned()),
            images: Some(vec![
                RawImage::Url(format!("/img/{id}-1.jpg")),
                RawImage::Url(format!("/img/{id}-2.jpg")),
            ]),
            seller: Some(Seller {
                id: "s1".to_owned(),
                name: "Tienda Oficial Motorola".to_owned(),
                ..Seller::default()
            }),
            ..RawProduct::default()
        })
    }

    fn summary(id: &str) -> SearchResultSummary {
        SearchResultSummary::from_record(&make_record(id, "Phone", ""), DEFAULT_PREVIEW_LEN)
    }

    #[test]
    fn from_record_uses_first_image_and_default_currency() {
        let s = summary("p1");
        assert_eq!(s.image, "/img/p1-1.jpg");
        assert_eq!(s.currency, defaults::CURRENCY);
        assert!(s.description.is_none());
        assert!(s.product_type.is_none());
    }

    #[test]
    fn from_record_truncates_long_description() {
        let long = "x".repeat(150);
        let s = SearchResultSummary::from_record(&make_record("p1", "Phone", &long), 100);
        let description = s.description.unwrap();
        assert_eq!(description.chars().count(), 103);
        assert!(description.ends_with(ELLIPSIS));
    }

    #[test]
    fn from_record_appends_marker_to_short_description() {
        let s = SearchResultSummary::from_record(&make_record("p1", "Phone", "Corto"), 100);
        assert_eq!(s.description.as_deref(), Some("Corto..."));
    }

    #[test]
    fn from_record_truncates_on_char_boundaries() {
        let s = SearchResultSummary::from_record(&make_record("p1", "Phone", "ñandú"), 3);
        assert_eq!(s.description.as_deref(), Some("ñan..."));
    }

    #[test]
    fn from_record_keeps_known_product_type() {
        let mut record = make_record("p1", "Phone", "");
        record.product_type = "celular".to_owned();
        let s = SearchResultSummary::from_record(&record, 100);
        assert_eq!(s.product_type.as_deref(), Some("celular"));
    }

    #[test]
    fn dedupe_and_cap_keeps_first_occurrence() {
        let mut dup = summary("a");
        dup.title = "Duplicate".to_owned();
        let out = dedupe_and_cap(vec![summary("a"), dup, summary("b")], 5);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Phone");
        assert_eq!(out[1].id, "b");
    }

    #[test]
    fn dedupe_and_cap_limits_after_dedupe() {
        let items = ["a", "a", "b", "c", "d", "e", "f"].map(summary);
        let out = dedupe_and_cap(items, 5);
        let ids: Vec<_> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn matches_query_checks_title_description_and_seller() {
        let record = make_record("p1", "Moto G84", "Pantalla pOLED");
        assert!(matches_query(&record, "moto g"));
        assert!(matches_query(&record, "poled"));
        assert!(matches_query(&record, "tienda oficial"));
        assert!(!matches_query(&record, "iphone"));
        assert!(!matches_query(&record, ""));
    }

    #[test]
    fn normalize_query_trims_and_lowercases() {
        assert_eq!(normalize_query("  PhoNe "), Some("phone".to_owned()));
        assert!(normalize_query("   ").is_none());
    }
}
