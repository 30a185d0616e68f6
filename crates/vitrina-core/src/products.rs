use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A complete, display-ready product produced by [`crate::normalize_product`].
///
/// Every field that has a display fallback is populated. Fields that are
/// genuinely optional (seller, shipping, sold quantity) stay `None` when the
/// API omitted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    /// Pre-discount price. Only meaningful when greater than `price`.
    pub original_price: Option<Decimal>,
    /// Display currency code, e.g. `"US$"`.
    pub currency: String,
    pub condition: Option<String>,
    pub available_quantity: Option<u32>,
    pub sold_quantity: Option<u32>,
    pub description: String,
    pub images: Vec<ProductImage>,
    pub specifications: Vec<Specification>,
    pub seller: Option<Seller>,
    pub shipping: Option<ShippingInfo>,
    pub payment_methods: Vec<PaymentMethod>,
    pub rating: Option<Rating>,
    pub breadcrumb: Vec<BreadcrumbItem>,
    pub stock: Option<u32>,
    pub reviews: Vec<Review>,
    /// Category used to look up related products, e.g. `"celular"`.
    pub product_type: String,
}

impl ProductRecord {
    /// URL of the first gallery image, or `None` for an empty gallery.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Returns `true` when the product has a real category rather than the
    /// `"Unknown"` placeholder.
    #[must_use]
    pub fn has_known_type(&self) -> bool {
        !self.product_type.is_empty() && self.product_type != crate::defaults::PRODUCT_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<SellerReputation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_official_store: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerReputation {
    pub level: String,
    pub positive_percentage: f64,
    pub total_transactions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub free_shipping: bool,
    /// Free text such as `"2-3"`; the API does not guarantee a number.
    #[serde(default)]
    pub estimated_days: String,
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Card,
    Cash,
    Transfer,
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentKind::Card => write!(f, "card"),
            PaymentKind::Cash => write!(f, "cash"),
            PaymentKind::Transfer => write!(f, "transfer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    pub icon: String,
}

/// Structured rating. `average` is always within `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub average: f64,
    pub total_reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub comment: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Timestamp exactly as the API sent it.
    #[serde(default)]
    pub created_at: String,
}

impl Review {
    /// Calendar date of the review.
    ///
    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates; anything else
    /// yields `None` so callers can fall back to the raw string.
    #[must_use]
    pub fn created_date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(&self.created_at, "%Y-%m-%d").ok())
    }
}

/// Simplified product card returned by `GET /products/type/{type}`.
///
/// Assumed complete; no normalization applies to this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProduct {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub currency: String,
    pub image: String,
    pub condition: String,
    pub free_shipping: bool,
}
