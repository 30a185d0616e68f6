//! Product payloads as the API sends them, before normalization.
//!
//! ## Observed shape
//!
//! ### `images`
//! Either a list of bare URL strings (`["/img/a.jpg", ...]`) or a list of
//! `{id, url, alt}` objects. Older catalog entries mix the two. Each element
//! is decoded into [`RawImage`] here so the normalizer works on a tagged
//! variant instead of re-inspecting JSON. Objects without a `url` still
//! decode as entries; anything else lands in [`RawImage::Other`] and is
//! dropped by the normalizer.
//!
//! ### `rating`
//! Either a bare number (the average) or `{average, totalReviews}`, sometimes
//! with one of the two missing. Decoded into [`RawRating`]; values of any
//! other shape (e.g. `"4.5"`) are kept as [`RawRating::Invalid`] so a bad
//! rating never rejects the whole product.
//!
//! ### Quantities
//! `stock`, `availableQuantity` and `soldQuantity` are decoded as signed
//! integers and clamped to zero when the record is finalized.
//!
//! ### Empty strings
//! `currency: ""` and `productType: ""` occur in the wild and are treated as
//! absent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{
    BreadcrumbItem, PaymentMethod, ProductImage, ProductRecord, Review, Seller, ShippingInfo,
    Specification,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub available_quantity: Option<i64>,
    #[serde(default)]
    pub sold_quantity: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<RawImage>>,
    #[serde(default)]
    pub specifications: Option<Vec<Specification>>,
    #[serde(default)]
    pub seller: Option<Seller>,
    #[serde(default)]
    pub shipping: Option<ShippingInfo>,
    #[serde(default)]
    pub payment_methods: Option<Vec<PaymentMethod>>,
    #[serde(default)]
    pub rating: Option<RawRating>,
    #[serde(default)]
    pub breadcrumb: Option<Vec<BreadcrumbItem>>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
    #[serde(default)]
    pub product_type: Option<String>,
}

/// One gallery entry in either of the two encodings the API uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawImage {
    Url(String),
    Entry(RawImageEntry),
    Other(serde_json::Value),
}

impl RawImage {
    /// The image URL regardless of encoding.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            RawImage::Url(url) => url,
            RawImage::Entry(entry) => &entry.url,
            RawImage::Other(_) => "",
        }
    }
}

/// Structured gallery entry. Any of the three fields may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImageEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl From<RawImageEntry> for ProductImage {
    fn from(entry: RawImageEntry) -> Self {
        ProductImage {
            id: entry.id.unwrap_or_default(),
            url: entry.url,
            alt: entry.alt.unwrap_or_default(),
        }
    }
}

impl From<ProductImage> for RawImageEntry {
    fn from(image: ProductImage) -> Self {
        RawImageEntry {
            id: Some(image.id),
            url: image.url,
            alt: Some(image.alt),
        }
    }
}

/// Rating in either encoding. A structured rating may be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Average(f64),
    #[serde(rename_all = "camelCase")]
    Structured {
        #[serde(default)]
        average: Option<f64>,
        #[serde(default)]
        total_reviews: Option<u32>,
    },
    Invalid(serde_json::Value),
}

impl From<ProductRecord> for RawProduct {
    /// Lifts a normalized record back into payload form so it can be
    /// normalized again; every populated field is carried over as present.
    fn from(record: ProductRecord) -> Self {
        RawProduct {
            id: record.id,
            title: record.title,
            price: record.price,
            original_price: record.original_price,
            currency: Some(record.currency),
            condition: record.condition,
            available_quantity: record.available_quantity.map(i64::from),
            sold_quantity: record.sold_quantity.map(i64::from),
            description: Some(record.description),
            images: Some(
                record
                    .images
                    .into_iter()
                    .map(|image| RawImage::Entry(image.into()))
                    .collect(),
            ),
            specifications: Some(record.specifications),
            seller: record.seller,
            shipping: record.shipping,
            payment_methods: Some(record.payment_methods),
            rating: record.rating.map(|rating| RawRating::Structured {
                average: Some(rating.average),
                total_reviews: Some(rating.total_reviews),
            }),
            breadcrumb: Some(record.breadcrumb),
            stock: record.stock.map(i64::from),
            reviews: Some(record.reviews),
            product_type: Some(record.product_type),
        }
    }
}
