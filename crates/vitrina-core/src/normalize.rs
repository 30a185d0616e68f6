//! Normalization from raw API payloads to [`ProductRecord`].
//!
//! The pipeline is an ordered list of fill-if-absent steps over a
//! [`RawProduct`], followed by a total conversion into the record. No step
//! overwrites a value the payload already carries, so normalizing an already
//! normalized record is a no-op.
//!
//! Rating derivation must run before anything else could populate `rating`;
//! the remaining steps are independent of each other.

use crate::defaults;
use crate::products::{BreadcrumbItem, ProductImage, ProductRecord, Rating};
use crate::raw::{RawImage, RawImageEntry, RawProduct, RawRating};

type Step = fn(&mut RawProduct);

const STEPS: [Step; 7] = [
    fill_breadcrumb,
    fill_available_quantity,
    fill_currency,
    derive_rating_from_reviews,
    homogenize_images,
    fill_payment_methods,
    fill_product_type,
];

/// Normalizes an optional payload. An absent payload stays absent; no record
/// is synthesized for it.
#[must_use]
pub fn normalize(raw: Option<RawProduct>) -> Option<ProductRecord> {
    raw.map(normalize_product)
}

/// Normalizes a raw payload into a complete [`ProductRecord`].
///
/// Never fails: missing optional fields receive a display default or are
/// left empty.
#[must_use]
pub fn normalize_product(mut raw: RawProduct) -> ProductRecord {
    for step in STEPS {
        step(&mut raw);
    }
    finalize(raw)
}

/// Defaults the breadcrumb to `Inicio > {title}`.
pub fn fill_breadcrumb(raw: &mut RawProduct) {
    if raw.breadcrumb.is_some() {
        return;
    }
    let label = if raw.title.is_empty() {
        defaults::BREADCRUMB_PRODUCT_LABEL.to_owned()
    } else {
        raw.title.clone()
    };
    raw.breadcrumb = Some(vec![
        BreadcrumbItem {
            label: defaults::BREADCRUMB_HOME_LABEL.to_owned(),
            url: Some(defaults::BREADCRUMB_HOME_URL.to_owned()),
        },
        BreadcrumbItem { label, url: None },
    ]);
}

/// `availableQuantity := availableQuantity ?? stock`.
pub fn fill_available_quantity(raw: &mut RawProduct) {
    if raw.available_quantity.is_none() {
        raw.available_quantity = raw.stock;
    }
}

pub fn fill_currency(raw: &mut RawProduct) {
    if is_blank(raw.currency.as_deref()) {
        raw.currency = Some(defaults::CURRENCY.to_owned());
    }
}

/// Derives `{average, totalReviews}` from the review list when the payload
/// has no rating at all. Any rating already present, even a zero, partial or
/// unreadable one, is left alone.
pub fn derive_rating_from_reviews(raw: &mut RawProduct) {
    if raw.rating.is_some() {
        return;
    }
    let Some(reviews) = raw.reviews.as_deref().filter(|r| !r.is_empty()) else {
        return;
    };

    let total = count_u32(reviews.len());
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let average = f64::from(sum) / f64::from(total);

    tracing::debug!(product_id = %raw.id, average, total, "derived rating from reviews");
    raw.rating = Some(RawRating::Structured {
        average: Some(average),
        total_reviews: Some(total),
    });
}

/// Rewrites the gallery so every element is a structured entry.
///
/// Elements of no recognizable shape are dropped first. The first remaining
/// element decides the list's representation. In a string-led list every
/// element is re-keyed by position with a synthesized alt text. In an
/// entry-led list structured entries pass through untouched and only stray
/// bare strings are wrapped.
pub fn homogenize_images(raw: &mut RawProduct) {
    let Some(images) = raw.images.take() else {
        return;
    };
    let before = images.len();
    let images: Vec<RawImage> = images
        .into_iter()
        .filter(|image| !matches!(image, RawImage::Other(_)))
        .collect();
    if images.len() < before {
        tracing::debug!(
            product_id = %raw.id,
            dropped = before - images.len(),
            "dropped unrecognized gallery entries"
        );
    }

    let string_led = matches!(images.first(), Some(RawImage::Url(_)));
    let title = if raw.title.is_empty() {
        defaults::IMAGE_ALT_TITLE
    } else {
        raw.title.as_str()
    };

    let homogenized = images
        .into_iter()
        .enumerate()
        .map(|(idx, image)| match image {
            RawImage::Entry(entry) if !string_led => RawImage::Entry(entry),
            other => RawImage::Entry(RawImageEntry {
                id: Some(idx.to_string()),
                url: other.url().to_owned(),
                alt: Some(format!("{title} - Image {}", idx + 1)),
            }),
        })
        .collect();

    raw.images = Some(homogenized);
}

pub fn fill_payment_methods(raw: &mut RawProduct) {
    if raw.payment_methods.as_ref().is_none_or(Vec::is_empty) {
        raw.payment_methods = Some(defaults::payment_methods());
    }
}

pub fn fill_product_type(raw: &mut RawProduct) {
    if is_blank(raw.product_type.as_deref()) {
        raw.product_type = Some(defaults::PRODUCT_TYPE.to_owned());
    }
}

/// Total conversion from a filled payload into the record.
fn finalize(raw: RawProduct) -> ProductRecord {
    let review_count = raw.reviews.as_ref().map_or(0, |r| count_u32(r.len()));
    let rating = raw.rating.map(|rating| match rating {
        RawRating::Average(average) => Rating {
            average: clamp_average(average),
            total_reviews: review_count,
        },
        RawRating::Structured {
            average,
            total_reviews,
        } => Rating {
            average: clamp_average(average.unwrap_or(0.0)),
            total_reviews: total_reviews.unwrap_or(0),
        },
        RawRating::Invalid(value) => match lenient_average(&value) {
            Some(average) => Rating {
                average: clamp_average(average),
                total_reviews: review_count,
            },
            None => Rating {
                average: 0.0,
                total_reviews: 0,
            },
        },
    });

    ProductRecord {
        id: raw.id,
        title: raw.title,
        price: raw.price,
        original_price: raw.original_price,
        currency: raw
            .currency
            .unwrap_or_else(|| defaults::CURRENCY.to_owned()),
        condition: raw.condition,
        available_quantity: raw.available_quantity.map(clamp_quantity),
        sold_quantity: raw.sold_quantity.map(clamp_quantity),
        description: raw.description.unwrap_or_default(),
        images: raw
            .images
            .unwrap_or_default()
            .into_iter()
            .filter_map(into_image)
            .collect(),
        specifications: raw.specifications.unwrap_or_default(),
        seller: raw.seller,
        shipping: raw.shipping,
        payment_methods: raw.payment_methods.unwrap_or_default(),
        rating,
        breadcrumb: raw.breadcrumb.unwrap_or_default(),
        stock: raw.stock.map(clamp_quantity),
        reviews: raw.reviews.unwrap_or_default(),
        product_type: raw
            .product_type
            .unwrap_or_else(|| defaults::PRODUCT_TYPE.to_owned()),
    }
}

// `Url` and `Other` are not produced once `homogenize_images` has run.
fn into_image(image: RawImage) -> Option<ProductImage> {
    match image {
        RawImage::Entry(entry) => Some(entry.into()),
        RawImage::Url(url) => Some(ProductImage {
            id: String::new(),
            url,
            alt: String::new(),
        }),
        RawImage::Other(_) => None,
    }
}

/// A rating sent as a numeric string, e.g. `"4.5"`.
fn lenient_average(value: &serde_json::Value) -> Option<f64> {
    value.as_str()?.trim().parse::<f64>().ok()
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

fn clamp_average(average: f64) -> f64 {
    if average.is_nan() {
        0.0
    } else {
        average.clamp(0.0, 5.0)
    }
}

fn clamp_quantity(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
