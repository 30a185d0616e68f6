//! Fixed display fallbacks applied by the normalizer and the catalog service.
//!
//! None of these values are real catalog data; they exist so a partially
//! populated payload still renders as a complete product page.

use rust_decimal::Decimal;

use crate::products::{PaymentKind, PaymentMethod, Seller};
use crate::raw::RawProduct;

pub const CURRENCY: &str = "US$";
pub const PRODUCT_TYPE: &str = "Unknown";

pub const BREADCRUMB_HOME_LABEL: &str = "Inicio";
pub const BREADCRUMB_HOME_URL: &str = "/";
/// Terminal breadcrumb label used when the product has no title.
pub const BREADCRUMB_PRODUCT_LABEL: &str = "Product Details";

/// Title used when synthesizing image alt text for an untitled product.
pub const IMAGE_ALT_TITLE: &str = "Product";

pub const INSTALLMENTS_STANDARD: u32 = 12;
pub const INSTALLMENTS_LIMITED: u32 = 6;
pub const INSTALLMENTS_SINGLE: u32 = 1;

pub const ICON_CARD: &str = "💳";
pub const ICON_CASH: &str = "💵";
pub const ICON_TRANSFER: &str = "🏦";

pub const UNAVAILABLE_TITLE: &str = "Product Not Available";
pub const UNAVAILABLE_DESCRIPTION: &str = "This product is currently not available.";
pub const UNKNOWN_SELLER_ID: &str = "0";
pub const UNKNOWN_SELLER_NAME: &str = "Unknown Seller";
pub const DEFAULT_PAYMENT_METHOD_ID: &str = "default";
pub const DEFAULT_PAYMENT_METHOD_NAME: &str = "Default Payment Method";

/// The canonical four-entry payment list shown when a product carries none.
#[must_use]
pub fn payment_methods() -> Vec<PaymentMethod> {
    let card = |id: &str, name: &str, installments: u32| PaymentMethod {
        id: id.to_owned(),
        name: name.to_owned(),
        kind: PaymentKind::Card,
        installments: Some(installments),
        icon: ICON_CARD.to_owned(),
    };

    vec![
        card("visa", "Visa", INSTALLMENTS_STANDARD),
        card("mastercard", "Mastercard", INSTALLMENTS_STANDARD),
        card("amex", "American Express", INSTALLMENTS_LIMITED),
        PaymentMethod {
            id: "cash".to_owned(),
            name: "Efectivo".to_owned(),
            kind: PaymentKind::Cash,
            installments: Some(INSTALLMENTS_SINGLE),
            icon: ICON_CASH.to_owned(),
        },
    ]
}

/// Minimal payload used when both the primary and the mock product fetch
/// fail. It still goes through the normalizer like any fetched payload.
#[must_use]
pub fn unavailable_product(id: &str) -> RawProduct {
    RawProduct {
        id: id.to_owned(),
        title: UNAVAILABLE_TITLE.to_owned(),
        price: Decimal::ZERO,
        description: Some(UNAVAILABLE_DESCRIPTION.to_owned()),
        images: Some(Vec::new()),
        stock: Some(0),
        available_quantity: Some(0),
        seller: Some(Seller {
            id: UNKNOWN_SELLER_ID.to_owned(),
            name: UNKNOWN_SELLER_NAME.to_owned(),
            is_official_store: Some(false),
            ..Seller::default()
        }),
        reviews: Some(Vec::new()),
        product_type: Some(PRODUCT_TYPE.to_owned()),
        payment_methods: Some(vec![PaymentMethod {
            id: DEFAULT_PAYMENT_METHOD_ID.to_owned(),
            name: DEFAULT_PAYMENT_METHOD_NAME.to_owned(),
            kind: PaymentKind::Card,
            installments: None,
            icon: ICON_CARD.to_owned(),
        }]),
        ..RawProduct::default()
    }
}
