pub mod app_config;
pub mod config;
pub mod defaults;
pub mod normalize;
pub mod page;
pub mod presentation;
pub mod products;
pub mod raw;
pub mod summary;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::{normalize, normalize_product};
pub use page::Page;
pub use products::{
    BreadcrumbItem, PaymentKind, PaymentMethod, ProductImage, ProductRecord, Rating,
    RelatedProduct, Review, Seller, SellerReputation, ShippingInfo, Specification,
};
pub use raw::{RawImage, RawImageEntry, RawProduct, RawRating};
pub use summary::{
    dedupe_and_cap, matches_query, normalize_query, SearchResultSummary, DEFAULT_PREVIEW_LEN,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
