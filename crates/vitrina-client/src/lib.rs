//! Access to the product API.
//!
//! [`ProductClient`] talks HTTP and reports every failure as a
//! [`ClientError`]. [`Catalog`] sits on top of any [`ProductRepository`] and
//! turns those failures into fallbacks, so the pages it feeds always get data.

pub mod catalog;
pub mod client;
pub mod error;
pub mod repository;

pub use catalog::{Catalog, CatalogLimits, ProductPage};
pub use client::{ClientConfig, ProductClient};
pub use error::ClientError;
pub use repository::ProductRepository;
