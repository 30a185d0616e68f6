use std::future::Future;

use vitrina_core::{Page, RawProduct, RelatedProduct};

use crate::error::ClientError;

/// One method per product API endpoint.
///
/// Implementations return raw payloads; normalization and fallbacks belong to
/// [`crate::Catalog`].
pub trait ProductRepository: Send + Sync + 'static {
    /// `GET /products/{id}`
    fn get_product(&self, id: &str)
        -> impl Future<Output = Result<RawProduct, ClientError>> + Send;

    /// `GET /products`
    fn get_all_products(&self) -> impl Future<Output = Result<Vec<RawProduct>, ClientError>> + Send;

    /// `GET /products/search?q={query}`
    fn search_products(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<RawProduct>, ClientError>> + Send;

    /// `GET /products/search?q={query}&page={page}&size={size}`
    fn search_products_page(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> impl Future<Output = Result<Page<RawProduct>, ClientError>> + Send;

    /// `GET /products/mock/{id}`
    fn get_mock_product(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<RawProduct, ClientError>> + Send;

    /// `GET /products/type/{product_type}`
    fn get_products_by_type(
        &self,
        product_type: &str,
    ) -> impl Future<Output = Result<Vec<RelatedProduct>, ClientError>> + Send;

    /// `GET /products/type/{product_type}?page={page}&size={size}`
    fn get_products_by_type_page(
        &self,
        product_type: &str,
        page: u32,
        size: u32,
    ) -> impl Future<Output = Result<Page<RelatedProduct>, ClientError>> + Send;
}
