//! Product data for the storefront pages, with fetch failures absorbed.
//!
//! Every public operation here is infallible. Errors from the repository are
//! logged and replaced by the documented fallback: the mock endpoint and then
//! a hardcoded placeholder for a single product, an empty list or empty page
//! for collections.

use serde::Serialize;
use vitrina_core::defaults;
use vitrina_core::presentation::repair_image_path;
use vitrina_core::{
    dedupe_and_cap, matches_query, normalize_product, normalize_query, AppConfig, Page,
    ProductRecord, RawImage, RawProduct, RelatedProduct, SearchResultSummary,
    DEFAULT_PREVIEW_LEN,
};
use vitrina_search::{SearchMode, SuggestionSource};

use crate::repository::ProductRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLimits {
    pub suggestions: usize,
    pub full_results: usize,
    pub description_preview_len: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            suggestions: 5,
            full_results: 50,
            description_preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

impl CatalogLimits {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            suggestions: config.suggestion_limit,
            full_results: config.full_results_limit,
            description_preview_len: config.description_preview_len,
        }
    }
}

/// A product together with the other products of its type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub product: ProductRecord,
    pub related: Vec<RelatedProduct>,
}

pub struct Catalog<R> {
    repository: R,
    limits: CatalogLimits,
}

impl<R: ProductRepository> Catalog<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self::with_limits(repository, CatalogLimits::default())
    }

    #[must_use]
    pub fn with_limits(repository: R, limits: CatalogLimits) -> Self {
        Self { repository, limits }
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub fn limits(&self) -> CatalogLimits {
        self.limits
    }

    /// Loads one product, falling back to the mock endpoint and then to a
    /// placeholder record. Always normalized.
    pub async fn product(&self, id: &str) -> ProductRecord {
        let raw = match self.repository.get_product(id).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "product fetch failed, trying mock");
                match self.repository.get_mock_product(id).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::warn!(
                            product_id = %id,
                            error = %e,
                            "mock product fetch failed, using placeholder"
                        );
                        defaults::unavailable_product(id)
                    }
                }
            }
        };
        normalize_product(repair_images(raw))
    }

    /// Dropdown suggestions for a query typed so far.
    pub async fn suggestions(&self, query: &str) -> Vec<SearchResultSummary> {
        self.search_capped(query, self.limits.suggestions).await
    }

    /// Results for an explicitly submitted query.
    pub async fn full_results(&self, query: &str) -> Vec<SearchResultSummary> {
        self.search_capped(query, self.limits.full_results).await
    }

    async fn search_capped(&self, query: &str, limit: usize) -> Vec<SearchResultSummary> {
        let Some(needle) = normalize_query(query) else {
            return Vec::new();
        };

        let records: Vec<ProductRecord> = match self.repository.search_products(&needle).await {
            Ok(raws) => raws.into_iter().map(normalize_product).collect(),
            Err(e) => {
                tracing::warn!(
                    query = %needle,
                    error = %e,
                    "search failed, filtering full catalog"
                );
                match self.repository.get_all_products().await {
                    Ok(raws) => raws
                        .into_iter()
                        .map(normalize_product)
                        .filter(|record| matches_query(record, &needle))
                        .collect(),
                    Err(e) => {
                        tracing::warn!(query = %needle, error = %e, "catalog fetch failed");
                        return Vec::new();
                    }
                }
            }
        };

        let preview_len = self.limits.description_preview_len;
        dedupe_and_cap(
            records
                .iter()
                .map(|record| SearchResultSummary::from_record(record, preview_len)),
            limit,
        )
    }

    /// One page of search results; an empty page on blank query or failure.
    pub async fn search_page(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Page<SearchResultSummary> {
        let Some(needle) = normalize_query(query) else {
            return Page::empty(page, size);
        };
        match self
            .repository
            .search_products_page(&needle, page, size)
            .await
        {
            Ok(results) => {
                let preview_len = self.limits.description_preview_len;
                results.map(|raw| {
                    SearchResultSummary::from_record(&normalize_product(raw), preview_len)
                })
            }
            Err(e) => {
                tracing::warn!(query = %needle, page, size, error = %e, "paged search failed");
                Page::empty(page, size)
            }
        }
    }

    /// Products sharing `product_type`; empty for a blank type or on failure.
    pub async fn related(&self, product_type: &str) -> Vec<RelatedProduct> {
        if product_type.trim().is_empty() {
            tracing::debug!("no product type given for related products");
            return Vec::new();
        }
        match self.repository.get_products_by_type(product_type).await {
            Ok(related) => related.into_iter().map(repair_related_image).collect(),
            Err(e) => {
                tracing::warn!(product_type, error = %e, "related products fetch failed");
                Vec::new()
            }
        }
    }

    pub async fn related_page(
        &self,
        product_type: &str,
        page: u32,
        size: u32,
    ) -> Page<RelatedProduct> {
        if product_type.trim().is_empty() {
            return Page::empty(page, size);
        }
        match self
            .repository
            .get_products_by_type_page(product_type, page, size)
            .await
        {
            Ok(related) => related.map(repair_related_image),
            Err(e) => {
                tracing::warn!(
                    product_type,
                    page,
                    size,
                    error = %e,
                    "paged related products fetch failed"
                );
                Page::empty(page, size)
            }
        }
    }

    /// Everything the detail page shows: the product and the products of
    /// its type. Placeholder types get no related products.
    pub async fn product_page(&self, id: &str) -> ProductPage {
        let product = self.product(id).await;
        let related = if product.has_known_type() {
            self.related(&product.product_type).await
        } else {
            Vec::new()
        };
        ProductPage { product, related }
    }
}

impl<R: ProductRepository> SuggestionSource for Catalog<R> {
    type Error = std::convert::Infallible;

    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
    ) -> Result<Vec<SearchResultSummary>, Self::Error> {
        Ok(match mode {
            SearchMode::Suggestions => self.suggestions(query).await,
            SearchMode::Full => self.full_results(query).await,
        })
    }
}

fn repair_images(mut raw: RawProduct) -> RawProduct {
    if let Some(images) = raw.images.as_mut() {
        for image in images {
            match image {
                RawImage::Url(url) => *url = repair_image_path(url),
                RawImage::Entry(entry) => entry.url = repair_image_path(&entry.url),
                RawImage::Other(_) => {}
            }
        }
    }
    raw
}

fn repair_related_image(mut related: RelatedProduct) -> RelatedProduct {
    related.image = repair_image_path(&related.image);
    related
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
