//! One-shot catalog commands. Output is pretty JSON on stdout; logs go to
//! stderr.

use serde::Serialize;
use vitrina_client::{Catalog, ProductRepository};
use vitrina_core::presentation::{discount_percentage, star_fill, StarFill};
use vitrina_core::ProductRecord;

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `★★★½☆` style rendering of an average.
pub(crate) fn star_line(average: f64) -> String {
    star_fill(average)
        .iter()
        .map(|fill| match fill {
            StarFill::Full => '★',
            StarFill::Half => '½',
            StarFill::Empty => '☆',
        })
        .collect()
}

fn log_product_summary(product: &ProductRecord) {
    let discount = discount_percentage(product);
    match &product.rating {
        Some(rating) => tracing::info!(
            product_id = %product.id,
            discount,
            stars = %star_line(rating.average),
            reviews = rating.total_reviews,
            "product loaded"
        ),
        None => tracing::info!(product_id = %product.id, discount, "product loaded (no rating)"),
    }
}

pub(crate) async fn run_product<R: ProductRepository>(
    catalog: &Catalog<R>,
    id: &str,
    with_related: bool,
) -> anyhow::Result<()> {
    if with_related {
        let page = catalog.product_page(id).await;
        log_product_summary(&page.product);
        tracing::info!(related = page.related.len(), "related products loaded");
        print_json(&page)
    } else {
        let product = catalog.product(id).await;
        log_product_summary(&product);
        print_json(&product)
    }
}

pub(crate) async fn run_search<R: ProductRepository>(
    catalog: &Catalog<R>,
    query: &str,
    full: bool,
) -> anyhow::Result<()> {
    let results = if full {
        catalog.full_results(query).await
    } else {
        catalog.suggestions(query).await
    };
    tracing::info!(query, count = results.len(), full, "search finished");
    print_json(&results)
}

pub(crate) async fn run_search_page<R: ProductRepository>(
    catalog: &Catalog<R>,
    query: &str,
    page: u32,
    size: u32,
) -> anyhow::Result<()> {
    let results = catalog.search_page(query, page, size).await;
    tracing::info!(
        query,
        page,
        total_pages = results.total_pages,
        total_elements = results.total_elements,
        "search page loaded"
    );
    print_json(&results)
}

pub(crate) async fn run_related<R: ProductRepository>(
    catalog: &Catalog<R>,
    product_type: &str,
    page: Option<u32>,
    size: u32,
) -> anyhow::Result<()> {
    if let Some(page) = page {
        return print_json(&catalog.related_page(product_type, page, size).await);
    }
    let related = catalog.related(product_type).await;
    tracing::info!(product_type, count = related.len(), "related products loaded");
    print_json(&related)
}
