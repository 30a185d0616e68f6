//! HTTP implementation of [`ProductRepository`] over `reqwest`.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use vitrina_core::{AppConfig, Page, RawProduct, RelatedProduct};

use crate::error::ClientError;
use crate::repository::ProductRepository;

const DEFAULT_BASE_URL: &str = "http://localhost:8085/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "vitrina/0.1 (storefront)";

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Client for the product API.
///
/// Maps 404 to [`ClientError::NotFound`] and any other non-2xx status to
/// [`ClientError::UnexpectedStatus`]. Requests are never retried.
pub struct ProductClient {
    client: Client,
    base_url: String,
}

impl ProductClient {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `config.base_url` does not
    /// parse, or [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_owned(),
        })
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`ProductClient::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Self::new(&ClientConfig {
            base_url: base_url.to_owned(),
            timeout_secs,
            ..ClientConfig::default()
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/products[/segment...][?key=value&...]`, with every segment and
    /// query value percent-encoded.
    fn products_url(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut url = format!("{}/products", self.base_url);
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, COMPONENT));
        }
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.extend(utf8_percent_encode(value, COMPONENT));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        context: String,
    ) -> Result<T, ClientError> {
        tracing::debug!(url = %url, "product API request");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { url });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize { context, source: e })
    }
}

impl ProductRepository for ProductClient {
    async fn get_product(&self, id: &str) -> Result<RawProduct, ClientError> {
        let url = self.products_url(&[id], &[]);
        self.get_json(url, format!("product {id}")).await
    }

    async fn get_all_products(&self) -> Result<Vec<RawProduct>, ClientError> {
        let url = self.products_url(&[], &[]);
        self.get_json(url, "product list".to_owned()).await
    }

    async fn search_products(&self, query: &str) -> Result<Vec<RawProduct>, ClientError> {
        let url = self.products_url(&["search"], &[("q", query)]);
        self.get_json(url, format!("search(q={query})")).await
    }

    async fn search_products_page(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<RawProduct>, ClientError> {
        let (page_param, size_param) = (page.to_string(), size.to_string());
        let url = self.products_url(
            &["search"],
            &[("q", query), ("page", &page_param), ("size", &size_param)],
        );
        self.get_json(url, format!("search(q={query}, page={page}, size={size})"))
            .await
    }

    async fn get_mock_product(&self, id: &str) -> Result<RawProduct, ClientError> {
        let url = self.products_url(&["mock", id], &[]);
        self.get_json(url, format!("mock product {id}")).await
    }

    async fn get_products_by_type(
        &self,
        product_type: &str,
    ) -> Result<Vec<RelatedProduct>, ClientError> {
        let url = self.products_url(&["type", product_type], &[]);
        self.get_json(url, format!("products of type {product_type}"))
            .await
    }

    async fn get_products_by_type_page(
        &self,
        product_type: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<RelatedProduct>, ClientError> {
        let (page_param, size_param) = (page.to_string(), size.to_string());
        let url = self.products_url(
            &["type", product_type],
            &[("page", &page_param), ("size", &size_param)],
        );
        self.get_json(
            url,
            format!("products of type {product_type} (page={page}, size={size})"),
        )
        .await
    }
}
