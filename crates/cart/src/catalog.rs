//! Catalog service client for product and stock lookups.
//!
//! Plain REST over `reqwest`: `GET {base}/stock/{id}` and
//! `GET {base}/products/{id}`, both returning JSON. Product records are
//! cached with `moka` (5-minute TTL); stock is never cached because it
//! gates cart mutations and must be fresh.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use rocket_shoes_core::ProductId;

use crate::config::CatalogConfig;
use crate::models::{ProductRecord, Stock};

/// Product cache TTL. Stock is intentionally never cached.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);
const PRODUCT_CACHE_CAPACITY: u64 = 1000;

/// Errors that can occur when interacting with the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product not known to the catalog.
    #[error("Not found: product {0}")]
    NotFound(ProductId),
}

/// Read access to the remote catalog.
///
/// The seam the cart store mutates through; tests substitute an in-memory
/// implementation so no HTTP server is needed.
pub trait Catalog: Send + Sync {
    /// Fetch the current stock count for a product.
    fn stock(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Stock, CatalogError>> + Send;

    /// Fetch the catalog record for a product.
    fn product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<ProductRecord, CatalogError>> + Send;
}

/// HTTP client for the catalog service.
///
/// Cheaply cloneable via `Arc`; product reads are cached for 5 minutes.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: String,
    products: Cache<ProductId, ProductRecord>,
}

impl HttpCatalog {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(HttpCatalogInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                products,
            }),
        })
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        product_id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(product_id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

impl Catalog for HttpCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        self.get_json(&format!("stock/{product_id}"), product_id)
            .await
    }

    async fn product(&self, product_id: ProductId) -> Result<ProductRecord, CatalogError> {
        if let Some(record) = self.inner.products.get(&product_id).await {
            debug!(%product_id, "catalog product cache hit");
            return Ok(record);
        }

        let record: ProductRecord = self
            .get_json(&format!("products/{product_id}"), product_id)
            .await?;
        self.inner
            .products
            .insert(product_id, record.clone())
            .await;
        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound(ProductId::new(123));
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = CatalogError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - unavailable");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = CatalogConfig {
            base_url: "http://localhost:3333/".to_string(),
            timeout: Duration::from_secs(10),
        };
        let catalog = HttpCatalog::new(&config).unwrap();
        assert_eq!(catalog.inner.base_url, "http://localhost:3333");
    }
}
