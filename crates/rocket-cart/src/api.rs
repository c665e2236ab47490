//! # Storefront API Client
//!
//! HTTP implementation of [`StockQuery`] and [`CatalogQuery`].
//!
//! ## Endpoints
//! ```text
//! GET {base_url}/stock/{id}     → {"id": 1, "amount": 3}
//! GET {base_url}/products/{id}  → {"id": 1, "title": "…", "price": 179.9, "image": "…"}
//! ```
//!
//! ## Error Mapping
//! ```text
//! connect error / timeout   → LookupError::Unreachable
//! 404                       → LookupError::NotFound
//! other non-2xx             → LookupError::UnexpectedStatus
//! body not the expected JSON→ LookupError::InvalidResponse
//! record for another id     → LookupError::InvalidResponse
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use rocket_core::{LookupError, ProductDetails, ProductId, StockInfo};

use crate::config::ApiSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::ports::{CatalogQuery, StockQuery};

/// Resource segment for stock records.
const STOCK_RESOURCE: &str = "stock";

/// Resource segment for catalog records.
const PRODUCTS_RESOURCE: &str = "products";

/// HTTP client for the storefront's stock and catalog endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Builds a client from validated settings.
    pub fn new(settings: &ApiSettings) -> ConfigResult<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(ApiClient {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The base URL requests are built from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        product_id: ProductId,
    ) -> Result<T, LookupError> {
        let url = format!("{}/{}/{}", self.base_url, resource, product_id);

        let response = self.http.get(&url).send().await.map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::not_found(resource, product_id));
        }
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(e)
            } else {
                LookupError::InvalidResponse(format!("{}: {}", url, e))
            }
        })
    }
}

fn transport_error(err: reqwest::Error) -> LookupError {
    LookupError::Unreachable(err.to_string())
}

#[async_trait]
impl StockQuery for ApiClient {
    #[instrument(skip(self))]
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, LookupError> {
        let stock: StockInfo = self.get_json(STOCK_RESOURCE, product_id).await?;

        if stock.id != product_id {
            return Err(LookupError::InvalidResponse(format!(
                "stock record for {} returned for product {}",
                stock.id, product_id
            )));
        }

        debug!(available = stock.amount, "Fetched stock");
        Ok(stock)
    }
}

#[async_trait]
impl CatalogQuery for ApiClient {
    #[instrument(skip(self))]
    async fn get_product(&self, product_id: ProductId) -> Result<ProductDetails, LookupError> {
        let fields: Map<String, Value> = self.get_json(PRODUCTS_RESOURCE, product_id).await?;

        if let Some(id) = fields.get("id").and_then(Value::as_u64) {
            if id != product_id.get() {
                return Err(LookupError::InvalidResponse(format!(
                    "product record for {} returned for product {}",
                    id, product_id
                )));
            }
        }

        let details = ProductDetails::from_map(fields);
        debug!(title = details.title().unwrap_or_default(), "Fetched product");
        Ok(details)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
