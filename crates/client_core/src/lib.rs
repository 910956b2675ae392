use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{Product, ProductId},
    protocol::ProductPayload,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub mod export;
pub mod store;
pub mod view;

pub use export::{export_csv, export_file_name, ExportError};
pub use store::CollectionStore;
pub use view::{
    compute_view, pagination_controls, PageControl, PageControlKind, ViewParameters, ViewState,
};

pub const DEFAULT_API_URL: &str = "https://api.escuelajs.co/api/v1/products";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("catalog request failed with HTTP {status}")]
    Status { status: StatusCode },
    #[error("catalog request failed: {0}")]
    Transport(reqwest::Error),
    #[error("catalog response could not be decoded: {0}")]
    Decode(reqwest::Error),
}

impl CatalogError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Boundary to the remote catalog. Any non-success status is a failure; its body is never read.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;
    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError>;
    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, CatalogError>;
}

pub struct CatalogClient {
    http: Client,
    collection_url: Url,
}

impl CatalogClient {
    pub fn new(collection_url: &str) -> Result<Self, CatalogError> {
        let parsed = Url::parse(collection_url.trim()).map_err(|err| {
            CatalogError::InvalidEndpoint {
                url: collection_url.to_string(),
                reason: err.to_string(),
            }
        })?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidEndpoint {
                url: collection_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            collection_url: parsed,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    pub fn item_url(&self, id: ProductId) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    async fn decode_product(response: reqwest::Response) -> Result<Product, CatalogError> {
        let response = ensure_success(response)?;
        response.json().await.map_err(CatalogError::Decode)
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(%status, url = %response.url(), "catalog request rejected");
        Err(CatalogError::Status { status })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        debug!(url = %self.collection_url, "listing products");
        let response = self
            .http
            .get(self.collection_url.clone())
            .send()
            .await
            .map_err(CatalogError::Transport)?;
        let products: Vec<Product> = ensure_success(response)?
            .json()
            .await
            .map_err(CatalogError::Decode)?;
        info!(count = products.len(), "products loaded");
        Ok(products)
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(payload)
            .send()
            .await
            .map_err(CatalogError::Transport)?;
        let updated = Self::decode_product(response).await?;
        info!(product_id = %updated.id, "product updated");
        Ok(updated)
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, CatalogError> {
        let response = self
            .http
            .post(self.collection_url.clone())
            .json(payload)
            .send()
            .await
            .map_err(CatalogError::Transport)?;
        let created = Self::decode_product(response).await?;
        info!(product_id = %created.id, "product created");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
