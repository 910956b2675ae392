//! In-memory catalog used to drive the backend worker in tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client_core::{CatalogApi, CatalogError};
use reqwest::StatusCode;
use shared::{
    domain::{Category, Product, ProductId},
    protocol::ProductPayload,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Update(ProductId, ProductPayload),
    Create(ProductPayload),
}

#[derive(Default)]
pub struct FakeCatalog {
    pub products: Vec<Product>,
    pub list_status: Option<StatusCode>,
    pub update_status: Option<StatusCode>,
    pub create_status: Option<StatusCode>,
    pub next_id: i64,
    /// Updates never complete, like a request the server never answers.
    pub hang_updates: bool,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeCatalog {
    pub fn with_products(count: i64) -> Self {
        Self {
            products: (1..=count)
                .map(|id| Product {
                    id: ProductId(id),
                    title: format!("Product {id}"),
                    price: id as f64,
                    description: format!("Description {id}"),
                    category: None,
                    images: Vec::new(),
                })
                .collect(),
            next_id: count + 1,
            ..Self::default()
        }
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn from_payload(id: ProductId, payload: &ProductPayload) -> Product {
    Product {
        id,
        title: payload.title.clone(),
        price: payload.price,
        description: payload.description.clone(),
        category: Some(Category {
            id: payload.category_id,
            name: format!("Category {}", payload.category_id),
        }),
        images: payload.images.clone(),
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.record(Call::List);
        match self.list_status {
            Some(status) => Err(CatalogError::Status { status }),
            None => Ok(self.products.clone()),
        }
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError> {
        self.record(Call::Update(id, payload.clone()));
        if self.hang_updates {
            std::future::pending::<()>().await;
        }
        match self.update_status {
            Some(status) => Err(CatalogError::Status { status }),
            None => Ok(from_payload(id, payload)),
        }
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, CatalogError> {
        self.record(Call::Create(payload.clone()));
        match self.create_status {
            Some(status) => Err(CatalogError::Status { status }),
            None => Ok(from_payload(ProductId(self.next_id), payload)),
        }
    }
}
