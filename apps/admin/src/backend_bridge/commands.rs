//! Backend commands queued from the controller to the backend worker.

use shared::{domain::ProductId, error::Operation, protocol::ProductPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    ListProducts,
    UpdateProduct {
        id: ProductId,
        payload: ProductPayload,
    },
    CreateProduct {
        payload: ProductPayload,
    },
}

impl BackendCommand {
    pub fn operation(&self) -> Operation {
        match self {
            Self::ListProducts => Operation::Load,
            Self::UpdateProduct { .. } => Operation::Update,
            Self::CreateProduct { .. } => Operation::Create,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ListProducts => "list_products",
            Self::UpdateProduct { .. } => "update_product",
            Self::CreateProduct { .. } => "create_product",
        }
    }
}
