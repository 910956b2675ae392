//! Intents coming from the presentation surface and events coming back from the backend worker.

use shared::{
    domain::{Product, ProductId, SortField},
    error::OperationFailed,
};

use crate::ui::forms::{FormField, FormKind};

/// Discrete user actions; each maps to exactly one state transition in the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetSearch(String),
    SetPageSize(usize),
    SetPage(usize),
    ToggleSort(SortField),
    SelectRow(ProductId),
    OpenCreate,
    EditField {
        form: FormKind,
        field: FormField,
        value: String,
    },
    CloseForms,
    RequestExport,
    RequestUpdate,
    RequestCreate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ProductsLoaded(Vec<Product>),
    ProductUpdated(Product),
    ProductCreated(Product),
    Failed(OperationFailed),
}
