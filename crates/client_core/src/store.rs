//! Collection store: the fetched product list plus the current view parameters.

use shared::domain::{Product, ProductId, SortField};

use crate::view::{compute_view, ViewParameters, ViewState};

#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    products: Vec<Product>,
    params: ViewParameters,
}

impl CollectionStore {
    pub fn new(params: ViewParameters) -> Self {
        Self {
            products: Vec::new(),
            params,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn params(&self) -> &ViewParameters {
        &self.params
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Replaces the product with the same id in place. Returns false when no product matched.
    pub fn merge_updated(&mut self, updated: Product) -> bool {
        match self.products.iter_mut().find(|product| product.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn prepend_created(&mut self, created: Product) {
        self.products.insert(0, created);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.params.search = search.into();
        self.params.page = 1;
    }

    /// Keeps the current page; the next [`Self::recompute`] clamps it if it fell out of range.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.params.page_size = page_size.max(1);
    }

    pub fn set_page(&mut self, page: usize) {
        self.params.page = page.max(1);
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.params.toggle_sort(field);
    }

    /// Runs the view pipeline and writes the clamped page back into the parameters.
    pub fn recompute(&mut self) -> ViewState {
        let view = compute_view(&self.products, &self.params);
        self.params.page = view.current_page;
        view
    }
}
