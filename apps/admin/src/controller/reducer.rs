//! Application state and the intent/event transitions applied to it.
//!
//! Transitions never perform IO. They return [`Effect`]s that the app shell executes:
//! backend commands go to the worker, exports are written to disk.

use client_core::{export_csv, export_file_name, CollectionStore, ViewParameters, ViewState};
use shared::{
    domain::{Product, ProductId, SortField},
    error::{Operation, OperationFailed},
    protocol::ProductPayload,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{Intent, UiEvent};
use crate::ui::forms::{Alert, FormField, FormKind, FormState, ProductForm};

const UPDATE_SUCCESS: &str = "Updated successfully";
const CREATE_SUCCESS: &str = "Created successfully";
const REQUEST_IN_FLIGHT: &str = "A request for this form is already in progress";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Dispatch(BackendCommand),
    WriteExport { file_name: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(OperationFailed),
}

#[derive(Debug, Clone)]
pub struct AdminState {
    store: CollectionStore,
    view: ViewState,
    pub load: LoadStatus,
    /// Looked up in the store on demand; never an owned copy.
    pub selected: Option<ProductId>,
    pub detail: FormState,
    pub create: FormState,
    pub notice: Option<String>,
}

impl AdminState {
    pub fn new(params: ViewParameters) -> Self {
        let mut store = CollectionStore::new(params);
        let view = store.recompute();
        Self {
            store,
            view,
            load: LoadStatus::Loading,
            selected: None,
            detail: FormState::default(),
            create: FormState::default(),
            notice: None,
        }
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn params(&self) -> &ViewParameters {
        self.store.params()
    }

    pub fn page_items(&self) -> &[Product] {
        self.view.page_slice(self.store.params().page_size)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|id| self.store.find(id))
    }

    pub fn form(&self, kind: FormKind) -> &FormState {
        match kind {
            FormKind::Detail => &self.detail,
            FormKind::Create => &self.create,
        }
    }

    fn form_mut(&mut self, kind: FormKind) -> &mut FormState {
        match kind {
            FormKind::Detail => &mut self.detail,
            FormKind::Create => &mut self.create,
        }
    }

    fn refresh(&mut self) {
        self.view = self.store.recompute();
    }

    pub fn start(&mut self) -> Vec<Effect> {
        self.load = LoadStatus::Loading;
        vec![Effect::Dispatch(BackendCommand::ListProducts)]
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Vec<Effect> {
        self.notice = None;
        match intent {
            Intent::SetSearch(search) => self.set_search(search),
            Intent::SetPageSize(page_size) => self.set_page_size(page_size),
            Intent::SetPage(page) => self.set_page(page),
            Intent::ToggleSort(field) => self.toggle_sort(field),
            Intent::SelectRow(id) => self.select_row(id),
            Intent::OpenCreate => self.open_create(),
            Intent::EditField { form, field, value } => self.edit_field(form, field, value),
            Intent::CloseForms => self.close_forms(),
            Intent::RequestExport => self.request_export(),
            Intent::RequestUpdate => self.request_update(),
            Intent::RequestCreate => self.request_create(),
        }
    }

    fn set_search(&mut self, search: String) -> Vec<Effect> {
        self.store.set_search(search);
        self.refresh();
        Vec::new()
    }

    fn set_page_size(&mut self, page_size: usize) -> Vec<Effect> {
        if page_size == 0 {
            self.notice = Some("Page size must be positive".to_string());
            return Vec::new();
        }
        self.store.set_page_size(page_size);
        self.refresh();
        Vec::new()
    }

    fn set_page(&mut self, page: usize) -> Vec<Effect> {
        self.store.set_page(page);
        self.refresh();
        Vec::new()
    }

    fn toggle_sort(&mut self, field: SortField) -> Vec<Effect> {
        self.store.toggle_sort(field);
        self.refresh();
        Vec::new()
    }

    fn select_row(&mut self, id: ProductId) -> Vec<Effect> {
        let Some(product) = self.page_items().iter().find(|product| product.id == id) else {
            self.notice = Some(format!("Product {id} is not on the current page"));
            return Vec::new();
        };
        let fields = ProductForm::from_product(product);
        self.selected = Some(id);
        self.detail.open = true;
        self.detail.fields = fields;
        self.detail.alert = None;
        Vec::new()
    }

    fn open_create(&mut self) -> Vec<Effect> {
        self.create.open = true;
        self.create.fields = ProductForm::default();
        self.create.alert = None;
        Vec::new()
    }

    fn edit_field(&mut self, kind: FormKind, field: FormField, value: String) -> Vec<Effect> {
        if !self.form(kind).open {
            self.notice = Some(format!("The {} form is not open", kind.label()));
            return Vec::new();
        }
        self.form_mut(kind).fields.set(field, value);
        Vec::new()
    }

    fn close_forms(&mut self) -> Vec<Effect> {
        self.detail.open = false;
        self.create.open = false;
        self.selected = None;
        Vec::new()
    }

    fn request_export(&mut self) -> Vec<Effect> {
        match export_csv(self.page_items()) {
            Ok(bytes) => vec![Effect::WriteExport {
                file_name: export_file_name(self.view.current_page),
                bytes,
            }],
            Err(err) => {
                tracing::warn!("csv export failed: {err}");
                self.notice = Some(format!("Export failed: {err}"));
                Vec::new()
            }
        }
    }

    fn request_update(&mut self) -> Vec<Effect> {
        let Some(id) = self.selected.filter(|_| self.detail.open) else {
            self.notice = Some("Open a product before updating it".to_string());
            return Vec::new();
        };
        match submission(&mut self.detail) {
            Some(payload) => vec![Effect::Dispatch(BackendCommand::UpdateProduct { id, payload })],
            None => Vec::new(),
        }
    }

    fn request_create(&mut self) -> Vec<Effect> {
        if !self.create.open {
            self.notice = Some("Open the create form first".to_string());
            return Vec::new();
        }
        match submission(&mut self.create) {
            Some(payload) => vec![Effect::Dispatch(BackendCommand::CreateProduct { payload })],
            None => Vec::new(),
        }
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ProductsLoaded(products) => {
                self.store.replace_all(products);
                self.load = LoadStatus::Ready;
                self.refresh();
            }
            UiEvent::ProductUpdated(updated) => {
                self.detail.in_flight = false;
                let id = updated.id;
                if !self.store.merge_updated(updated) {
                    tracing::warn!(product_id = %id, "updated product is not in the store");
                }
                self.refresh();
                self.detail.alert = Some(Alert::success(UPDATE_SUCCESS));
            }
            UiEvent::ProductCreated(created) => {
                self.create.in_flight = false;
                self.store.prepend_created(created);
                self.refresh();
                self.create.fields = ProductForm::default();
                self.create.alert = Some(Alert::success(CREATE_SUCCESS));
            }
            UiEvent::Failed(failure) => self.apply_failure(failure),
        }
    }

    fn apply_failure(&mut self, failure: OperationFailed) {
        match failure.operation {
            Operation::Load => self.load = LoadStatus::Failed(failure),
            Operation::Update => {
                self.detail.in_flight = false;
                self.detail.alert = Some(Alert::failure(failure.message));
            }
            Operation::Create => {
                self.create.in_flight = false;
                self.create.alert = Some(Alert::failure(failure.message));
            }
            Operation::Export => self.notice = Some(failure.message),
        }
    }
}

/// Marks the form in flight and returns its payload, or records why it cannot be sent.
fn submission(form: &mut FormState) -> Option<ProductPayload> {
    if form.in_flight {
        form.alert = Some(Alert::failure(REQUEST_IN_FLIGHT));
        return None;
    }
    match form.fields.to_payload() {
        Ok(payload) => {
            form.in_flight = true;
            Some(payload)
        }
        Err(reason) => {
            form.alert = Some(Alert::failure(reason));
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
