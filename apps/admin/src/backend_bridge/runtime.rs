//! Backend worker: owns the async runtime and the catalog client, answers one event per command.
//!
//! Every command runs as its own task, so a request that never completes holds up nothing but
//! the form that sent it.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::CatalogApi;
use crossbeam_channel::{Receiver, Sender};
use shared::error::{Operation, OperationFailed};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch<A>(api: A, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) -> JoinHandle<()>
where
    A: CatalogApi + 'static,
{
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::Failed(OperationFailed::new(
                    Operation::Load,
                    format!("Backend worker failed to start: {err}"),
                )));
                return;
            }
        };

        let api = Arc::new(api);
        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend command received");
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = execute(api.as_ref(), cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui receiver dropped; discarding backend event");
                    }
                });
            }
            tracing::debug!("backend worker stopped");
        });
    })
}

/// Runs one command against the catalog and maps the outcome to the event the controller expects.
pub async fn execute<A>(api: &A, cmd: BackendCommand) -> UiEvent
where
    A: CatalogApi + ?Sized,
{
    let operation = cmd.operation();
    let outcome = match cmd {
        BackendCommand::ListProducts => api.list_products().await.map(UiEvent::ProductsLoaded),
        BackendCommand::UpdateProduct { id, payload } => api
            .update_product(id, &payload)
            .await
            .map(UiEvent::ProductUpdated),
        BackendCommand::CreateProduct { payload } => api
            .create_product(&payload)
            .await
            .map(UiEvent::ProductCreated),
    };

    outcome.unwrap_or_else(|err| {
        match err.status() {
            Some(status) => {
                tracing::warn!(?operation, status = status.as_u16(), "catalog rejected request")
            }
            None => tracing::warn!(?operation, "catalog operation failed: {err}"),
        }
        let prefix = match operation {
            Operation::Load => "Could not load products",
            Operation::Update => "Update failed",
            Operation::Create => "Create failed",
            Operation::Export => "Export failed",
        };
        UiEvent::Failed(OperationFailed::new(operation, format!("{prefix}: {err}")))
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
