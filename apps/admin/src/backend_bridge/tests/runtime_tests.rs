use super::*;
use std::time::Duration;

use crossbeam_channel::bounded;
use reqwest::StatusCode;
use shared::{
    domain::{CategoryId, ProductId},
    protocol::ProductPayload,
};

use crate::test_support::{Call, FakeCatalog};

fn payload() -> ProductPayload {
    ProductPayload {
        title: "Chair".to_string(),
        price: 49.0,
        description: "Oak".to_string(),
        category_id: CategoryId(3),
        images: Vec::new(),
    }
}

#[tokio::test]
async fn list_success_becomes_products_loaded() {
    let api = FakeCatalog::with_products(3);
    match execute(&api, BackendCommand::ListProducts).await {
        UiEvent::ProductsLoaded(products) => assert_eq!(products.len(), 3),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn rejected_update_becomes_update_failure() {
    let api = FakeCatalog {
        update_status: Some(StatusCode::BAD_REQUEST),
        ..FakeCatalog::with_products(7)
    };

    let event = execute(
        &api,
        BackendCommand::UpdateProduct {
            id: ProductId(7),
            payload: payload(),
        },
    )
    .await;

    match event {
        UiEvent::Failed(failure) => {
            assert_eq!(failure.operation, Operation::Update);
            assert!(failure.message().starts_with("Update failed"));
            assert!(failure.message().contains("400"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn rejected_list_becomes_load_failure() {
    let api = FakeCatalog {
        list_status: Some(StatusCode::SERVICE_UNAVAILABLE),
        ..FakeCatalog::default()
    };

    match execute(&api, BackendCommand::ListProducts).await {
        UiEvent::Failed(failure) => {
            assert_eq!(failure.operation, Operation::Load);
            assert!(failure.message().starts_with("Could not load products"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn worker_answers_every_command_and_stops_when_queue_closes() {
    let api = FakeCatalog::with_products(2);
    let calls = api.calls.clone();
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    let worker = launch(api, cmd_rx, ui_tx);

    cmd_tx.send(BackendCommand::ListProducts).expect("send list");
    cmd_tx
        .send(BackendCommand::CreateProduct { payload: payload() })
        .expect("send create");

    let mut loaded = false;
    let mut created = None;
    for _ in 0..2 {
        match ui_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(UiEvent::ProductsLoaded(products)) => loaded = products.len() == 2,
            Ok(UiEvent::ProductCreated(product)) => created = Some(product.id),
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert!(loaded);
    assert_eq!(created, Some(ProductId(3)));

    drop(cmd_tx);
    worker.join().expect("worker thread");

    let calls = calls.lock().expect("calls");
    assert_eq!(calls.len(), 2);
    assert!(calls.contains(&Call::List));
    assert!(calls.contains(&Call::Create(payload())));
}

#[test]
fn hung_update_does_not_hold_back_later_commands() {
    let api = FakeCatalog {
        hang_updates: true,
        ..FakeCatalog::with_products(3)
    };
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    let worker = launch(api, cmd_rx, ui_tx);

    cmd_tx
        .send(BackendCommand::UpdateProduct {
            id: ProductId(1),
            payload: payload(),
        })
        .expect("send update");
    cmd_tx
        .send(BackendCommand::CreateProduct { payload: payload() })
        .expect("send create");

    match ui_rx.recv_timeout(Duration::from_secs(5)) {
        Ok(UiEvent::ProductCreated(product)) => assert_eq!(product.id, ProductId(4)),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(ui_rx.try_recv().is_err());

    drop(cmd_tx);
    worker.join().expect("worker thread");
}
