mod common;

use common::ScriptedTransport;
use serde_json::json;
use std::sync::Arc;
use wimc_core::{
    Comic, DeleteError, EntityListView, HttpMethod, ModalOutcome, RepoError,
    RestEntityRepository, ViewScope,
};

fn comic_list(transport: &Arc<ScriptedTransport>) -> EntityListView<Comic> {
    EntityListView::new(Arc::new(RestEntityRepository::<Comic>::new(
        transport.clone(),
    )))
}

#[tokio::test]
async fn cancel_never_calls_delete() {
    let transport = ScriptedTransport::new();
    let list = comic_list(&transport);

    let (mut dialog, closed) = list.open_delete(&Comic::with_id(3, "Issue #3"));
    dialog.cancel();

    assert!(!dialog.is_open());
    assert_eq!(closed.outcome().await, ModalOutcome::Dismissed);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn confirm_deletes_once_and_list_reloads() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!([{"id": 3}, {"id": 4}]));
    transport.push_status(204);
    transport.push_json(200, json!([{"id": 4}]));
    let mut list = comic_list(&transport);
    let scope = ViewScope::new("comic");

    list.load_all(&scope).await.unwrap();
    assert_eq!(list.items().len(), 2);

    let (mut dialog, closed) = list.open_delete(&list.items()[0]);
    dialog.confirm_delete(3, &scope).await.unwrap();
    assert!(!dialog.is_open());

    let outcome = closed.outcome().await;
    assert!(outcome.is_deleted());
    assert!(list.on_modal_closed(&outcome, &scope).await.unwrap());

    let remaining = list
        .items()
        .iter()
        .map(|comic| comic.id)
        .collect::<Vec<_>>();
    assert_eq!(remaining, vec![Some(4)]);
    let deletes = transport
        .requests()
        .into_iter()
        .filter(|request| request.method == HttpMethod::Delete)
        .collect::<Vec<_>>();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].path, "api/comics/3");
}

#[tokio::test]
async fn failed_delete_keeps_modal_open() {
    let transport = ScriptedTransport::new();
    transport.push_json(500, json!({"title": "Internal Server Error"}));
    let list = comic_list(&transport);
    let scope = ViewScope::new("comic");

    let (mut dialog, _closed) = list.open_delete(&Comic::with_id(3, "Issue #3"));
    let err = dialog.confirm_delete(3, &scope).await.unwrap_err();

    assert!(matches!(
        err,
        DeleteError::Repo(RepoError::Status { status: 500, .. })
    ));
    assert!(dialog.is_open());
}

#[tokio::test]
async fn confirm_after_cancel_is_rejected_without_request() {
    let transport = ScriptedTransport::new();
    transport.push_status(204);
    let list = comic_list(&transport);
    let scope = ViewScope::new("comic");

    let (mut dialog, closed) = list.open_delete(&Comic::with_id(3, "Issue #3"));
    dialog.cancel();
    let err = dialog.confirm_delete(3, &scope).await.unwrap_err();

    assert!(matches!(err, DeleteError::AlreadyClosed));
    assert_eq!(transport.request_count(), 0);
    assert_eq!(closed.outcome().await, ModalOutcome::Dismissed);
}

#[tokio::test]
async fn second_confirm_does_not_delete_again() {
    let transport = ScriptedTransport::new();
    transport.push_status(204);
    transport.push_status(204);
    let list = comic_list(&transport);
    let scope = ViewScope::new("comic");

    let (mut dialog, _closed) = list.open_delete(&Comic::with_id(3, "Issue #3"));
    dialog.confirm_delete(3, &scope).await.unwrap();
    let err = dialog.confirm_delete(3, &scope).await.unwrap_err();

    assert!(matches!(err, DeleteError::AlreadyClosed));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn dismissed_or_other_reasons_do_not_reload() {
    let transport = ScriptedTransport::new();
    let mut list = comic_list(&transport);
    let scope = ViewScope::new("comic");

    assert!(!list
        .on_modal_closed(&ModalOutcome::Dismissed, &scope)
        .await
        .unwrap());
    assert!(!list
        .on_modal_closed(&ModalOutcome::Closed("saved".to_string()), &scope)
        .await
        .unwrap());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn dropped_dialog_counts_as_dismissed() {
    let transport = ScriptedTransport::new();
    let list = comic_list(&transport);

    let (dialog, closed) = list.open_delete(&Comic::with_id(1, "Issue #1"));
    drop(dialog);

    assert_eq!(closed.outcome().await, ModalOutcome::Dismissed);
}

#[tokio::test]
async fn failed_load_keeps_previous_items() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!([{"id": 1}]));
    transport.push_unreachable();
    let mut list = comic_list(&transport);
    let scope = ViewScope::new("comic");

    list.load_all(&scope).await.unwrap();
    assert!(list.load_all(&scope).await.is_err());

    assert!(!list.is_loading());
    assert_eq!(list.items().len(), 1);
}
