mod common;

use common::ScriptedTransport;
use serde_json::json;
use wimc_core::{
    Characters, Comic, EntityRepository, HttpMethod, HttpResponse, RepoError, RequestOptions,
    RestEntityRepository, Series,
};

#[tokio::test]
async fn create_posts_to_collection_and_returns_assigned_id() {
    let transport = ScriptedTransport::new();
    transport.push_json(201, json!({"id": 7, "name": "Saga"}));
    let repo = RestEntityRepository::<Series>::new(transport.clone());

    let created = repo
        .create(&Series {
            name: Some("Saga".to_string()),
            ..Series::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(7));
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, "api/series");
    assert_eq!(requests[0].body, Some(json!({"name": "Saga"})));
}

#[tokio::test]
async fn update_puts_to_item_path() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({"id": 3, "title": "Issue #3"}));
    let repo = RestEntityRepository::<Comic>::new(transport.clone());

    let updated = repo.update(&Comic::with_id(3, "Issue #3")).await.unwrap();

    assert_eq!(updated.title.as_deref(), Some("Issue #3"));
    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.path, "api/comics/3");
}

#[tokio::test]
async fn partial_update_sends_only_supplied_fields() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({"id": 4, "fullName": "Storm", "description": "x"}));
    let repo = RestEntityRepository::<Characters>::new(transport.clone());

    let patch = Characters {
        id: Some(4),
        full_name: Some("Storm".to_string()),
        ..Characters::default()
    };
    repo.partial_update(&patch).await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Patch);
    assert_eq!(request.path, "api/characters/4");
    assert_eq!(request.body, Some(json!({"id": 4, "fullName": "Storm"})));
}

#[tokio::test]
async fn update_without_id_fails_before_any_request() {
    let transport = ScriptedTransport::new();
    let repo = RestEntityRepository::<Series>::new(transport.clone());

    let err = repo.update(&Series::default()).await.unwrap_err();

    assert!(matches!(err, RepoError::MissingIdentifier { entity: "series" }));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn invalid_attachment_pair_blocks_writes() {
    let transport = ScriptedTransport::new();
    let repo = RestEntityRepository::<Comic>::new(transport.clone());

    let comic = Comic {
        thumbnail: Some("aGVsbG8=".to_string()),
        ..Comic::default()
    };
    let err = repo.create(&comic).await.unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn find_returns_entity_when_present() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, json!({"id": 123, "name": "Hellboy"}));
    let repo = RestEntityRepository::<Series>::new(transport.clone());

    let found = repo.find(123).await.unwrap();

    assert_eq!(found, Some(Series::with_id(123, "Hellboy")));
    assert_eq!(transport.requests()[0].path, "api/series/123");
}

#[tokio::test]
async fn find_maps_not_found_and_null_body_to_none() {
    let transport = ScriptedTransport::new();
    transport.push_status(404);
    transport.push(HttpResponse::new(200, "null"));
    let repo = RestEntityRepository::<Series>::new(transport.clone());

    assert_eq!(repo.find(1).await.unwrap(), None);
    assert_eq!(repo.find(2).await.unwrap(), None);
}

#[tokio::test]
async fn server_errors_surface_status_and_title() {
    let transport = ScriptedTransport::new();
    transport.push_json(400, json!({"title": "Bad Request", "message": "error.validation"}));
    let repo = RestEntityRepository::<Series>::new(transport.clone());

    let err = repo.find(9).await.unwrap_err();

    match err {
        RepoError::Status {
            entity,
            status,
            message,
        } => {
            assert_eq!(entity, "series");
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("Bad Request"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn transport_failures_propagate() {
    let transport = ScriptedTransport::new();
    transport.push_unreachable();
    let repo = RestEntityRepository::<Comic>::new(transport.clone());

    let err = repo.delete(5).await.unwrap_err();
    assert!(matches!(err, RepoError::Transport(_)));
}

#[tokio::test]
async fn query_page_encodes_options_and_reads_total_count() {
    let transport = ScriptedTransport::new();
    transport.push(
        HttpResponse::new(200, json!([{"id": 1}, {"id": 2}]).to_string())
            .with_header("X-Total-Count", "12"),
    );
    let repo = RestEntityRepository::<Comic>::new(transport.clone());

    let options = RequestOptions::comics_by_series(8)
        .page(1)
        .size(2)
        .sort("title,asc");
    let page = repo.query_page(&options).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, Some(12));
    let request = &transport.requests()[0];
    assert_eq!(request.path, "api/comics");
    assert!(request
        .query
        .contains(&("seriesId.equals".to_string(), "8".to_string())));
    assert!(request
        .query
        .contains(&("sort".to_string(), "title,asc".to_string())));
}

#[tokio::test]
async fn query_rejects_malformed_sort_without_request() {
    let transport = ScriptedTransport::new();
    let repo = RestEntityRepository::<Series>::new(transport.clone());

    let err = repo
        .query(&RequestOptions::new().sort("name;drop"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::InvalidQuery(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn delete_hits_item_path_once() {
    let transport = ScriptedTransport::new();
    transport.push_status(204);
    let repo = RestEntityRepository::<Characters>::new(transport.clone());

    repo.delete(11).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].path, "api/characters/11");
}
