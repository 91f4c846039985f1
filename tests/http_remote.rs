//! Wire-shape tests for the HTTP remote against a mock server.
//!
//! These verify the query-parameter request shapes and response decoding
//! for each endpoint the controller consumes.

use folio::remote::{AddFeedResponse, HttpRemote, RemoteError, RemoteService};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn remote_for(server: &MockServer) -> HttpRemote {
    HttpRemote::new(
        Url::parse(&server.uri()).unwrap(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_mark_read_sends_link_and_feed_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/read"))
        .and(query_param("id", "https://example.com/post/1"))
        .and(query_param("feed_key", "f1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    remote
        .mark_read("f1", "https://example.com/post/1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_feed_decodes_batch_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/updatefeed"))
        .and(query_param("key", "f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "link": "https://example.com/a", "title": "A" },
            { "link": "https://example.com/b", "title": "B" }
        ])))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let batch = remote.refresh_feed("f1").await.unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].link, "https://example.com/a");
    assert_eq!(batch[1].title, "B");
}

#[tokio::test]
async fn test_refresh_folder_decodes_count_map() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/updatefolder"))
        .and(query_param("key", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "f1": 3,
            "f2": 0
        })))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let counts = remote.refresh_folder("root").await.unwrap();

    assert_eq!(counts.get("f1"), Some(&3));
    assert_eq!(counts.get("f2"), Some(&0));
}

#[tokio::test]
async fn test_add_folder_returns_assigned_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/addfolder"))
        .and(query_param("folder_name", "Archive"))
        .and(query_param("folder_key", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "d42" })))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let key = remote.add_folder("Archive", "root").await.unwrap();
    assert_eq!(key, "d42");
}

#[tokio::test]
async fn test_add_feed_decodes_created_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/addfeed"))
        .and(query_param("url", "https://example.com/feed.xml"))
        .and(query_param("folder_key", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "outcome": "created",
            "key": "f7",
            "name": "Example Feed",
            "count": 4
        })))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let url = Url::parse("https://example.com/feed.xml").unwrap();
    let response = remote.add_feed(&url, "root").await.unwrap();

    assert_eq!(
        response,
        AddFeedResponse::Created {
            key: "f7".to_string(),
            name: "Example Feed".to_string(),
            unread: 4
        }
    );
}

#[tokio::test]
async fn test_add_feed_decodes_outcome_variants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/addfeed"))
        .and(query_param("url", "https://example.com/dup.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "outcome": "duplicate" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/addfeed"))
        .and(query_param("url", "https://example.com/none"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "outcome": "not_found" })))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;

    let dup = Url::parse("https://example.com/dup.xml").unwrap();
    assert_eq!(
        remote.add_feed(&dup, "root").await.unwrap(),
        AddFeedResponse::Duplicate
    );

    let none = Url::parse("https://example.com/none").unwrap();
    assert_eq!(
        remote.add_feed(&none, "root").await.unwrap(),
        AddFeedResponse::NotFound
    );
}

#[tokio::test]
async fn test_error_status_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/readfolder"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let err = remote.mark_folder_read("root").await.unwrap_err();
    assert!(matches!(err, RemoteError::HttpStatus(500)));
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/updatefeed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let err = remote.refresh_feed("f1").await.unwrap_err();
    assert!(matches!(err, RemoteError::Decode(_)));
}

#[tokio::test]
async fn test_load_folder_decodes_item_kinds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/folder"))
        .and(query_param("key", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "key": "f1", "name": "News", "unread": 2, "type": "feed" },
            { "key": "d1", "name": "Tech", "type": "folder" }
        ])))
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    let items = remote.load_folder("root").await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].unread, 2);
    assert_eq!(items[1].key, "d1");
    // unread defaults to 0 when the server omits it for folders
    assert_eq!(items[1].unread, 0);
}

#[tokio::test]
async fn test_start_import_hits_importxml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/importxml"))
        .and(query_param("key", "folder-7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server).await;
    remote.start_import("folder-7").await.unwrap();
}
