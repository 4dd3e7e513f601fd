//! Integration tests for vrtfeed

use serde_json::json;
use vrtfeed::{Station, VrtFeedClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a mock feed item
fn item(code: &str, artist: &str, title: &str) -> serde_json::Value {
    json!({
        "code": code,
        "properties": [
            {"key": "ARTISTNAME", "value": artist},
            {"key": "TITLE", "value": title}
        ]
    })
}

fn page(items: Vec<serde_json::Value>, next: Option<String>) -> serde_json::Value {
    match next {
        Some(href) => json!({"playlistItems": items, "next": {"href": href}}),
        None => json!({"playlistItems": items}),
    }
}

async fn test_client(mock_server: &MockServer) -> VrtFeedClient {
    VrtFeedClient::builder()
        .base_url(format!("{}/playlist/items", mock_server.uri()))
        .station(Station::StuBru)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_latest_normalizes_to_broadcast_order() {
    let mock_server = MockServer::start().await;

    // Feed answers newest-first; the sort direction is requested explicitly
    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .and(query_param("type", "song"))
        .and(query_param("channel_code", "41"))
        .and(query_param("page_size", "20"))
        .and(query_param("ascending", "false"))
        .and(header(
            "accept",
            "application/vnd.playlist.vrt.be.playlist_items_1.0+json",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![
                item("300", "Charlotte", "Three"),
                item("200", "Bert", "Two"),
                item("100", "An", "One"),
            ],
            None,
        )))
        .mount(&mock_server)
        .await;

    let mut client = test_client(&mock_server).await;
    let mut batch = client.fetch_latest().await.unwrap();

    assert_eq!(batch.len(), 3);
    assert_eq!(batch.pop_front().unwrap().song.artist(), "An");
    assert_eq!(batch.pop_front().unwrap().song.artist(), "Bert");
    assert_eq!(batch.pop_front().unwrap().song.artist(), "Charlotte");
}

#[tokio::test]
async fn test_fetch_older_pages_back_from_cursor() {
    let mock_server = MockServer::start().await;

    // Backfill page, requested descending with the oldest code seen so far
    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .and(query_param("ascending", "false"))
        .and(query_param("begin", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![item("90", "Dirk", "Ninety"), item("80", "Els", "Eighty")],
            None,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![item("200", "Bert", "Two"), item("100", "An", "One")],
            None,
        )))
        .mount(&mock_server)
        .await;

    let mut client = test_client(&mock_server).await;
    client.fetch_latest().await.unwrap();

    let mut older = client.fetch_older().await.unwrap();
    assert_eq!(older.len(), 2);
    assert_eq!(older.pop_front().unwrap().song.artist(), "Els");
    assert_eq!(older.pop_front().unwrap().song.artist(), "Dirk");
}

#[tokio::test]
async fn test_fetch_older_without_state_fetches_latest() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![item("100", "An", "One")],
            None,
        )))
        .mount(&mock_server)
        .await;

    let mut client = test_client(&mock_server).await;
    let batch = client.fetch_older().await.unwrap();
    assert_eq!(batch.len(), 1);
}

#[tokio::test]
async fn test_fetch_since_follows_continuation() {
    let mock_server = MockServer::start().await;

    let page2_href = format!(
        "{}/playlist/items?type=song&channel_code=41&page=2",
        mock_server.uri()
    );

    // Replay continuation page
    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![item("300", "Charlotte", "Three")],
            None,
        )))
        .mount(&mock_server)
        .await;

    // Initial ascending query from the start timestamp
    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .and(query_param("ascending", "true"))
        .and(query_param("from", "2016-03-01T20:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![item("100", "An", "One"), item("200", "Bert", "Two")],
            Some(page2_href),
        )))
        .mount(&mock_server)
        .await;

    let mut client = test_client(&mock_server).await;

    let mut first = client.fetch_since("2016-03-01T20:00:00Z").await.unwrap();
    assert_eq!(first.pop_front().unwrap().song.artist(), "An");
    assert_eq!(first.pop_front().unwrap().song.artist(), "Bert");

    let mut second = client.fetch_older().await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second.pop_front().unwrap().song.artist(), "Charlotte");

    // Feed exhausted: replay yields an empty batch, no further requests
    let exhausted = client.fetch_older().await.unwrap();
    assert!(exhausted.is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut client = test_client(&mock_server).await;
    let err = client.fetch_latest().await.unwrap_err();
    assert!(matches!(err, vrtfeed::Error::Api(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_items_without_metadata_are_skipped() {
    let mock_server = MockServer::start().await;

    let bare_item = json!({
        "code": "400",
        "properties": [{"key": "TITLE", "value": "No Artist"}]
    });

    Mock::given(method("GET"))
        .and(path("/playlist/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![bare_item, item("100", "An", "One")],
            None,
        )))
        .mount(&mock_server)
        .await;

    let mut client = test_client(&mock_server).await;
    let batch = client.fetch_latest().await.unwrap();
    assert_eq!(batch.len(), 1);
}
