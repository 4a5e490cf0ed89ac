//! Integration tests for fetching and decoding the sheet feed.

use std::time::Duration;

use activity_feed::config::Config;
use activity_feed::feed::envelope::wrap_envelope;
use activity_feed::feed::{FeedRepository, FetchError, ParseError, TransportError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test configuration pointing at the given feed URL.
fn create_test_config(feed_url: &str) -> Config {
    Config {
        feed_url: feed_url.to_string(),
        fetch_timeout: Duration::from_secs(2),
        ..Config::for_testing()
    }
}

/// Header row, two posts, a blank-topic row, a null row and a third post.
const SAMPLE_TABLE: &str = r#"{
  "version": "0.6",
  "status": "ok",
  "table": {
    "cols": [
      {"id": "A", "label": "Timestamp", "type": "datetime"},
      {"id": "B", "label": "Topic", "type": "string"},
      {"id": "C", "label": "Event date", "type": "date"},
      {"id": "D", "label": "Description", "type": "string"},
      {"id": "E", "label": "Images", "type": "string"}
    ],
    "rows": [
      {"c": [{"v": "Timestamp"}, {"v": "Topic"}, {"v": "Event date"}, {"v": "Description"}, {"v": "Images"}]},
      {"c": [
        {"v": "Date(2024,0,5,10,0,0)", "f": "1/5/2024 10:00:00"},
        {"v": "Beach cleanup"},
        {"v": "Date(2024,0,6)", "f": "1/6/2024"},
        {"v": "Collected 40 bags of litter."},
        {"v": "https://drive.google.com/open?id=1AbCdEfGhIjKlMnOpQrStUvWxYz012345"}
      ]},
      {"c": [
        {"v": "Date(2024,1,1,9,0,0)", "f": "2/1/2024 09:00:00"},
        {"v": "Tree planting"},
        null,
        null,
        {"v": "https://drive.google.com/file/d/1ZyXwVuTsRqPoNmLkJiHgFeDcBa98765/view, https://cdn.example.com/a.jpg"}
      ]},
      {"c": [{"v": "Date(2024,1,2)"}, {"v": "   "}, {"v": "x"}, {"v": "y"}, null]},
      null,
      {"c": [
        {"v": "Date(2024,2,3)", "f": "3/3/2024"},
        {"v": "Workshop"},
        {"f": "3/10/2024"},
        {"v": false},
        {"v": ""}
      ]}
    ]
  }
}"#;

#[tokio::test]
async fn test_fetch_decodes_newest_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(wrap_envelope(SAMPLE_TABLE))
                .insert_header("content-type", "text/javascript; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/feed", mock_server.uri()));
    let repository = FeedRepository::new(&config).expect("Failed to build repository");

    let feed = repository.fetch().await.expect("Fetch should succeed");

    assert_eq!(feed.len(), 3, "header and blank-topic rows are skipped");
    let topics: Vec<&str> = feed.iter().map(|p| p.topic.as_str()).collect();
    assert_eq!(topics, vec!["Workshop", "Tree planting", "Beach cleanup"]);

    let workshop = feed.get(0).unwrap();
    assert_eq!(workshop.created_at, "3/3/2024");
    assert_eq!(workshop.event_date, "3/10/2024");
    assert_eq!(workshop.description, "No description available.");
    assert!(workshop.images().is_empty());

    let trees = feed.get(1).unwrap();
    assert_eq!(trees.event_date, "No date");
    assert_eq!(
        trees.images(),
        vec![
            "https://drive.google.com/thumbnail?id=1ZyXwVuTsRqPoNmLkJiHgFeDcBa98765&sz=w1000"
                .to_string(),
            "https://cdn.example.com/a.jpg".to_string(),
        ]
    );

    let beach = feed.get(2).unwrap();
    assert_eq!(beach.created_at, "1/5/2024 10:00:00");
    assert_eq!(beach.event_date, "1/6/2024");
    assert_eq!(
        beach.images(),
        vec!["https://drive.google.com/thumbnail?id=1AbCdEfGhIjKlMnOpQrStUvWxYz012345&sz=w1000"
            .to_string()]
    );
}

#[tokio::test]
async fn test_fetch_header_only_is_empty() {
    let mock_server = MockServer::start().await;

    let table = r#"{"table":{"rows":[{"c":[{"v":"Timestamp"},{"v":"Topic"}]}]}}"#;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(wrap_envelope(table)))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/feed", mock_server.uri()));
    let repository = FeedRepository::new(&config).unwrap();

    let feed = repository.fetch().await.unwrap();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_fetch_server_error_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/feed", mock_server.uri()));
    let repository = FeedRepository::new(&config).unwrap();

    let err = repository.fetch().await.unwrap_err();
    assert!(
        matches!(err, FetchError::Transport(TransportError::Status(status)) if status.as_u16() == 500),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_fetch_unreachable_is_transport_error() {
    // Nothing listens on the discard port.
    let config = create_test_config("http://127.0.0.1:9/feed");
    let repository = FeedRepository::new(&config).unwrap();

    let err = repository.fetch().await.unwrap_err();
    assert!(
        matches!(err, FetchError::Transport(TransportError::Request(_))),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_fetch_malformed_payload_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Sign in</html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/feed", mock_server.uri()));
    let repository = FeedRepository::new(&config).unwrap();

    let err = repository.fetch().await.unwrap_err();
    assert!(
        matches!(err, FetchError::Parse(ParseError::Envelope { .. })),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_fetch_missing_table_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(wrap_envelope(r#"{"status":"error","errors":[]}"#)),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/feed", mock_server.uri()));
    let repository = FeedRepository::new(&config).unwrap();

    let err = repository.fetch().await.unwrap_err();
    assert!(
        matches!(err, FetchError::Parse(ParseError::MissingField("table"))),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_fetch_hits_source_every_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(wrap_envelope(r#"{"table":{"rows":[]}}"#)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/feed", mock_server.uri()));
    let repository = FeedRepository::new(&config).unwrap();

    repository.fetch().await.unwrap();
    repository.fetch().await.unwrap();
}

#[tokio::test]
async fn test_fetch_skips_malformed_rows() {
    let mock_server = MockServer::start().await;

    let table = r#"{"table":{"rows":[
        {"c":[{"v":"Timestamp"},{"v":"Topic"}]},
        {"c":[null,{"v":"Good"}]},
        {"c":"oops"},
        5
    ]}}"#;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(wrap_envelope(table)))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/feed", mock_server.uri()));
    let repository = FeedRepository::new(&config).unwrap();

    let feed = repository.fetch().await.expect("Malformed rows should not fail the feed");
    assert_eq!(feed.len(), 1);
    assert_eq!(feed.get(0).unwrap().topic, "Good");
}
