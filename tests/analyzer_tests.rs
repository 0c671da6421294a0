// Analyzer upload contract tests (wiremock)

mod common;

use common::sample_snapshot;
use ec2stats::analyzer::AnalyzerClient;
use ec2stats::models::Threshold;
use ec2stats::store;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_analyze_posts_json_and_parses_summary() {
    let server = MockServer::start().await;
    let summary = json!({"Summary": {"Regions": [["us-east-1", 2]]}});
    Mock::given(method("POST"))
        .and(path("/v1/ec2stats"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnalyzerClient::new(&format!("{}/v1/ec2stats", server.uri()), true).unwrap();
    let result = client
        .analyze(&sample_snapshot(), Threshold::default())
        .await
        .unwrap();

    assert_eq!(result, summary);
}

#[tokio::test]
async fn test_analyze_stamps_caller_thresholds_as_integers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    // The snapshot starts with different thresholds; the caller's win.
    let mut snapshot = sample_snapshot();
    snapshot.threshold = Threshold { avg: 1, max: 2 };

    let client = AnalyzerClient::new(&server.uri(), true).unwrap();
    client
        .analyze(&snapshot, Threshold { avg: 5, max: 30 })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["Threshold"], json!({"Avg": 5, "Max": 30}));
    // Upload works on a copy; the caller's snapshot is untouched.
    assert_eq!(snapshot.threshold, Threshold { avg: 1, max: 2 });
}

#[tokio::test]
async fn test_analyze_error_status_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AnalyzerClient::new(&server.uri(), true).unwrap();
    let result = client
        .analyze(&sample_snapshot(), Threshold::default())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_analyze_unparsable_body_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = AnalyzerClient::new(&server.uri(), true).unwrap();
    assert!(
        client
            .analyze(&sample_snapshot(), Threshold::default())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_loaded_snapshot_uploads_verbatim() {
    // Save, reload from disk, upload: the file contents reach the analyzer
    // unchanged (apart from the stamped thresholds), with no live collection.
    let dir = tempfile::TempDir::new().unwrap();
    let snapshot = sample_snapshot();
    let saved = store::save_dated_json(dir.path(), store::STATS_PREFIX, &snapshot).unwrap();
    let loaded = store::load_snapshot(&saved).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = AnalyzerClient::new(&server.uri(), true).unwrap();
    client.analyze(&loaded, Threshold::default()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["Instances"],
        serde_json::to_value(&snapshot.instances).unwrap()
    );
    assert_eq!(body["OwnerId"], json!(snapshot.owner_id));
}
