// tests/integration_test.rs
use release_range::aggregator::ReleaseAggregator;
use release_range::cancel::{CancelToken, RequestTracker};
use release_range::config::GitHubConfig;
use release_range::domain::{FilterState, PinnedRange};
use release_range::filter::apply_filters;
use release_range::provider::{Credential, GitHubClient};
use release_range::repo_url::parse_repo_url;
use release_range::ReleaseRangeError;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn release_json(tag: &str) -> Value {
    json!({
        "tag_name": tag,
        "html_url": format!("https://github.com/facebook/react-native/releases/tag/{}", tag),
        "name": tag,
        "body": format!("### Notes for {}\n\n- item `code`\n", tag),
        "prerelease": tag.contains('-'),
        "draft": false,
        "published_at": "2023-06-21T16:09:20Z"
    })
}

fn client_for(server: &MockServer) -> GitHubClient {
    let config = GitHubConfig {
        api_url: server.uri(),
        ..GitHubConfig::default()
    };
    GitHubClient::new(&config, None).expect("client")
}

async fn mount_page(server: &MockServer, listing: &str, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/facebook/react-native/{}", listing)))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_react_native_range_sorted_descending() {
    let server = MockServer::start().await;
    let tags = [
        "v0.69.12", "v0.70.0", "v0.72.0-rc.1", "v0.71.2", "v0.70.3", "v0.72.0", "v0.71.0",
        "v0.72.1", "nightly", "v0.71.0-rc1",
    ];
    let body: Vec<Value> = tags.iter().map(|t| release_json(t)).collect();
    mount_page(&server, "releases", 1, Value::Array(body)).await;

    let repo = parse_repo_url("https://github.com/facebook/react-native/releases").unwrap();
    let aggregator = ReleaseAggregator::new(client_for(&server));
    let releases = aggregator
        .get_release_notes(&repo.owner, &repo.repo, "v0.70.0", "v0.72.0", &CancelToken::new())
        .await
        .unwrap();

    let got: Vec<&str> = releases.iter().map(|r| r.tag_name.as_str()).collect();
    assert_eq!(
        got,
        vec!["v0.72.0", "v0.71.2", "v0.71.0", "v0.71.0-rc1", "v0.70.3", "v0.70.0"]
    );
    for release in &releases {
        assert_eq!(
            release.notes(),
            format!("### Notes for {}\n\n- item `code`\n", release.tag_name)
        );
    }
}

#[tokio::test]
async fn test_full_first_page_requests_second() {
    let server = MockServer::start().await;
    let first: Vec<Value> = (0..100).map(|i| release_json(&format!("v1.0.{}", i))).collect();
    let second: Vec<Value> = (0..7).map(|i| release_json(&format!("v1.1.{}", i))).collect();
    mount_page(&server, "releases", 1, Value::Array(first)).await;
    mount_page(&server, "releases", 2, Value::Array(second)).await;

    let aggregator = ReleaseAggregator::new(client_for(&server));
    let releases = aggregator
        .get_release_notes("facebook", "react-native", "v1.0.0", "v9.0.0", &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(releases.len(), 107);
    assert_eq!(releases[0].tag_name, "v1.1.6");
    server.verify().await;
}

#[tokio::test]
async fn test_empty_second_page_stops() {
    let server = MockServer::start().await;
    let first: Vec<Value> = (0..100).map(|i| release_json(&format!("v2.{}.0", i))).collect();
    mount_page(&server, "releases", 1, Value::Array(first)).await;
    mount_page(&server, "releases", 2, json!([])).await;

    let aggregator = ReleaseAggregator::new(client_for(&server));
    let releases = aggregator
        .get_release_notes("facebook", "react-native", "v2.0.0", "v2.99.0", &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(releases.len(), 100);
    // `expect(1)` on each page also proves page 3 was never requested
    server.verify().await;
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_short_first_page_stops() {
    let server = MockServer::start().await;
    mount_page(&server, "tags", 1, json!([{"name": "v0.72.0"}, {"name": "v0.71.0"}])).await;

    let aggregator = ReleaseAggregator::new(client_for(&server));
    let tags = aggregator
        .available_versions("facebook", "react-native", &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(tags, vec!["v0.72.0", "v0.71.0"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_tag_skips_only_that_release() {
    let server = MockServer::start().await;
    let mut numeric = release_json("v1.0.0");
    numeric["tag_name"] = json!(42);
    let mut missing = release_json("v1.0.1");
    missing["tag_name"] = Value::Null;
    let body = json!([release_json("v1.0.0"), numeric, missing, release_json("v1.1.0")]);
    mount_page(&server, "releases", 1, body).await;

    let aggregator = ReleaseAggregator::new(client_for(&server));
    let report = aggregator
        .get_release_report("facebook", "react-native", "v0.1.0", "v2.0.0", &CancelToken::new())
        .await
        .unwrap();

    let got: Vec<&str> = report.releases.iter().map(|r| r.tag_name.as_str()).collect();
    assert_eq!(got, vec!["v1.1.0", "v1.0.0"]);
    assert_eq!(report.unparsable, 2);
}

#[tokio::test]
async fn test_invalid_range_makes_no_requests() {
    let server = MockServer::start().await;
    let aggregator = ReleaseAggregator::new(client_for(&server));

    let err = aggregator
        .get_release_notes("facebook", "react-native", "v1", "v0.72.0", &CancelToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ReleaseRangeError::InvalidRange(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rate_limit_propagates_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("retry-after", "30"),
        )
        .mount(&server)
        .await;

    let aggregator = ReleaseAggregator::new(client_for(&server));
    let err = aggregator
        .get_release_notes("facebook", "react-native", "v0.70.0", "v0.72.0", &CancelToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ReleaseRangeError::RateLimited { retry_after: 30 }));
}

#[tokio::test]
async fn test_reauthentication_replaces_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/facebook/react-native/tags"))
        .and(header("Authorization", "Bearer ghp_new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "v1.0.0"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/facebook/react-native/tags"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})))
        .mount(&server)
        .await;

    let anonymous = client_for(&server);
    let mut aggregator = ReleaseAggregator::new(anonymous.with_credential(Credential::new("ghp_old")));
    let cancel = CancelToken::new();

    let err = aggregator
        .available_versions("facebook", "react-native", &cancel)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Bad credentials"));

    let fresh = aggregator.source().with_credential(Credential::new("ghp_new"));
    let previous = aggregator.replace_source(fresh);
    assert!(previous.is_authenticated());

    let tags = aggregator
        .available_versions("facebook", "react-native", &cancel)
        .await
        .unwrap();
    assert_eq!(tags, vec!["v1.0.0"]);
    server.verify().await;
}

#[tokio::test]
async fn test_newer_request_cancels_stale_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([release_json("v1.0.0")]))
                .set_delay(std::time::Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let aggregator = ReleaseAggregator::new(client_for(&server));
    let tracker = RequestTracker::new();
    let stale = tracker.begin();

    let request = aggregator.get_release_notes("facebook", "react-native", "v1.0.0", "v1.0.0", &stale);
    let newer = async {
        while server.received_requests().await.unwrap_or_default().is_empty() {
            tokio::task::yield_now().await;
        }
        tracker.begin()
    };
    let (result, fresh) = tokio::join!(request, newer);

    assert!(matches!(result, Err(ReleaseRangeError::Cancelled)));
    assert!(!fresh.is_cancelled());
}

#[tokio::test]
async fn test_attribute_filters_after_aggregation() {
    let server = MockServer::start().await;
    let tags = ["v2.0.0", "v2.1.0", "v2.1.1", "v3.0.0-beta", "v3.0.0"];
    let body: Vec<Value> = tags.iter().map(|t| release_json(t)).collect();
    mount_page(&server, "releases", 1, Value::Array(body)).await;

    let aggregator = ReleaseAggregator::new(client_for(&server));
    let releases = aggregator
        .get_release_notes("facebook", "react-native", "v2.0.0", "v3.0.0", &CancelToken::new())
        .await
        .unwrap();

    let filters = FilterState {
        include_major: false,
        include_beta: false,
        ..FilterState::default()
    };
    let shown = apply_filters(releases, filters, &PinnedRange::new("v2.0.0", "v3.0.0"));
    let got: Vec<&str> = shown.iter().map(|r| r.tag_name.as_str()).collect();

    assert_eq!(got, vec!["v3.0.0", "v2.1.1", "v2.1.0", "v2.0.0"]);
}
