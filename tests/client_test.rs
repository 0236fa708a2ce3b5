//! REST client tests against a mock HTTP device

use serde_json::json;
use snaproute_exporter::collectors::SnapRouteCollector;
use snaproute_exporter::error::ExporterError;
use snaproute_exporter::identity::Identity;
use snaproute_exporter::sink::{FieldValue, MemorySink};
use snaproute_exporter::snaproute::types::{Platform, PsuObject};
use snaproute_exporter::snaproute::SnapRouteClient;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(current: i64, next: i64, more: bool, ids: &[i64]) -> serde_json::Value {
    let objects: Vec<_> = ids
        .iter()
        .map(|id| json!({"ObjectId": format!("psu-{}", id), "Object": {"PsuId": id}}))
        .collect();
    json!({
        "MoreExist": more,
        "ObjCount": objects.len(),
        "CurrentMarker": current,
        "NextMarker": next,
        "Objects": objects,
    })
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_query_platform_over_http() {
    // Given: A device serving the platform document
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/state/platform",
        json!({"Object": {"ProductName": "SR-X", "SerialNum": "S1"}}),
    )
    .await;
    let client = SnapRouteClient::new(format!("{}/", server.uri()), 64);

    // When: Querying the platform
    let platform: Platform = client
        .query("platform", "state/platform")
        .await
        .expect("platform should decode");

    // Then: Fields present are decoded, absent ones are empty
    assert_eq!(platform.object.product_name, "SR-X");
    assert_eq!(platform.object.serial_num, "S1");
    assert_eq!(platform.object.vendor, "");
}

#[tokio::test]
async fn test_list_follows_next_marker() {
    // Given: PSUs spread over three pages
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/state/psus"))
        .and(query_param_is_missing("CurrentMarker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 2, true, &[0, 1])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/state/psus"))
        .and(query_param("CurrentMarker", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, 3, true, &[2])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/state/psus"))
        .and(query_param("CurrentMarker", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(3, 0, false, &[3])))
        .mount(&server)
        .await;
    let client = SnapRouteClient::new(format!("{}/", server.uri()), 64);

    // When: Querying the list
    let entries = client
        .query_list::<PsuObject>("psu", "state/psus")
        .await
        .expect("paged list should decode");

    // Then: Entries from every page are returned in order
    let ids: Vec<i64> = entries.iter().map(|e| e.object.psu_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_list_stops_when_marker_does_not_advance() {
    // Given: A device that claims more objects but repeats its marker
    let server = MockServer::start().await;
    mount_json(&server, "/state/psus", page(5, 5, true, &[0])).await;
    let client = SnapRouteClient::new(format!("{}/", server.uri()), 64);

    // When: Querying the list
    let entries = client
        .query_list::<PsuObject>("psu", "state/psus")
        .await
        .expect("first page should decode");

    // Then: Only one request is made
    assert_eq!(entries.len(), 1);
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_list_stops_when_device_ignores_marker() {
    // Given: A device that serves its first page for every marker
    let server = MockServer::start().await;
    mount_json(&server, "/state/psus", page(0, 1, true, &[0])).await;
    let client = SnapRouteClient::new(format!("{}/", server.uri()), 64);

    // When: Querying the list
    let entries = client
        .query_list::<PsuObject>("psu", "state/psus")
        .await
        .expect("first page should decode");

    // Then: The repeated page is not appended again
    let ids: Vec<i64> = entries.iter().map(|e| e.object.psu_id).collect();
    assert_eq!(ids, vec![0]);
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_list_respects_page_cap() {
    // Given: A device that always has more, with advancing markers
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/state/psus"))
        .and(query_param_is_missing("CurrentMarker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 1, true, &[0])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/state/psus"))
        .and(query_param("CurrentMarker", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, 2, true, &[1])))
        .mount(&server)
        .await;
    let client = SnapRouteClient::new(format!("{}/", server.uri()), 2);

    // When: Querying with a cap of two pages
    let entries = client
        .query_list::<PsuObject>("psu", "state/psus")
        .await
        .expect("capped list should decode");

    // Then: Two pages are returned and no third request is made
    assert_eq!(entries.len(), 2);
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_error_status_body_goes_to_decoder() {
    // Given: A device returning 500 with a plain-text body
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/state/platform"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    let client = SnapRouteClient::new(format!("{}/", server.uri()), 64);

    // When: Querying the platform
    let result = client.query::<Platform>("platform", "state/platform").await;

    // Then: The failure is a decode error, not a transport error
    match result {
        Err(ExporterError::Decode(e)) => assert_eq!(e.domain, "platform"),
        other => panic!("expected decode error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_unreachable_device_is_transport_error() {
    // Given: Nothing listening on the target port
    let server = MockServer::start().await;
    let base = format!("{}/", server.uri());
    drop(server);
    let client = SnapRouteClient::new(base, 64);

    // When: Querying the platform
    let result = client.query::<Platform>("platform", "state/platform").await;

    // Then: A transport error naming the URL
    match result {
        Err(ExporterError::Transport { url, .. }) => assert!(url.ends_with("state/platform")),
        other => panic!("expected transport error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_url_prefix_is_used_verbatim() {
    let client = SnapRouteClient::new("http://x/public/v1", 64);
    assert_eq!(client.url_for("state/platform"), "http://x/public/v1state/platform");

    let client = SnapRouteClient::new("http://x/", 64);
    assert_eq!(client.url_for("state/platform"), "http://x/state/platform");
}

#[tokio::test]
async fn test_full_cycle_over_http() {
    // Given: A mock device serving every built-in domain
    let server = MockServer::start().await;
    let empty_list = json!({"MoreExist": false, "Objects": []});
    mount_json(
        &server,
        "/state/platform",
        json!({"Object": {"ProductName": "SR-X", "SerialNum": "S1"}}),
    )
    .await;
    mount_json(&server, "/state/psus", page(0, 0, false, &[0, 1])).await;
    let empty_lists = [
        "/state/sfps",
        "/state/coppstate",
        "/state/vlans",
        "/state/Ports",
        "/state/bufferportstats",
    ];
    for route in empty_lists {
        mount_json(&server, route, empty_list.clone()).await;
    }
    for route in ["/state/asicsummary", "/state/SystemStatus", "/state/routestat"] {
        mount_json(&server, route, json!({"Object": {}})).await;
    }

    let client = SnapRouteClient::new(format!("{}/", server.uri()), 64);
    let mut collector = SnapRouteCollector::new(client).with_identity_resolver(|| {
        Ok(Identity {
            hostname: "switch1".to_string(),
            ..Identity::default()
        })
    });
    let sink = MemorySink::new();

    // When: Running a cycle
    collector.gather(&sink).await.expect("cycle should succeed");

    // Then: Platform and PSU samples arrive with their tags
    let product = sink
        .measurement("platform")
        .into_iter()
        .find(|s| s.field("ProductName").is_some())
        .expect("ProductName sample");
    assert_eq!(product.field("ProductName"), Some(&FieldValue::from("SR-X")));
    assert_eq!(product.tag("hostname"), Some("switch1"));
    assert_eq!(product.tag("mgmt-ip"), Some(""));

    let psu_ids: std::collections::BTreeSet<String> = sink
        .measurement("psu")
        .iter()
        .filter_map(|s| s.tag("PsuId").map(str::to_string))
        .collect();
    assert_eq!(psu_ids.into_iter().collect::<Vec<_>>(), vec!["0", "1"]);
}
