//! End-to-end tests of the data client over real HTTP
//!
//! Each test runs a wiremock server standing in for both the data service
//! and the storage host behind presigned links.

mod common;

use chrono::Duration;
use common::{LOGIN_BODY, MockDataService, TestClock, client_for, cookie_of, epoch};
use pitwall_data::{ApiError, Payload, QueryParams};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn authenticates_then_calls_data_endpoint() {
    let service = MockDataService::start().await;
    service.mock_login().await;
    Mock::given(method("GET"))
        .and(path("/data/member/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cust_id": 42 })))
        .expect(1)
        .mount(&service.server)
        .await;

    let client = client_for(&service, &TestClock::at(epoch()));
    let payload = client.get("/data/member/info", &QueryParams::new()).await.unwrap();
    assert_eq!(payload, Payload::Json(json!({ "cust_id": 42 })));

    let logins = service.requests_to("/auth").await;
    assert_eq!(logins.len(), 1);
    assert_eq!(logins[0].method.as_str(), "POST");
    assert_eq!(String::from_utf8_lossy(&logins[0].body), LOGIN_BODY);

    let data = service.requests_to("/data/member/info").await;
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].method.as_str(), "GET");
    let cookie = cookie_of(&data[0]).expect("data call must carry cookies");
    assert!(cookie.contains("irsso_membersv2=s1"), "cookie was {cookie}");
    assert!(cookie.contains("authtoken_members=%7B%22authtoken%22%3A%7B%22authcode%22%3A%22c1%22"));
}

#[tokio::test]
async fn rejected_login_surfaces_status_and_body() {
    let service = MockDataService::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&service.server)
        .await;

    let client = client_for(&service, &TestClock::at(epoch()));
    let err = client.get("/data/member/info", &QueryParams::new()).await.unwrap_err();

    assert!(matches!(err, ApiError::Authentication { status: 401, ref body } if body == "Unauthorized"));
    assert!(service.requests_to("/data/member/info").await.is_empty());
}

#[tokio::test]
async fn failed_data_call_reports_status_and_body() {
    let service = MockDataService::start().await;
    service.mock_login().await;
    Mock::given(method("GET"))
        .and(path("/data/results/get"))
        .respond_with(ResponseTemplate::new(404).set_body_string("subsession not found"))
        .mount(&service.server)
        .await;

    let client = client_for(&service, &TestClock::at(epoch()));
    let err = client
        .results()
        .get(QueryParams::new().with("subsession_id", 1))
        .await
        .unwrap_err();

    match err {
        ApiError::Request { status, status_text, body, .. } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(body, "subsession not found");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn presigned_link_is_followed_and_cached_until_expiry() {
    let service = MockDataService::start().await;
    service.mock_login().await;
    let expires = epoch() + Duration::minutes(15);
    service.mock_link("/data/member/get", "/s3/members.json", expires).await;
    Mock::given(method("GET"))
        .and(path("/s3/members.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "members": [] })),
        )
        .mount(&service.server)
        .await;

    let clock = TestClock::at(epoch());
    let client = client_for(&service, &clock);
    let params = QueryParams::new().with("cust_ids", vec![42u32, 43]);

    let first = client.member().get(params.clone()).await.unwrap();
    assert_eq!(first.as_json().unwrap()["success"], json!(true));

    let second = client.member().get(params.clone()).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(service.requests_to("/data/member/get").await.len(), 1);
    assert_eq!(service.requests_to("/s3/members.json").await.len(), 1);

    // The storage host never sees session cookies.
    let link_requests = service.requests_to("/s3/members.json").await;
    assert_eq!(cookie_of(&link_requests[0]), None);

    // Past expires - 60s both hops are repeated.
    clock.advance(Duration::minutes(14));
    client.member().get(params).await.unwrap();
    assert_eq!(service.requests_to("/data/member/get").await.len(), 2);
    assert_eq!(service.requests_to("/s3/members.json").await.len(), 2);
}

#[tokio::test]
async fn query_parameters_reach_the_service() {
    let service = MockDataService::start().await;
    service.mock_login().await;
    Mock::given(method("GET"))
        .and(path("/data/season/spectator_subsessionids"))
        .and(query_param("event_types", "2,5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "link": format!("{}/s3/spectator.json", service.uri()),
            "expires": (epoch() + Duration::hours(1)).to_rfc3339(),
        })))
        .expect(1)
        .mount(&service.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s3/spectator.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "subsession_ids": [1, 2] })))
        .expect(1)
        .mount(&service.server)
        .await;

    let client = client_for(&service, &TestClock::at(epoch()));
    let payload = client
        .season()
        .spectator_subsessionids(QueryParams::new().with("event_types", vec![2u32, 5]))
        .await
        .unwrap();

    assert_eq!(payload.as_json().unwrap()["subsession_ids"], json!([1, 2]));
}

#[tokio::test]
async fn missing_link_is_a_protocol_error() {
    let service = MockDataService::start().await;
    service.mock_login().await;
    Mock::given(method("GET"))
        .and(path("/data/track/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "track_id": 1 }])))
        .mount(&service.server)
        .await;

    let client = client_for(&service, &TestClock::at(epoch()));
    let err = client.track().get().await.unwrap_err();

    assert!(matches!(err, ApiError::Protocol { ref reason } if reason == "no presigned link received"));
}

#[tokio::test]
async fn direct_endpoint_returns_inline_data() {
    let service = MockDataService::start().await;
    service.mock_login().await;
    Mock::given(method("GET"))
        .and(path("/data/constants/divisions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "label": "ALL", "value": -1 },
            { "label": "Division 1", "value": 0 }
        ])))
        .expect(2)
        .mount(&service.server)
        .await;

    let client = client_for(&service, &TestClock::at(epoch()));
    let divisions = client.constants().divisions().await.unwrap();
    assert_eq!(divisions.as_json().unwrap().as_array().unwrap().len(), 2);

    // Direct responses are never cached.
    client.constants().divisions().await.unwrap();
    assert_eq!(client.cached_links().await, 0);
}
