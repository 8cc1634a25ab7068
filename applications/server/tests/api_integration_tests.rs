/// API integration tests
/// Tests complete HTTP request/response cycles against a live station
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{create_test_state, drain_json, fixtures};
use airwave_server::{api, services::mailbox, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt;

/// Helper to create test app router
fn create_test_app(protected: bool) -> (Router, AppState) {
    let state = create_test_state(protected);
    (api::router(state.clone(), None), state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Test play on an idle station starts immediately
#[tokio::test]
async fn test_play_starts_when_idle() {
    let (app, state) = create_test_app(false);

    let response = app
        .oneshot(post_json(
            "/api/play",
            json!({"location": "http://x/y.mp3", "text": "Song", "requester": "dj"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["action"], "play");
    assert_eq!(
        body["track"],
        json!({"location": "http://x/y.mp3", "text": "Song", "requester": "dj"})
    );

    let playback = state.station.snapshot().await;
    assert_eq!(playback.now_playing().unwrap().location(), "http://x/y.mp3");
}

/// Test a second play is queued behind the first
#[tokio::test]
async fn test_second_play_is_queued() {
    let (app, state) = create_test_app(false);

    let first = app
        .clone()
        .oneshot(post_json("/api/play", json!({"queryName": "cradles"})))
        .await
        .unwrap();
    assert_eq!(body_json(first).await["action"], "play");

    let second = app
        .oneshot(post_json("/api/play", json!({"location": "http://x/next.mp3"})))
        .await
        .unwrap();
    let body = body_json(second).await;
    assert_eq!(body["action"], "queued");
    assert_eq!(body["track"]["text"], "Now playing");

    let playback = state.station.snapshot().await;
    assert_eq!(
        playback.now_playing().unwrap().location(),
        fixtures::CRADLES_LOCATION
    );
    assert_eq!(playback.queue_len(), 1);
}

/// Test unresolved input is rejected with distinct messages
#[tokio::test]
async fn test_play_unresolved_input() {
    let (app, state) = create_test_app(false);

    let response = app
        .clone()
        .oneshot(post_json("/api/play", json!({"queryName": "nothing here"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "entry not found: nothing here"
    );

    let response = app
        .oneshot(post_json("/api/play", json!({"text": "only text"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid input");

    assert!(state.station.snapshot().await.is_idle());
}

/// Test unresolved HTTP play is not broadcast to listeners
#[tokio::test]
async fn test_unresolved_request_is_not_broadcast() {
    let (app, state) = create_test_app(false);
    let (tx, mut rx) = mailbox();
    state.station.connect(tx).await;
    drain_json(&mut rx);

    let response = app
        .oneshot(post_json("/api/play", json!({"queryName": "nope"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(drain_json(&mut rx).is_empty());
}

/// Test unauthorized play leaves state untouched and broadcasts nothing
#[tokio::test]
async fn test_play_unauthorized() {
    let (app, state) = create_test_app(true);
    let (tx, mut rx) = mailbox();
    state.station.connect(tx).await;
    drain_json(&mut rx);

    let response = app
        .oneshot(post_json("/api/play", json!({"location": "http://x/y.mp3"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(state.station.snapshot().await.is_idle());
    assert!(drain_json(&mut rx).is_empty());
}

/// Test each credential source is accepted
#[tokio::test]
async fn test_play_authorized_by_body_header_and_query() {
    let (app, state) = create_test_app(true);

    let by_body = app
        .clone()
        .oneshot(post_json(
            "/api/play",
            json!({"location": "http://x/1.mp3", "credential": fixtures::SECRET}),
        ))
        .await
        .unwrap();
    assert_eq!(by_body.status(), StatusCode::OK);

    let mut by_header = post_json("/api/play", json!({"location": "http://x/2.mp3"}));
    by_header.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", fixtures::SECRET).parse().unwrap(),
    );
    let by_header = app.clone().oneshot(by_header).await.unwrap();
    assert_eq!(by_header.status(), StatusCode::OK);

    let by_query = app
        .oneshot(post_json(
            &format!("/api/play?credential={}", fixtures::SECRET),
            json!({"location": "http://x/3.mp3"}),
        ))
        .await
        .unwrap();
    assert_eq!(by_query.status(), StatusCode::OK);

    assert_eq!(state.station.snapshot().await.queue_len(), 2);
}

/// Test a missing body on a protected station is refused as unauthorized
#[tokio::test]
async fn test_play_without_body_or_credential_is_forbidden() {
    let (app, state) = create_test_app(true);

    let response = app.oneshot(post_empty("/api/play")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "unauthorized");
    assert!(state.station.snapshot().await.is_idle());
}

/// Test a missing body is a bad request once access is granted
#[tokio::test]
async fn test_play_without_body_is_bad_request() {
    let (app, _) = create_test_app(false);
    let response = app.oneshot(post_empty("/api/play")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (app, _) = create_test_app(true);
    let malformed = Request::builder()
        .uri(format!("/api/play?credential={}", fixtures::SECRET))
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(malformed).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Test an empty Bearer header does not hide the body credential
#[tokio::test]
async fn test_blank_bearer_falls_back_to_body_credential() {
    let (app, state) = create_test_app(true);

    let mut request = post_json(
        "/api/play",
        json!({"location": "http://x/y.mp3", "credential": fixtures::SECRET}),
    );
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!state.station.snapshot().await.is_idle());
}

/// Test stop and skip require the credential
#[tokio::test]
async fn test_stop_and_skip_unauthorized() {
    let (app, _) = create_test_app(true);

    for uri in ["/api/stop", "/api/skip"] {
        let response = app.clone().oneshot(post_empty(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

/// Test skip drains one track and stop clears everything
#[tokio::test]
async fn test_skip_then_stop() {
    let (app, state) = create_test_app(true);
    let authed = |uri: &str| format!("{uri}?credential={}", fixtures::SECRET);

    for n in 1..=3 {
        let response = app
            .clone()
            .oneshot(post_json(
                &authed("/api/play"),
                json!({"location": format!("http://x/{n}.mp3")}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(post_empty(&authed("/api/skip"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));

    let playback = state.station.snapshot().await;
    assert_eq!(playback.now_playing().unwrap().location(), "http://x/2.mp3");
    assert_eq!(playback.queue_len(), 1);

    let response = app.oneshot(post_empty(&authed("/api/stop"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let playback = state.station.snapshot().await;
    assert!(playback.is_idle());
    assert_eq!(playback.queue_len(), 0);
}

/// Test the ended signal is ungated and race-checked
#[tokio::test]
async fn test_ended_signal() {
    let (app, state) = create_test_app(true);
    state
        .station
        .play(
            &airwave_playback::TrackRequest {
                location: Some("http://x/a.mp3".to_string()),
                ..Default::default()
            },
            Some(fixtures::SECRET),
            airwave_server::services::Origin::Request,
        )
        .await
        .unwrap();

    let stale = app
        .clone()
        .oneshot(post_json("/api/ended", json!({"location": "http://x/b.mp3"})))
        .await
        .unwrap();
    assert_eq!(stale.status(), StatusCode::OK);
    assert_eq!(body_json(stale).await, json!({"advanced": false}));
    assert!(!state.station.snapshot().await.is_idle());

    let current = app
        .oneshot(post_json("/api/ended", json!({"location": "http://x/a.mp3"})))
        .await
        .unwrap();
    assert_eq!(body_json(current).await, json!({"advanced": true}));
    assert!(state.station.snapshot().await.is_idle());
}

/// Test the read-only queue listing
#[tokio::test]
async fn test_queue_listing_is_read_only() {
    let (app, state) = create_test_app(true);
    for location in ["http://x/a.mp3", "http://x/b.mp3"] {
        state
            .station
            .play(
                &airwave_playback::TrackRequest {
                    location: Some(location.to_string()),
                    requester: Some("dj".to_string()),
                    ..Default::default()
                },
                Some(fixtures::SECRET),
                airwave_server::services::Origin::Request,
            )
            .await
            .unwrap();
    }

    let request = Request::builder()
        .uri("/api/queue")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "nowPlaying": {"text": "Now playing", "requester": "dj"},
            "queue": [{"text": "Now playing", "requester": "dj"}],
            "lines": [
                "Now playing: Now playing (requested by dj)",
                "Up next:",
                "1. Now playing (requested by dj)"
            ]
        })
    );
}

/// Test status reports live listeners as plain text
#[tokio::test]
async fn test_status_counts_listeners() {
    let (app, state) = create_test_app(false);
    let (tx_a, _rx_a) = mailbox();
    let (tx_b, _rx_b) = mailbox();
    state.station.connect(tx_a).await;
    state.station.connect(tx_b).await;

    let request = Request::builder()
        .uri("/api/status")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body_bytes[..], b"2 listeners connected");
}

/// Test health reports catalog size and access mode
#[tokio::test]
async fn test_health() {
    let (app, _) = create_test_app(false);

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["catalog_entries"], 1);
    assert_eq!(body["open_access"], true);
}
