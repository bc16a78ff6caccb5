//! HTTP routing integration tests
//!
//! Drives the router with `oneshot` over an in-memory database and fake providers.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use artdrawer_common::models::DEMO_UID;
use artdrawer_discovery::{build_router, AppState};
use common::{frida_payload, test_app, FakeEnrichment};

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = build_router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = test_app(FakeEnrichment::failing()).await;

    let (status, body) = send(&app.state, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "artdrawer-discovery");
    assert_eq!(body["online"], true);
}

#[tokio::test]
async fn test_search_returns_artist_and_fills_feed() {
    let app = test_app(FakeEnrichment::with_payload(frida_payload())).await;

    let (status, artist) = send(&app.state, "POST", "/api/search", Some(json!({"query": "Frida Kahlo"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(artist["id"], "art-frida-kahlo");
    assert_eq!(artist["name"]["cn"], "弗里达·卡罗");
    assert_eq!(artist["visualElements"], json!(["Vivid Colors"]));
    assert!(artist.get("offlineImage").is_none());

    let (status, feed) = send(&app.state, "GET", "/api/results", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed.as_array().unwrap().len(), 1);

    let (status, entry) = send(&app.state, "GET", "/api/registry/art-frida-kahlo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry, artist);
}

#[tokio::test]
async fn test_search_error_statuses() {
    let app = test_app(FakeEnrichment::failing()).await;
    app.search.fail_for("Nobody Known");

    // Given: a one-character query
    let (status, body) = send(&app.state, "POST", "/api/search", Some(json!({"query": " a "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Given: a provider failure
    let (status, body) = send(&app.state, "POST", "/api/search", Some(json!({"query": "Nobody Known"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    // Given: offline mode
    let (status, body) = send(&app.state, "PUT", "/api/connectivity", Some(json!({"online": false}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["online"], false);

    let (status, body) = send(&app.state, "POST", "/api/search", Some(json!({"query": "Banksy"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "OFFLINE");
    assert_eq!(app.search.call_count(), 1);
}

#[tokio::test]
async fn test_category_lifecycle() {
    let app = test_app(FakeEnrichment::failing()).await;

    let (status, categories) = send(&app.state, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories.as_array().unwrap().len(), 4);

    let (status, _) = send(&app.state, "POST", "/api/categories", Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = send(
        &app.state,
        "POST",
        "/api/categories",
        Some(json!({"name": " Street ", "color": "#00FF41"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Street");
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("cat-"));

    let (status, updated) = send(
        &app.state,
        "PUT",
        &format!("/api/categories/{}", id),
        Some(json!({"name": "Street Art", "color": "#FF3131"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["color"], "#FF3131");

    let (status, _) = send(&app.state, "DELETE", &format!("/api/categories/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app.state, "DELETE", &format!("/api/categories/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_collect_and_browse_drawer() {
    let app = test_app(FakeEnrichment::failing()).await;
    send(&app.state, "POST", "/api/search", Some(json!({"query": "Banksy"}))).await;

    let toggle = json!({"artistId": "art-banksy", "categoryId": "cat4"});
    let (status, body) = send(&app.state, "POST", "/api/collection/toggle", Some(toggle.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collected"], true);

    let (_, drawers) = send(&app.state, "GET", "/api/drawers", None).await;
    let pop = drawers
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == "cat4")
        .unwrap()
        .clone();
    assert_eq!(pop["count"], 1);

    let (status, items) = send(&app.state, "GET", "/api/drawers/cat4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items[0]["id"], "art-banksy");
    assert_eq!(items[0]["offlineImage"], "data:image/jpeg;base64,/9j/");

    let (_, favorites) = send(&app.state, "GET", "/api/favorites", None).await;
    assert_eq!(favorites[0]["artistId"], "art-banksy");
    assert_eq!(favorites[0]["category"], "cat4");

    let (_, body) = send(&app.state, "POST", "/api/collection/toggle", Some(toggle)).await;
    assert_eq!(body["collected"], false);

    let (status, _) = send(&app.state, "GET", "/api/drawers/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_compare_holds_two() {
    let app = test_app(FakeEnrichment::failing()).await;
    for query in ["Banksy", "Frida Kahlo", "Salvador Dali"] {
        send(&app.state, "POST", "/api/search", Some(json!({"query": query}))).await;
    }

    let (_, body) = send(&app.state, "POST", "/api/compare/art-banksy", None).await;
    assert_eq!(body["selected"], true);
    send(&app.state, "POST", "/api/compare/art-frida-kahlo", None).await;

    let (_, body) = send(&app.state, "POST", "/api/compare/art-salvador-dali", None).await;
    assert_eq!(body["selected"], false);
    assert_eq!(body["artists"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app.state, "POST", "/api/compare/art-unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&app.state, "GET", "/api/compare", None).await;
    assert_eq!(listed[0]["id"], "art-banksy");
}

#[tokio::test]
async fn test_session_flow() {
    let app = test_app(FakeEnrichment::failing()).await;

    let (status, _) = send(&app.state, "GET", "/api/session", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, identity) = send(&app.state, "POST", "/api/session/demo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(identity["uid"], DEMO_UID);

    // Demo changes stay local
    send(
        &app.state,
        "POST",
        "/api/collection/toggle",
        Some(json!({"artistId": "art-x", "categoryId": "cat1"})),
    )
    .await;
    assert!(app.remote.snapshot(DEMO_UID).await.is_none());

    let (status, identity) = send(
        &app.state,
        "POST",
        "/api/session",
        Some(json!({"uid": "user-7", "displayName": "Ada", "photoURL": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(identity["displayName"], "Ada");

    // No remote document yet: local state is pushed
    let pushed = app.remote.snapshot("user-7").await.unwrap();
    assert_eq!(pushed.favorites.unwrap().len(), 1);

    let (status, _) = send(&app.state, "DELETE", "/api/session", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app.state, "GET", "/api/session", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_and_styles() {
    let app = test_app(FakeEnrichment::with_payload(frida_payload())).await;

    let (status, body) = send(&app.state, "POST", "/api/chat", Some(json!({"message": "Tell me about Kahlo"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Kahlo painted 55 self-portraits.");

    let (status, styles) = send(&app.state, "GET", "/api/styles/suggested", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(styles.as_array().unwrap().len(), 5);

    let (status, daily) = send(&app.state, "GET", "/api/daily", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(daily["id"].as_str().unwrap().starts_with("art-"));
}
