use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use m3u_catalog::{
    config::Config,
    errors::{SourceError, SourceResult},
    sources::M3uSourceHandler,
    utils::TextFetcher,
    web::{AppState, WebServer},
};

const REMOTE_PLAYLIST: &str = "#EXTM3U\n\
    #PLAYLIST:Remote\n\
    #EXTINF:-1 tvg-id=\"r1\" group-title=\"News\",Remote One\n\
    http://remote/1.m3u8\n";

/// Serves one known playlist and 404s everything else
struct FixedFetcher;

#[async_trait]
impl TextFetcher for FixedFetcher {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        if url == "http://provider/list.m3u" {
            Ok(REMOTE_PLAYLIST.to_string())
        } else {
            Err(SourceError::Http {
                status: 404,
                message: format!("Not Found - URL: {url}"),
            })
        }
    }
}

fn app() -> Router {
    let handler = M3uSourceHandler::new(Arc::new(FixedFetcher));
    WebServer::create_router(AppState::new(Config::default(), handler))
}

// Helper function to send requests to the app
async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request_builder = Request::builder().method(method).uri(uri);

    let request = if let Some(body) = body {
        request_builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, response) = send_request(&app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["version"], env!("CARGO_PKG_VERSION"));
    assert!(response.get("timestamp").is_some());
}

#[tokio::test]
async fn test_parse_inline_content() {
    let body = json!({
        "playlistContent": "#EXTM3U\n#EXTINF:-1 tvg-id=\"ch1\" tvg-logo=\"http://x/a.png\" group-title=\"News\",Channel One\nhttp://example.com/ch1.m3u8\n#EXTINF:-1,Channel Two\nhttp://example.com/ch2.m3u8\n"
    });

    let (status, response) =
        send_request(&app(), Method::POST, "/api/playlists/parse", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);

    let data = &response["data"];
    assert_eq!(data["sourceId"], "local");
    assert_eq!(data["entryCount"], 2);
    assert_eq!(data["format"], "m3u");
    assert_eq!(data["entries"][0]["id"], "ch1");
    assert_eq!(data["entries"][0]["logoUrl"], "http://x/a.png");
    assert_eq!(data["entries"][0]["groupTitle"], "News");
    assert_eq!(data["entries"][1]["name"], "Channel Two");
    assert!(data["entries"][1].get("groupTitle").is_none());
    assert!(data.get("playlistTitle").is_none());
}

#[tokio::test]
async fn test_content_wins_over_url() {
    let body = json!({
        "playlistUrl": "http://provider/list.m3u",
        "playlistContent": "#EXTINF:-1,Inline\nhttp://inline/1",
        "sourceId": "mine"
    });

    let (status, response) =
        send_request(&app(), Method::POST, "/api/playlists/parse", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["sourceId"], "mine");
    assert_eq!(response["data"]["entries"][0]["name"], "Inline");
}

#[tokio::test]
async fn test_parse_remote_url() {
    let body = json!({ "playlistUrl": "http://provider/list.m3u" });

    let (status, response) =
        send_request(&app(), Method::POST, "/api/playlists/parse", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let data = &response["data"];
    assert_eq!(data["sourceId"], "http://provider/list.m3u");
    assert_eq!(data["playlistTitle"], "Remote");
    assert_eq!(data["entries"][0]["name"], "Remote One");
}

#[tokio::test]
async fn test_missing_playlist_fields_is_bad_request() {
    for body in [json!({}), json!({ "playlistUrl": "", "playlistContent": "" })] {
        let (status, response) =
            send_request(&app(), Method::POST, "/api/playlists/parse", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert_eq!(
            response["error"],
            "Either playlistUrl or playlistContent is required"
        );
    }
}

#[tokio::test]
async fn test_fetch_failure_is_bad_gateway() {
    let body = json!({ "playlistUrl": "http://provider/missing.m3u" });

    let (status, response) =
        send_request(&app(), Method::POST, "/api/playlists/parse", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["success"], false);
    assert!(response["details"]["reason"]
        .as_str()
        .unwrap()
        .contains("404"));
}

#[tokio::test]
async fn test_empty_playlist_is_still_ok() {
    let body = json!({ "playlistContent": "#EXTM3U\n" });

    let (status, response) =
        send_request(&app(), Method::POST, "/api/playlists/parse", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["entryCount"], 0);
    assert_eq!(response["data"]["entries"], json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/playlists/parse")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_returns_mpegurl() {
    let body = json!({
        "sourceId": "src",
        "playlistTitle": "Mine",
        "entries": [
            { "name": "One", "url": "http://x/1", "groupTitle": "News" },
            { "name": "Two", "url": "http://x/2" }
        ]
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/playlists/generate")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.apple.mpegurl"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("#EXTM3U\n#PLAYLIST:Mine\n"));
    assert!(text.contains("#EXTINF:-1 tvg-name=\"One\" group-title=\"News\",One\nhttp://x/1\n"));
    assert!(text.ends_with("#EXTINF:-1 tvg-name=\"Two\",Two\nhttp://x/2\n"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = send_request(&app(), Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_keeps_values_on_one_line() {
    let body = json!({
        "entries": [
            { "name": "Evil\n#EXTINF:-1,Injected\nhttp://evil/x", "url": "http://x/1" },
            { "name": "No Url", "url": "" }
        ]
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/playlists/generate")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    let reparsed = m3u_catalog::parser::parse(&text, "generated");
    assert_eq!(reparsed.entry_count, 1);
    assert_eq!(reparsed.entries[0].url, "http://x/1");
    assert_eq!(
        reparsed.entries[0].name,
        "Evil #EXTINF:-1,Injected http://evil/x"
    );
}

#[test]
fn test_invalid_listen_address_is_configuration_error() {
    let mut config = Config::default();
    config.web.host = "not an address".to_string();

    let handler = M3uSourceHandler::new(Arc::new(FixedFetcher));
    let err = WebServer::new(config, handler).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<m3u_catalog::errors::AppError>(),
        Some(m3u_catalog::errors::AppError::Configuration { .. })
    ));
}
