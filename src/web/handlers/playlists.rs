//! Playlist parse and generate handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::{AppError, WebError};
use crate::models::PlaylistResult;
use crate::utils::UrlUtils;
use crate::web::responses::{bad_request, handle_error, ok};
use crate::web::AppState;

/// Source id used for inline playlist content when the caller gives none
pub const LOCAL_SOURCE_ID: &str = "local";

pub const MPEGURL_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

/// Body of `POST /api/playlists/parse`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsePlaylistRequest {
    pub playlist_url: Option<String>,
    pub playlist_content: Option<String>,
    pub source_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse inline playlist text, or fetch and parse a playlist URL
pub async fn parse_playlist(
    State(state): State<AppState>,
    payload: Result<Json<ParsePlaylistRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            return handle_error(AppError::Web(WebError::invalid_request(
                "body",
                rejection.body_text(),
            )))
        }
    };

    let source_id = non_empty(request.source_id);

    if let Some(content) = non_empty(request.playlist_content) {
        let source_id = source_id.unwrap_or_else(|| LOCAL_SOURCE_ID.to_string());
        debug!("Parsing {} bytes of inline playlist content", content.len());
        return ok(state.handler.parse_content(&content, &source_id));
    }

    let Some(url) = non_empty(request.playlist_url) else {
        return bad_request("Either playlistUrl or playlistContent is required");
    };

    info!(
        "Parse requested for playlist URL: {}",
        UrlUtils::obfuscate_credentials(&url)
    );

    match state.handler.fetch_and_parse(&url).await {
        Ok(mut result) => {
            if let Some(source_id) = source_id {
                result.source_id = source_id;
            }
            ok(result)
        }
        Err(e) => handle_error(e.into()),
    }
}

/// Render a parsed playlist back to extended M3U text
pub async fn generate_playlist(
    State(state): State<AppState>,
    payload: Result<Json<PlaylistResult>, JsonRejection>,
) -> Response {
    let Json(playlist) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            return handle_error(AppError::Web(WebError::invalid_request(
                "body",
                rejection.body_text(),
            )))
        }
    };

    let body = state.generator.generate(&playlist);
    ([(header::CONTENT_TYPE, MPEGURL_CONTENT_TYPE)], body).into_response()
}
