use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Utc};
use serde_json::json;

use super::error::ApiError;
use super::response::{CountMeta, Envelope, PaginationMeta, RangeMeta};
use super::state::AppState;
use crate::services::{query, stats};
use crate::types::models::{HolderRecord, HolderStats};

const ENDPOINTS: [(&str, &str); 5] = [
    ("/api/wallet/:address", "Get data for a specific wallet"),
    (
        "/api/holders",
        "Get paginated list of holders (query params: page, limit)",
    ),
    ("/api/range/:from/:to", "Get holders in a specific rank range"),
    ("/api/top/:count", "Get top N holders"),
    ("/api/stats", "Get overall statistics"),
];

/// First value of `key` in the query string. Repeated keys are not an error.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

pub async fn index(headers: HeaderMap) -> Response {
    let wants_json = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"));

    if wants_json {
        let endpoints: Vec<String> = ENDPOINTS
            .iter()
            .map(|(path, description)| format!("{} - {}", path, description))
            .collect();
        return Json(json!({
            "api": "MITO Holders API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": endpoints,
        }))
        .into_response();
    }

    let items: String = ENDPOINTS
        .iter()
        .map(|(path, description)| {
            format!(
                r#"<div class="endpoint"><span class="method">GET</span> <code>{}</code><p>{}</p></div>"#,
                path, description
            )
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>MITO Holders API</title>
    <style>
        body {{ font-family: sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; }}
        .endpoint {{ border-left: 4px solid #3b82f6; padding: 8px 16px; margin-bottom: 16px; }}
        .method {{ background: #2563eb; color: white; padding: 2px 6px; border-radius: 4px; }}
    </style>
</head>
<body>
    <h1>MITO Holders API</h1>
    <p>Ranked MITO token holders with lookup, pagination, range and statistics queries.</p>
    {}
    <footer>MITO Holders API v{} | &copy; {} | Data excludes known whale wallets</footer>
</body>
</html>"#,
        items,
        env!("CARGO_PKG_VERSION"),
        Utc::now().year()
    ))
    .into_response()
}

pub async fn get_wallet(
    State(state): State<AppState>,
    address: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<HolderRecord>>, ApiError> {
    let Path(address) = address?;
    let holder = query::wallet(state.store.as_ref(), &address).await?;
    Ok(Json(Envelope::ok(holder)))
}

pub async fn get_holders(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Envelope<Vec<HolderRecord>, PaginationMeta>>, ApiError> {
    let (holders, pagination) = query::holders_page(
        state.store.as_ref(),
        first_param(&params, "page"),
        first_param(&params, "limit"),
    )
    .await?;
    Ok(Json(Envelope::with_meta(
        holders,
        PaginationMeta { pagination },
    )))
}

pub async fn get_range(
    State(state): State<AppState>,
    bounds: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Envelope<Vec<HolderRecord>, RangeMeta>>, ApiError> {
    let Path((from, to)) = bounds?;
    let (holders, range) = query::rank_range(state.store.as_ref(), &from, &to).await?;
    Ok(Json(Envelope::with_meta(holders, RangeMeta { range })))
}

pub async fn get_top(
    State(state): State<AppState>,
    count: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<Vec<HolderRecord>, CountMeta>>, ApiError> {
    let Path(count) = count?;
    let holders = query::top_holders(state.store.as_ref(), &count).await?;
    let count = holders.len();
    Ok(Json(Envelope::with_meta(holders, CountMeta { count })))
}

pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<Envelope<HolderStats>>, ApiError> {
    let stats = stats::compute_stats(state.store.as_ref()).await?;
    Ok(Json(Envelope::ok(stats)))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
