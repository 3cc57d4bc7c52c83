use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::main_lib::AppState;

#[derive(Deserialize)]
struct VisitRequest {
    ip: Option<String>,
}

/// Records a page visit for analytics. Always accepted; the geo lookup
/// happens in the background and its failures are swallowed.
async fn record_visit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<VisitRequest>>,
) -> StatusCode {
    let ip = body
        .and_then(|Json(body)| body.ip)
        .or_else(|| forwarded_ip(&headers));

    if let Some(ip) = ip {
        state.visit_tracker.record_visit(&ip);
    }
    StatusCode::ACCEPTED
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/visits", post(record_visit))
}
