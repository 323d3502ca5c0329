//! Visitor tracking handlers: record a page view and report the count.

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{Extensions, HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{VisitRequest, VisitTrackedResponse, VisitorCountResponse};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse, ValidationError};

const TRACK_FAILED: &str = "Failed to track visit.";
const COUNT_FAILED: &str = "Failed to get visitor count.";

/// `POST /visitors` — Record a page view.
///
/// The body is optional: an empty body records a visit to `/`.
///
/// # Errors
///
/// Returns [`ApiError`] with 400 on a malformed body and 500 when the
/// visit cannot be stored.
#[utoipa::path(
    post,
    path = "/api/visitors",
    tag = "Visitors",
    summary = "Track a page visit",
    description = "Stores one page view with the client address and user agent. No deduplication.",
    request_body(content = VisitRequest, description = "Optional; defaults to page `/`"),
    responses(
        (status = 201, description = "Visit recorded", body = VisitTrackedResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Visit could not be stored", body = ErrorResponse),
    )
)]
pub async fn track_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_visit_body(&body).map_err(|e| state.errors.reject(e.into(), TRACK_FAILED))?;

    let ip = client_ip(&headers, &extensions);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    state
        .visitors
        .track(req.page.as_deref(), ip.as_deref(), user_agent)
        .await
        .map_err(|e| state.errors.reject(e, TRACK_FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(VisitTrackedResponse { success: true }),
    ))
}

/// `GET /visitors/count` — Total number of recorded page views.
///
/// # Errors
///
/// Returns [`ApiError`] with 500 when the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/visitors/count",
    tag = "Visitors",
    summary = "Total visitor count",
    responses(
        (status = 200, description = "Total page views", body = VisitorCountResponse),
        (status = 500, description = "Count could not be read", body = ErrorResponse),
    )
)]
pub async fn visitor_count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let total = state
        .visitors
        .count()
        .await
        .map_err(|e| state.errors.reject(e, COUNT_FAILED))?;

    Ok(Json(VisitorCountResponse { total }))
}

/// Decodes the optional JSON body. Blank bodies mean "no fields".
fn parse_visit_body(body: &[u8]) -> Result<VisitRequest, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(VisitRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ValidationError::MalformedBody(e.to_string()))
}

/// Best-effort client address: first `X-Forwarded-For` entry, else the
/// socket peer when the server was started with connect info.
fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| {
            extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
}

/// Visitor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/visitors", post(track_visit))
        .route("/visitors/count", get(visitor_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn blank_body_means_defaults() {
        assert!(parse_visit_body(b"").is_ok_and(|r| r.page.is_none()));
        assert!(parse_visit_body(b"  \n").is_ok_and(|r| r.page.is_none()));
    }

    #[test]
    fn body_page_is_read() {
        let parsed = parse_visit_body(br#"{"page":"/projects"}"#);
        assert!(parsed.is_ok_and(|r| r.page.as_deref() == Some("/projects")));
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert!(matches!(
            parse_visit_body(b"{page"),
            Err(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn forwarded_header_wins_over_socket() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9000))));

        assert_eq!(
            client_ip(&headers, &extensions).as_deref(),
            Some("203.0.113.7")
        );
        assert_eq!(
            client_ip(&HeaderMap::new(), &extensions).as_deref(),
            Some("127.0.0.1")
        );
        assert_eq!(client_ip(&HeaderMap::new(), &Extensions::new()), None);
    }
}
