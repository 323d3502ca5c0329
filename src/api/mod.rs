//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api`.

pub mod dto;
pub mod handlers;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of every route.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "portfolio-backend",
        description = "Contact messages, visitor counts and a health check."
    ),
    paths(
        handlers::system::health_handler,
        handlers::contact::create_message,
        handlers::contact::list_messages,
        handlers::visitor::track_visit,
        handlers::visitor::visitor_count,
    ),
    tags(
        (name = "System", description = "Health check"),
        (name = "Contact", description = "Contact form messages"),
        (name = "Visitors", description = "Page view tracking"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new().nest("/api", handlers::routes())
}

/// Builds the servable application: routes, docs, middleware and state.
pub fn build_app(state: AppState) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/contact",
            "/api/messages",
            "/api/visitors",
            "/api/visitors/count",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
