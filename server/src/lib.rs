pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod photos;
pub mod schema;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod validation;

use axum::http::Request;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<db::DbPool>;

/// The full HTTP application. Authentication is enforced per handler by the
/// `AuthUser` extractor, so public and protected routes share one router.
pub fn app(pool: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::public::router())
        .merge(api::user::router())
        .nest("/api/recipe/tags", api::tags::router())
        .nest("/api/recipe/ingredients", api::ingredients::router())
        .nest("/api/recipe/recipes", api::recipes::router())
        .nest("/api/photos", api::photos::router())
        .merge(swagger_ui)
        .fallback(error::not_found)
        .with_state(pool)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(telemetry::make_span)
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(telemetry::on_response)
                .on_failure(telemetry::on_failure),
        )
}
