use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmClient, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::CorsSettings;
use crate::presentation::handlers::{analyze_handler, health_handler};
use crate::presentation::state::AppState;

pub fn create_router<E, L>(state: AppState<E, L>) -> Router
where
    E: TranscriptionEngine + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let cors = cors_layer(&state.settings.cors);
    let body_limit = DefaultBodyLimit::max(state.settings.uploads.max_body_bytes());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze/", post(analyze_handler::<E, L>))
        .route("/analyze", post(analyze_handler::<E, L>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// One allowed origin with credentials; methods and headers are mirrored since
/// wildcards cannot be combined with credentials.
fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origin = match settings.origin_header() {
        Ok(origin) => AllowOrigin::list([origin]),
        Err(e) => {
            tracing::error!(
                origin = %settings.allowed_origin,
                error = %e,
                "Invalid CORS origin, cross-origin requests will be refused"
            );
            AllowOrigin::list(Vec::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
