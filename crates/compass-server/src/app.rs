use crate::state::AppState;
use crate::{api, logging};
use axum::middleware;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "compass API",
        description = "Competitor positioning enrichment REST API",
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Competitors", description = "Positioning analysis updates")
    )
)]
struct ApiDoc;

pub fn build_http_app(state: AppState) -> Router {
    let (router, spec) = api::routes().split_for_parts();

    let mut merged_spec = ApiDoc::openapi();
    merged_spec.merge(spec);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", merged_spec))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging))
}
