use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::products;
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub fn router(state: AppState, api_keys: ApiKeys, import_max_bytes: usize) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api/products",
            products::routes::routes(api_keys, import_max_bytes),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
