use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{delete_product, get_product, import_products, list_products, upsert_product};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys, import_max_bytes: usize) -> Router<AppState> {
    let protected = Router::new()
        .route("/", put(upsert_product))
        .route("/:slug", delete(delete_product))
        .route(
            "/import",
            post(import_products).layer(DefaultBodyLimit::max(import_max_bytes)),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_products))
        .route("/:slug", get(get_product))
        .merge(protected)
}
