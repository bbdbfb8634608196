use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        import::ImportReport,
        product::{ProductListParams, ProductResponse, UpsertProductRequest},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Paginated product catalog", body = PaginatedResponse<ProductResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(db): State<Database>,
    Query(params): Query<ProductListParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = services::list_products(db.pool(), &params).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let product = services::get_product_by_slug(db.pool(), &slug).await?;

    Ok(Json(ProductResponse::from(product)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/products",
    request_body = UpsertProductRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Product created or updated", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Constraint violation")
    ),
    tag = "products"
)]
pub async fn upsert_product(
    State(db): State<Database>,
    Json(req): Json<UpsertProductRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let product = services::upsert_product(db.pool(), &req).await?;

    Ok(Json(ProductResponse::from(product)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    services::delete_product(db.pool(), &slug).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/products/import",
    request_body(content = String, content_type = "text/csv", description = "CSV with header name,slug,price,category,description,stock"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every row was imported", body = ImportReport),
        (status = 422, description = "Header rejected or rows failed validation", body = ImportReport),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "File too large")
    ),
    tag = "products"
)]
pub async fn import_products(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, WebError> {
    let report = services::import_products(state.db.pool(), state.import_policy, &body).await?;

    let status = if report.is_clean() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((status, Json(report)).into_response())
}
