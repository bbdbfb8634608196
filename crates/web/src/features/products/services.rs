use importer::{CsvProductImporter, DatabaseProductSink, ImportPolicy};
use sqlx::PgPool;
use storage::{
    ProductRepository,
    dto::{
        common::PaginatedResponse,
        import::ImportReport,
        product::{ProductListParams, ProductResponse, UpsertProductRequest},
    },
    error::Result,
    models::Product,
};

/// List products page by page
pub async fn list_products(
    pool: &PgPool,
    params: &ProductListParams,
) -> Result<PaginatedResponse<ProductResponse>> {
    let repo = ProductRepository::new(pool);

    let total = repo.count(params).await?;
    let products = repo.list(params).await?;

    Ok(PaginatedResponse::new(
        products.into_iter().map(ProductResponse::from).collect(),
        params.page,
        params.page_size,
        total,
    ))
}

/// Get product by slug
pub async fn get_product_by_slug(pool: &PgPool, slug: &str) -> Result<Product> {
    let repo = ProductRepository::new(pool);
    repo.find_by_slug(slug).await
}

/// Create a product, or update the one sharing its slug
pub async fn upsert_product(pool: &PgPool, request: &UpsertProductRequest) -> Result<Product> {
    let repo = ProductRepository::new(pool);
    repo.upsert(request).await
}

/// Delete a product
pub async fn delete_product(pool: &PgPool, slug: &str) -> Result<()> {
    let repo = ProductRepository::new(pool);
    repo.delete_by_slug(slug).await
}

/// Run a bulk CSV import straight into the database
pub async fn import_products(
    pool: &PgPool,
    policy: ImportPolicy,
    content: &str,
) -> importer::Result<ImportReport> {
    let importer = CsvProductImporter::new(DatabaseProductSink::new(pool.clone())).with_policy(policy);
    let result = importer.import(content).await?;

    Ok(ImportReport::from(result))
}
