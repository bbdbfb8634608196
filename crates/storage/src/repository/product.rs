use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::dto::product::{ProductListParams, UpsertProductRequest};
use crate::error::{Result, StorageError};
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "product_id, name, slug, price, category, description, stock, \
                               featured, status, created_at, updated_at";

pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, with optional category and status filters
    pub async fn list(&self, params: &ProductListParams) -> Result<Vec<Product>> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
        push_filters(&mut query, params);
        query
            .push(" ORDER BY created_at DESC, slug LIMIT ")
            .push_bind(params.limit())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let products = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Count products matching the listing filters
    pub async fn count(&self, params: &ProductListParams) -> Result<i64> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut query, params);

        let total: i64 = query.build_query_scalar::<i64>().fetch_one(self.pool).await?;
        Ok(total)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE slug = $1",
            PRODUCT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(product)
    }

    /// Insert a product, or update the existing row with the same slug.
    /// The id of an existing row is never changed.
    pub async fn upsert(&self, request: &UpsertProductRequest) -> Result<Product> {
        let product_id = request.id.unwrap_or_else(Uuid::new_v4);

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (product_id, name, slug, price, category, description, stock, featured, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (slug)
            DO UPDATE SET
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                category = EXCLUDED.category,
                description = EXCLUDED.description,
                stock = EXCLUDED.stock,
                featured = EXCLUDED.featured,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .bind(&request.name)
        .bind(&request.slug)
        .bind(request.price)
        .bind(&request.category)
        .bind(&request.description)
        .bind(request.stock)
        .bind(request.featured)
        .bind(request.status.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify("upsert product"))?;

        debug!(slug = %product.slug, product_id = %product.product_id, "Upserted product");

        Ok(product)
    }

    pub async fn delete_by_slug(&self, slug: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE slug = $1")
            .bind(slug)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, params: &ProductListParams) {
    let mut separator = " WHERE ";

    if let Some(category) = &params.category {
        query.push(separator).push("category = ").push_bind(category.clone());
        separator = " AND ";
    }
    if let Some(status) = params.status {
        query.push(separator).push("status = ").push_bind(status.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductStatus;
    use rust_decimal::Decimal;

    #[test]
    fn test_filters_render_in_order() {
        let params = ProductListParams {
            category: Some("indoor".to_string()),
            status: Some(ProductStatus::Draft),
            ..Default::default()
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM products WHERE category = $1 AND status = $2"
        );
    }

    #[test]
    fn test_no_filters_leaves_query_untouched() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut query, &ProductListParams::default());
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM products");
    }

    #[tokio::test]
    #[ignore] // Needs DATABASE_URL pointing at a disposable Postgres
    async fn test_upsert_keeps_id_on_slug_conflict() {
        let url = std::env::var("DATABASE_URL").unwrap();
        let db = crate::Database::new(&url).await.unwrap();
        db.run_migrations().await.unwrap();
        let repo = ProductRepository::new(db.pool());

        let mut request = UpsertProductRequest {
            id: Some(Uuid::new_v4()),
            name: "Areca Palm".to_string(),
            slug: format!("areca-palm-{}", Uuid::new_v4().simple()),
            price: Decimal::new(699, 0),
            category: "indoor".to_string(),
            description: "A lovely palm".to_string(),
            stock: 32,
            featured: false,
            status: ProductStatus::Active,
        };
        let first = repo.upsert(&request).await.unwrap();

        request.id = Some(Uuid::new_v4());
        request.stock = 5;
        let second = repo.upsert(&request).await.unwrap();

        assert_eq!(first.product_id, second.product_id);
        assert_eq!(second.stock, 5);

        repo.delete_by_slug(&request.slug).await.unwrap();
    }
}
