use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{check_page_bounds, default_page, default_page_size};
use crate::models::ProductStatus;

/// Response containing catalog product information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
    pub stock: i32,
    pub featured: bool,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<crate::models::Product> for ProductResponse {
    fn from(product: crate::models::Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name,
            slug: product.slug,
            price: product.price,
            category: product.category,
            description: product.description,
            stock: product.stock,
            featured: product.featured,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Request payload for creating or updating a product, keyed by slug
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertProductRequest {
    /// Client-generated id, used only when the slug does not exist yet
    #[serde(default)]
    pub id: Option<Uuid>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Slug must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub status: ProductStatus,
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let is_valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_slug"))
    }
}

fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Query parameters for the catalog listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
}

impl Default for ProductListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            category: None,
            status: None,
        }
    }
}

impl ProductListParams {
    pub fn validate(&self) -> Result<(), String> {
        check_page_bounds(self.page, self.page_size)
    }

    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) as i64) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request(slug: &str, price: &str, stock: i32) -> UpsertProductRequest {
        UpsertProductRequest {
            id: None,
            name: "Areca Palm".to_string(),
            slug: slug.to_string(),
            price: Decimal::from_str(price).unwrap(),
            category: "indoor".to_string(),
            description: "A lovely palm".to_string(),
            stock,
            featured: false,
            status: ProductStatus::Active,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("areca-palm", "699", 32).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_slug() {
        let errors = request("Areca Palm", "699", 32).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));

        assert!(request("-areca", "699", 32).validate().is_err());
    }

    #[test]
    fn test_rejects_negative_price_and_stock() {
        let errors = request("areca-palm", "-1", -3).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("stock"));
    }

    #[test]
    fn test_status_and_featured_default_when_omitted() {
        let json = r#"{
            "name": "Snake Plant",
            "slug": "snake-plant",
            "price": "349",
            "category": "indoor",
            "description": "Hardy",
            "stock": 10
        }"#;
        let req: UpsertProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, ProductStatus::Active);
        assert!(!req.featured);
        assert!(req.id.is_none());
    }

    #[test]
    fn test_list_params_offset() {
        let params = ProductListParams {
            page: 3,
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 10);
    }
}
