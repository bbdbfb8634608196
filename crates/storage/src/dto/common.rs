use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const MAX_PAGE_SIZE: u32 = 100;

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Checks page bounds shared by every paginated listing.
pub fn check_page_bounds(page: u32, page_size: u32) -> Result<(), String> {
    if page < 1 {
        return Err("page must be >= 1".to_string());
    }
    if page_size < 1 || page_size > MAX_PAGE_SIZE {
        return Err(format!("page_size must be between 1 and {}", MAX_PAGE_SIZE));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_items = total_items.max(0);
        let total_pages = (total_items as u64).div_ceil(page_size.max(1) as u64) as u32;
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u32, page_size: u32, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(page, page_size, total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 24, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 24, 24).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 24, 25).total_pages, 2);
    }

    #[test]
    fn test_page_bounds() {
        assert!(check_page_bounds(1, 24).is_ok());
        assert!(check_page_bounds(0, 24).is_err());
        assert!(check_page_bounds(1, 0).is_err());
        assert!(check_page_bounds(1, MAX_PAGE_SIZE + 1).is_err());
    }
}
