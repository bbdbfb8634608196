pub mod common;
pub mod import;
pub mod product;
