mod api;
mod database;

pub use api::{ApiProductClient, StaticToken, TokenProvider};
pub use database::DatabaseProductSink;
