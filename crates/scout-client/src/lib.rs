pub mod config;
pub mod jsearch;

pub use config::{ApiConfig, DEFAULT_API_HOST};
pub use jsearch::JSearchClient;
