//! Data module - CSV loading and schema checks

mod loader;
pub mod schema;

pub use loader::{Dataset, LoadError, DEFAULT_DATA_PATH};
pub use schema::SchemaError;
