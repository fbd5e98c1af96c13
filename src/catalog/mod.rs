pub mod error;
pub mod field_validation;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod price_calculator;
pub mod repository;
pub mod service;
pub mod store;
pub mod tax_resolver;

pub use error::*;
pub use memory::InMemoryCatalog;
pub use models::*;
pub use price_calculator::*;
pub use service::CatalogService;
pub use tax_resolver::*;
