pub mod catalog_client;
pub mod handlers;
pub mod models;
pub mod routes;

pub use catalog_client::CatalogClient;
