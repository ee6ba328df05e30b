pub mod api_client;
mod error_mapping;
pub mod resource_client;
mod routes;

pub use api_client::{ApiClient, Credentials};
pub use resource_client::HttpResourceClient;
