pub mod cache_version;
pub mod mutation_kind;
pub mod query_key;
pub mod resource_id;
pub mod resource_kind;

pub use cache_version::CacheVersion;
pub use mutation_kind::MutationKind;
pub use query_key::QueryKey;
pub use resource_id::{DurableId, ResourceId, TEMP_ID_PREFIX};
pub use resource_kind::ResourceKind;
