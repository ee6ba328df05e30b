pub mod notifier;
pub mod query_cache;
pub mod remote_client;

pub use notifier::MutationNotifier;
pub use query_cache::{CacheView, CacheWrite, QueryCache};
pub use remote_client::RemoteResourceClient;
