pub mod cache;
pub mod http;
pub mod notification;

pub use cache::MemoryQueryCache;
pub use http::{ApiClient, Credentials, HttpResourceClient};
pub use notification::{ChannelNotifier, CompositeNotifier, TracingNotifier};
