pub mod entities;
pub mod value_objects;

pub use entities::{
    Board, CollectionSnapshot, Committed, Epic, MutationIntent, Notification, PendingMutation,
    Resource, Sprint, Story, Task, TeamMember,
};
pub use value_objects::{CacheVersion, DurableId, MutationKind, QueryKey, ResourceId, ResourceKind};
