pub mod board;
pub mod epic;
pub mod notification;
pub mod pending_mutation;
pub mod resource;
pub mod snapshot;
pub mod sprint;
pub mod story;
pub mod task;
pub mod team_member;

pub use board::{Board, BoardDraft, BoardPatch};
pub use epic::{Epic, EpicDraft, EpicPatch};
pub use notification::{FollowUp, Notification, NotificationLevel};
pub use pending_mutation::{Committed, MutationIntent, PendingMutation};
pub use resource::Resource;
pub use snapshot::CollectionSnapshot;
pub use sprint::{Sprint, SprintDraft, SprintPatch, SprintStatus};
pub use story::{Story, StoryDraft, StoryPatch, StoryStatus};
pub use task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
pub use team_member::{TeamMember, TeamMemberDraft, TeamMemberPatch, TeamRole};
