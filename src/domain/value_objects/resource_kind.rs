use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Board,
    Task,
    Sprint,
    Epic,
    Story,
    TeamMember,
}

impl ResourceKind {
    /// クエリキーに使うコレクション名
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Board => "boards",
            ResourceKind::Task => "tasks",
            ResourceKind::Sprint => "sprints",
            ResourceKind::Epic => "epics",
            ResourceKind::Story => "stories",
            ResourceKind::TeamMember => "team",
        }
    }

    /// 通知メッセージ用の表示名
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Board => "Board",
            ResourceKind::Task => "Task",
            ResourceKind::Sprint => "Sprint",
            ResourceKind::Epic => "Epic",
            ResourceKind::Story => "Story",
            ResourceKind::TeamMember => "Team member",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
