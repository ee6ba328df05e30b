use super::resource::{Resource, require_non_empty};
use crate::domain::value_objects::{ResourceId, ResourceKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: ResourceId,
    pub board_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub board_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// `Some(None)` で期限を外す
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskDraft {
    pub fn new(board_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
        }
    }
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Resource for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const KIND: ResourceKind = ResourceKind::Task;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn provisional(id: ResourceId, draft: &TaskDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            board_id: draft.board_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            position: u32::MAX,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.updated_at = Utc::now();
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    fn validate_draft(draft: &TaskDraft) -> Result<(), String> {
        require_non_empty("boardId", &draft.board_id)?;
        require_non_empty("title", &draft.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_date_can_be_cleared_by_patch() {
        let mut task = Task::provisional(
            ResourceId::temporary(),
            &TaskDraft {
                due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
                ..TaskDraft::new("b1", "Write docs")
            },
        );
        assert!(task.due_date.is_some());

        let patch = TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        };
        task.apply_patch(&patch);
        assert!(task.due_date.is_none());

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "dueDate": null }));
    }

    #[test]
    fn draft_requires_board() {
        assert!(Task::validate_draft(&TaskDraft::new("", "x")).is_err());
        assert!(Task::validate_draft(&TaskDraft::new("b1", "x")).is_ok());
    }

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_value(TaskPatch::status(TaskStatus::InProgress)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "in_progress" }));
    }
}
