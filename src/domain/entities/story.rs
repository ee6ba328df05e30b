use super::resource::{Resource, require_non_empty};
use crate::domain::value_objects::{ResourceId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    #[default]
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` はバックログ
    #[serde(default)]
    pub sprint_id: Option<String>,
    #[serde(default)]
    pub epic_id: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub status: StoryStatus,
    #[serde(default)]
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

/// 二重の `Option` は「変更しない」と「null にする」を区別する
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StoryStatus>,
}

impl StoryDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl StoryPatch {
    /// スプリント間の移動。`None` でバックログへ戻す。
    pub fn move_to_sprint(sprint_id: Option<String>) -> Self {
        Self {
            sprint_id: Some(sprint_id),
            ..Self::default()
        }
    }
}

impl Resource for Story {
    type Draft = StoryDraft;
    type Patch = StoryPatch;

    const KIND: ResourceKind = ResourceKind::Story;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn provisional(id: ResourceId, draft: &StoryDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            sprint_id: draft.sprint_id.clone(),
            epic_id: draft.epic_id.clone(),
            assignee_id: draft.assignee_id.clone(),
            points: draft.points,
            status: StoryStatus::Backlog,
            position: u32::MAX,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &StoryPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(sprint_id) = &patch.sprint_id {
            self.sprint_id = sprint_id.clone();
        }
        if let Some(epic_id) = &patch.epic_id {
            self.epic_id = epic_id.clone();
        }
        if let Some(assignee_id) = &patch.assignee_id {
            self.assignee_id = assignee_id.clone();
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    fn validate_draft(draft: &StoryDraft) -> Result<(), String> {
        require_non_empty("title", &draft.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_to_backlog_clears_sprint() {
        let mut story = Story::provisional(
            ResourceId::temporary(),
            &StoryDraft {
                sprint_id: Some("s1".to_string()),
                ..StoryDraft::new("Login form")
            },
        );
        story.apply_patch(&StoryPatch::move_to_sprint(None));
        assert!(story.sprint_id.is_none());

        let json = serde_json::to_value(StoryPatch::move_to_sprint(None)).unwrap();
        assert_eq!(json, serde_json::json!({ "sprintId": null }));
    }
}
