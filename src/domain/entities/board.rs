use super::resource::{Resource, require_non_empty};
use crate::domain::value_objects::{ResourceId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BoardDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

impl BoardPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl Resource for Board {
    type Draft = BoardDraft;
    type Patch = BoardPatch;

    const KIND: ResourceKind = ResourceKind::Board;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn provisional(id: ResourceId, draft: &BoardDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            // 末尾に追加されるので表示順はサーバー応答で確定する
            position: u32::MAX,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &BoardPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        self.updated_at = Utc::now();
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    fn validate_draft(draft: &BoardDraft) -> Result<(), String> {
        require_non_empty("title", &draft.title)
    }
}

#[cfg(test)]
impl Board {
    pub(crate) fn fixture(id: &str, title: &str) -> Self {
        let now = Utc::now();
        Self {
            id: ResourceId::new(id.to_string()).unwrap(),
            title: title.to_string(),
            description: None,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
