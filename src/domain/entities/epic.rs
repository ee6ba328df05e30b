use super::resource::{Resource, require_non_empty};
use crate::domain::value_objects::{ResourceId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpicDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpicPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Resource for Epic {
    type Draft = EpicDraft;
    type Patch = EpicPatch;

    const KIND: ResourceKind = ResourceKind::Epic;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn provisional(id: ResourceId, draft: &EpicDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            color: draft.color.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &EpicPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        self.updated_at = Utc::now();
    }

    fn validate_draft(draft: &EpicDraft) -> Result<(), String> {
        require_non_empty("title", &draft.title)
    }
}
