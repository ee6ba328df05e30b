use super::resource::{Resource, require_non_empty};
use crate::domain::value_objects::{ResourceId, ResourceKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    #[default]
    Planned,
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub status: SprintStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SprintDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SprintPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SprintStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Resource for Sprint {
    type Draft = SprintDraft;
    type Patch = SprintPatch;

    const KIND: ResourceKind = ResourceKind::Sprint;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn provisional(id: ResourceId, draft: &SprintDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: draft.name.clone(),
            goal: draft.goal.clone(),
            status: SprintStatus::Planned,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &SprintPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(goal) = &patch.goal {
            self.goal = Some(goal.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        self.updated_at = Utc::now();
    }

    fn validate_draft(draft: &SprintDraft) -> Result<(), String> {
        require_non_empty("name", &draft.name)?;
        if let (Some(start), Some(end)) = (draft.start_date, draft.end_date)
            && end < start
        {
            return Err("endDate must not be before startDate".to_string());
        }
        Ok(())
    }
}
