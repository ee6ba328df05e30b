use super::resource::{Resource, require_non_empty};
use crate::domain::value_objects::{ResourceId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    ProductOwner,
    ScrumMaster,
    #[default]
    Developer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: TeamRole,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TeamRole>,
}

impl Resource for TeamMember {
    type Draft = TeamMemberDraft;
    type Patch = TeamMemberPatch;

    const KIND: ResourceKind = ResourceKind::TeamMember;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn provisional(id: ResourceId, draft: &TeamMemberDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            role: draft.role,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &TeamMemberPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = Some(email.clone());
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        self.updated_at = Utc::now();
    }

    fn validate_draft(draft: &TeamMemberDraft) -> Result<(), String> {
        require_non_empty("name", &draft.name)?;
        if let Some(email) = &draft.email
            && !email.contains('@')
        {
            return Err(format!("Invalid email: {email}"));
        }
        Ok(())
    }
}
