use crate::domain::value_objects::{MutationKind, ResourceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// 汎用エラー表示の代わりに UI が誘導すべき導線
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUp {
    /// ゲストの上限到達。アカウント登録へ誘導する。
    Register,
}

/// 変更の成否をユーザーへ伝えるトースト相当のイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,
    pub resource: ResourceKind,
    pub mutation: MutationKind,
}

impl Notification {
    pub fn success(resource: ResourceKind, mutation: MutationKind) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: format!("{} {}", resource.label(), mutation.past_tense()),
            follow_up: None,
            resource,
            mutation,
        }
    }

    pub fn failure(resource: ResourceKind, mutation: MutationKind, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            follow_up: None,
            resource,
            mutation,
        }
    }

    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    pub fn requires_registration(&self) -> bool {
        self.follow_up == Some(FollowUp::Register)
    }
}
