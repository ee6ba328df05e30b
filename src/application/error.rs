use crate::domain::value_objects::ResourceKind;
use crate::shared::AppError;
use serde_json::Value;
use thiserror::Error;

/// リモート呼び出しの失敗。HTTP 境界で一度だけ分類し、以降は再判定しない。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    #[error("Not authorized ({status}): {message}")]
    Authorization { status: u16, message: String },

    #[error("Quota exceeded: {message}")]
    QuotaExceeded {
        message: String,
        details: Option<Value>,
    },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Network error: {message}")]
    Network { status: Option<u16>, message: String },
}

impl RemoteError {
    pub fn network(message: impl Into<String>) -> Self {
        RemoteError::Network {
            status: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Validation { .. } => Some(400),
            RemoteError::Authorization { status, .. } => Some(*status),
            RemoteError::QuotaExceeded { .. } => Some(402),
            RemoteError::NotFound { .. } => Some(404),
            RemoteError::Network { status, .. } => *status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    /// 送信前に弾いた入力。キャッシュには何も適用していない。
    #[error("Validation error: {0}")]
    Validation(String),

    /// リモート呼び出しの失敗。キャッシュはロールバック済み。
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Mutation scope was cancelled")]
    Cancelled,
}

impl MutationError {
    /// ゲスト上限到達など、登録導線へ誘導すべき失敗かどうか
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, MutationError::Remote(RemoteError::QuotaExceeded { .. }))
    }

    /// トーストに出す文言
    pub fn user_message(&self, resource: ResourceKind) -> String {
        let noun = resource.label().to_lowercase();
        match self {
            MutationError::Validation(message) => message.clone(),
            MutationError::Remote(RemoteError::Validation { message, .. }) => message.clone(),
            MutationError::Remote(RemoteError::Authorization { .. }) => {
                format!("You are not allowed to change this {noun}")
            }
            MutationError::Remote(RemoteError::QuotaExceeded { message, .. }) => {
                format!("{message}. Register an account to create more")
            }
            MutationError::Remote(RemoteError::NotFound { .. }) => {
                format!("This {noun} no longer exists")
            }
            MutationError::Remote(RemoteError::Network { .. }) => {
                "Could not reach the server. Please try again later".to_string()
            }
            MutationError::Cancelled => "Cancelled".to_string(),
        }
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Validation { message, .. } => AppError::ValidationError(message),
            RemoteError::Authorization { message, .. } => AppError::Unauthorized(message),
            RemoteError::QuotaExceeded { message, .. } => AppError::QuotaExceeded(message),
            RemoteError::NotFound { message } => AppError::NotFound(message),
            RemoteError::Network { message, .. } => AppError::Network(message),
        }
    }
}

impl From<MutationError> for AppError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Validation(message) => AppError::ValidationError(message),
            MutationError::Remote(remote) => remote.into(),
            MutationError::Cancelled => AppError::Cancelled,
        }
    }
}
