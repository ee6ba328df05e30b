use crate::application::error::RemoteError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

pub(crate) const QUOTA_EXCEEDED_CODE: &str = "QUOTA_EXCEEDED";

/// API のエラーレスポンス（`{ code, message, details }`、旧形式は `{ error }`）
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<Value>,
}

/// 失敗ステータスとボディから [`RemoteError`] を決める
pub(crate) fn from_status(status: StatusCode, body: &str) -> RemoteError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| plain_text(body))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    if status == StatusCode::PAYMENT_REQUIRED
        || parsed.code.as_deref() == Some(QUOTA_EXCEEDED_CODE)
    {
        return RemoteError::QuotaExceeded {
            message,
            details: parsed.details,
        };
    }

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => RemoteError::Validation {
            message,
            details: parsed.details,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Authorization {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => RemoteError::NotFound { message },
        _ => RemoteError::Network {
            status: Some(status.as_u16()),
            message,
        },
    }
}

/// 送信失敗・タイムアウト・応答の復号失敗
pub(crate) fn from_transport(err: reqwest::Error) -> RemoteError {
    let message = if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_decode() {
        format!("Invalid response body: {err}")
    } else {
        err.to_string()
    };
    RemoteError::Network {
        status: err.status().map(|s| s.as_u16()),
        message,
    }
}

fn plain_text(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.starts_with('<') {
        None
    } else {
        Some(trimmed.chars().take(200).collect())
    }
}
