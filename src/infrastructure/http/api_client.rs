use super::error_mapping;
use crate::application::error::RemoteError;
use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;
use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

const GUEST_COOKIE: &str = "guestId";

/// リクエストに付与する認証情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// ログイン済みセッション（Bearer トークン）
    Session(String),
    /// 未ログインのゲスト。Cookie の `guestId` で識別される
    Guest(String),
    Anonymous,
}

impl Credentials {
    pub fn from_config(config: &ApiConfig) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        if let Some(token) = non_empty(&config.session_token) {
            Credentials::Session(token)
        } else if let Some(guest_id) = non_empty(&config.guest_id) {
            Credentials::Guest(guest_id)
        } else {
            Credentials::Anonymous
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Credentials::Guest(_))
    }
}

/// タスク管理 API への HTTP クライアント
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    credentials: Credentials,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| AppError::ConfigurationError(format!("Invalid API base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::ConfigurationError(format!(
                "API base URL cannot carry a path: {trimmed}"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            base_url,
            credentials: Credentials::from_config(config),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// セグメントは個別にパーセントエンコードされる
    pub(crate) fn url(&self, segments: &[String]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[String]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(method = %method, url = %url, "API request");
        let builder = self.http.request(method, url);
        match &self.credentials {
            Credentials::Session(token) => builder.bearer_auth(token),
            Credentials::Guest(guest_id) => builder.header(COOKIE, format!("{GUEST_COOKIE}={guest_id}")),
            Credentials::Anonymous => builder,
        }
    }

    /// 成功ステータス以外はここで [`RemoteError`] に分類する
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let response = builder.send().await.map_err(error_mapping::from_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_mapping::from_status(status, &body);
        debug!(status = status.as_u16(), error = %err, "API request failed");
        Err(err)
    }

    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = self.execute(builder).await?;
        response.json::<T>().await.map_err(error_mapping::from_transport)
    }
}
