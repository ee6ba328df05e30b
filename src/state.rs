use crate::application::ports::MutationNotifier;
use crate::application::services::{MutationCoordinator, MutationOptions};
use crate::domain::entities::{Board, Epic, Resource, Sprint, Story, Task, TeamMember};
use crate::infrastructure::cache::MemoryQueryCache;
use crate::infrastructure::http::{ApiClient, HttpResourceClient};
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// アプリケーション全体の状態を管理する構造体
///
/// HTTP クライアントと取り消しスコープを共有し、リソース種別ごとに
/// キャッシュとコーディネーターを一つずつ持つ。
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: ApiClient,
    pub boards: MutationCoordinator<Board>,
    pub tasks: MutationCoordinator<Task>,
    pub sprints: MutationCoordinator<Sprint>,
    pub epics: MutationCoordinator<Epic>,
    pub stories: MutationCoordinator<Story>,
    pub team: MutationCoordinator<TeamMember>,
    scope: CancellationToken,
}

impl AppState {
    pub fn new(config: AppConfig, notifier: Arc<dyn MutationNotifier>) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;

        let api = ApiClient::new(&config.api)?;
        let options = MutationOptions::from(&config.mutation);
        let scope = CancellationToken::new();
        let max_keys = config.cache.max_keys;

        let state = Self {
            boards: coordinator(&api, &notifier, options, &scope, max_keys),
            tasks: coordinator(&api, &notifier, options, &scope, max_keys),
            sprints: coordinator(&api, &notifier, options, &scope, max_keys),
            epics: coordinator(&api, &notifier, options, &scope, max_keys),
            stories: coordinator(&api, &notifier, options, &scope, max_keys),
            team: coordinator(&api, &notifier, options, &scope, max_keys),
            config: Arc::new(config),
            api,
            scope,
        };
        info!(
            base_url = %state.api.base_url(),
            guest = state.api.credentials().is_guest(),
            "Client state initialized"
        );
        Ok(state)
    }

    pub fn scope(&self) -> &CancellationToken {
        &self.scope
    }

    /// 新しい変更の受付を止め、実行中の変更の通知を抑止する
    pub fn shutdown(&self) {
        self.scope.cancel();
    }
}

fn coordinator<R: Resource>(
    api: &ApiClient,
    notifier: &Arc<dyn MutationNotifier>,
    options: MutationOptions,
    scope: &CancellationToken,
    max_keys: usize,
) -> MutationCoordinator<R> {
    MutationCoordinator::new(
        Arc::new(HttpResourceClient::<R>::new(api.clone())),
        Arc::new(MemoryQueryCache::<R>::new(max_keys)),
        Arc::clone(notifier),
        options,
    )
    .with_scope(scope.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notification::TracingNotifier;
    use crate::application::error::MutationError;
    use crate::domain::value_objects::{QueryKey, ResourceId};

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.cache.max_keys = 0;
        let result = AppState::new(config, Arc::new(TracingNotifier));
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }

    #[tokio::test]
    async fn shutdown_cancels_every_coordinator() {
        let state = AppState::new(AppConfig::default(), Arc::new(TracingNotifier)).unwrap();
        state.shutdown();

        let id = ResourceId::new("b1".to_string()).unwrap();
        let result = state.boards.delete(&QueryKey::boards(), &id).await;
        assert_eq!(result, Err(MutationError::Cancelled));
        assert!(state.stories.scope().is_cancelled());
    }
}
