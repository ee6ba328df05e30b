use super::reconciliation;
use crate::application::error::{MutationError, RemoteError};
use crate::application::ports::{CacheWrite, MutationNotifier, QueryCache, RemoteResourceClient};
use crate::domain::entities::{
    CollectionSnapshot, Committed, FollowUp, MutationIntent, Notification, PendingMutation,
    Resource,
};
use crate::domain::value_objects::{DurableId, MutationKind, QueryKey, ResourceId};
use crate::shared::config::MutationConfig;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOptions {
    /// 並べ替え成功から再取得までの待ち時間
    pub reorder_settle: Duration,
    /// 成功後に同じ種別の別クエリキーを無効化するか
    pub invalidate_related: bool,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            reorder_settle: Duration::from_millis(500),
            invalidate_related: true,
        }
    }
}

impl From<&MutationConfig> for MutationOptions {
    fn from(config: &MutationConfig) -> Self {
        Self {
            reorder_settle: config.reorder_settle(),
            invalidate_related: config.invalidate_related,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// キャッシュにもサーバーにも存在しなかった
    AlreadyAbsent,
}

/// 並べ替え後の再取得タスク
#[derive(Debug)]
pub struct SettleHandle<R> {
    handle: JoinHandle<Result<CollectionSnapshot<R>, MutationError>>,
}

impl<R> SettleHandle<R> {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 再取得の完了を待ち、サーバー順のスナップショットを返す
    pub async fn wait(self) -> Result<CollectionSnapshot<R>, MutationError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(MutationError::Cancelled),
        }
    }
}

/// リソース種別ごとの楽観的更新コーディネーター。
///
/// 1 回の変更は「直前の状態を記録 → 投機的に適用 → リモート呼び出し →
/// 成功なら確定・失敗ならロールバック → 通知」の順に進む。キャッシュ操作は
/// すべて同期的な臨界区間で行い、await するのはリモート呼び出しだけ。
///
/// スコープ（`CancellationToken`）が取り消されると新しい変更は開始せず、
/// 実行中の変更は通知だけ抑止する。実行中のリクエスト自体は中断しない。
pub struct MutationCoordinator<R: Resource> {
    client: Arc<dyn RemoteResourceClient<R>>,
    cache: Arc<dyn QueryCache<R>>,
    notifier: Arc<dyn MutationNotifier>,
    options: MutationOptions,
    scope: CancellationToken,
}

impl<R: Resource> Clone for MutationCoordinator<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            cache: Arc::clone(&self.cache),
            notifier: Arc::clone(&self.notifier),
            options: self.options,
            scope: self.scope.clone(),
        }
    }
}

impl<R: Resource> MutationCoordinator<R> {
    pub fn new(
        client: Arc<dyn RemoteResourceClient<R>>,
        cache: Arc<dyn QueryCache<R>>,
        notifier: Arc<dyn MutationNotifier>,
        options: MutationOptions,
    ) -> Self {
        Self {
            client,
            cache,
            notifier,
            options,
            scope: CancellationToken::new(),
        }
    }

    pub fn with_scope(mut self, scope: CancellationToken) -> Self {
        self.scope = scope;
        self
    }

    /// 子スコープを持つコーディネーター。画面単位で取り消したい場合に使う。
    pub fn child(&self) -> Self {
        let mut child = self.clone();
        child.scope = self.scope.child_token();
        child
    }

    pub fn scope(&self) -> &CancellationToken {
        &self.scope
    }

    pub fn cache(&self) -> &Arc<dyn QueryCache<R>> {
        &self.cache
    }

    pub fn options(&self) -> MutationOptions {
        self.options
    }

    pub fn snapshot(&self, key: &QueryKey) -> Option<CollectionSnapshot<R>> {
        self.cache.get(key)
    }

    /// サーバーから一覧を取り直してスナップショットを置き換える
    pub async fn refresh(&self, key: &QueryKey) -> Result<CollectionSnapshot<R>, MutationError> {
        self.ensure_kind(key)?;
        let items = self.client.list(key).await.map_err(|err| {
            warn!(key = %key, error = %err, "Failed to refresh collection");
            MutationError::from(err)
        })?;
        let snapshot = CollectionSnapshot::new(items);
        let version = self.cache.set(key, snapshot.clone());
        debug!(key = %key, version = %version, count = snapshot.len(), "Collection refreshed");
        Ok(snapshot)
    }

    /// 未読込のときだけ取得する
    pub async fn ensure_loaded(
        &self,
        key: &QueryKey,
    ) -> Result<CollectionSnapshot<R>, MutationError> {
        match self.cache.get(key) {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh(key).await,
        }
    }

    pub async fn create(&self, key: &QueryKey, draft: R::Draft) -> Result<R, MutationError> {
        self.ensure_kind(key)?;
        self.ensure_active()?;
        if let Err(message) = R::validate_draft(&draft) {
            return Err(self.reject(MutationKind::Create, message));
        }

        let entry = R::provisional(ResourceId::temporary(), &draft);
        let pending = self.begin(key, MutationIntent::Create { entry });

        match self.client.create(key, &draft).await {
            Ok(entity) => {
                self.notify_success(&pending);
                // 通知と同じターンで ID を差し替えない
                tokio::task::yield_now().await;
                self.settle_success(&pending, Committed::Created(entity.clone()));
                Ok(entity)
            }
            Err(err) => Err(self.settle_failure(&pending, err)),
        }
    }

    pub async fn update(
        &self,
        key: &QueryKey,
        id: &ResourceId,
        patch: R::Patch,
    ) -> Result<R, MutationError> {
        self.ensure_kind(key)?;
        self.ensure_active()?;
        let durable = self.require_durable(MutationKind::Update, id)?;

        let pending = self.begin(
            key,
            MutationIntent::Update {
                id: id.clone(),
                patch: patch.clone(),
            },
        );

        match self.client.update(&durable, &patch).await {
            Ok(entity) => {
                self.settle_success(&pending, Committed::Updated(entity.clone()));
                self.notify_success(&pending);
                Ok(entity)
            }
            Err(err) => Err(self.settle_failure(&pending, err)),
        }
    }

    /// 読み込み済みのスナップショットに無い ID の削除は通信も通知もせず成功扱いにする。
    /// 未読込のキーでは存在を判断できないので、楽観的適用なしでそのまま送信する。
    pub async fn delete(
        &self,
        key: &QueryKey,
        id: &ResourceId,
    ) -> Result<DeleteOutcome, MutationError> {
        self.ensure_kind(key)?;
        self.ensure_active()?;

        let absent = self
            .cache
            .get(key)
            .is_some_and(|snapshot| !snapshot.contains(id));
        if absent {
            debug!(key = %key, id = %id, "Delete skipped: not in cache");
            return Ok(DeleteOutcome::AlreadyAbsent);
        }
        let durable = self.require_durable(MutationKind::Delete, id)?;

        let pending = self.begin(key, MutationIntent::Delete { id: id.clone() });

        match self.client.delete(&durable).await {
            Ok(()) => {
                self.settle_success(&pending, Committed::Deleted(id.clone()));
                self.notify_success(&pending);
                Ok(DeleteOutcome::Deleted)
            }
            Err(RemoteError::NotFound { message }) => {
                debug!(key = %key, id = %id, message = %message, "Delete target already gone on server");
                self.settle_success(&pending, Committed::Deleted(id.clone()));
                self.notify_success(&pending);
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(err) => Err(self.settle_failure(&pending, err)),
        }
    }

    /// 新しい順序を即座に反映し、成功後は settle 時間を置いてサーバー順で取り直す
    pub async fn reorder(
        &self,
        key: &QueryKey,
        ordered_ids: Vec<ResourceId>,
    ) -> Result<SettleHandle<R>, MutationError> {
        self.ensure_kind(key)?;
        self.ensure_active()?;
        if ordered_ids.is_empty() {
            return Err(self.reject(
                MutationKind::Reorder,
                "Ordering must contain at least one id".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = ordered_ids.iter().find(|id| !seen.insert(*id)) {
            return Err(self.reject(
                MutationKind::Reorder,
                format!("Duplicate id in ordering: {duplicate}"),
            ));
        }
        let durable = ordered_ids
            .iter()
            .map(|id| self.require_durable(MutationKind::Reorder, id))
            .collect::<Result<Vec<_>, _>>()?;

        let pending = self.begin(key, MutationIntent::Reorder { ids: ordered_ids });

        match self.client.reorder(key, &durable).await {
            Ok(()) => {
                self.settle_success(&pending, Committed::Reordered);
                self.notify_success(&pending);
                Ok(self.schedule_settle(key.clone()))
            }
            Err(err) => Err(self.settle_failure(&pending, err)),
        }
    }

    fn schedule_settle(&self, key: QueryKey) -> SettleHandle<R> {
        let coordinator = self.clone();
        let delay = self.options.reorder_settle;
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = coordinator.scope.cancelled() => {
                    // 取り直せないので次回参照時の再取得に任せる
                    coordinator.cache.invalidate(&key);
                    debug!(key = %key, "Reorder settle cancelled");
                    return Err(MutationError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
            coordinator.refresh(&key).await
        });
        SettleHandle { handle }
    }

    fn begin(&self, key: &QueryKey, intent: MutationIntent<R>) -> PendingMutation<R> {
        let mut pending = PendingMutation::new(key.clone(), intent);
        let mut previous = None;
        let mut speculative = None;

        let version = self.cache.transact(key, &mut |view| match view.snapshot {
            Some(current) => {
                let next = reconciliation::apply_intent(current, &pending.intent);
                previous = Some(current.clone());
                speculative = Some(next.clone());
                CacheWrite::Replace(next)
            }
            None => CacheWrite::Keep,
        });

        pending.previous = previous;
        pending.speculative = speculative;
        pending.applied_version = version;
        debug!(
            mutation_id = %pending.mutation_id,
            key = %key,
            kind = %pending.kind(),
            version = %version,
            optimistic = pending.was_applied(),
            "Mutation started"
        );
        pending
    }

    fn settle_success(&self, pending: &PendingMutation<R>, committed: Committed<R>) {
        let version = self.cache.transact(&pending.key, &mut |view| {
            reconciliation::commit(pending, view, &committed)
        });
        debug!(
            mutation_id = %pending.mutation_id,
            key = %pending.key,
            kind = %pending.kind(),
            version = %version,
            elapsed_ms = pending.elapsed_ms(),
            "Mutation committed"
        );

        if self.options.invalidate_related {
            let invalidated = self
                .cache
                .invalidate_where(&|other| other.is_sibling_of(&pending.key));
            if invalidated > 0 {
                debug!(key = %pending.key, invalidated, "Invalidated related queries");
            }
        }
    }

    fn settle_failure(&self, pending: &PendingMutation<R>, err: RemoteError) -> MutationError {
        let version = self
            .cache
            .transact(&pending.key, &mut |view| reconciliation::rollback(pending, view));
        warn!(
            mutation_id = %pending.mutation_id,
            key = %pending.key,
            kind = %pending.kind(),
            version = %version,
            elapsed_ms = pending.elapsed_ms(),
            error = %err,
            "Mutation failed, rolled back"
        );

        let error = MutationError::from(err);
        self.notify_failure(pending.kind(), &error);
        error
    }

    /// 送信前の検証エラー。キャッシュには触れない。
    fn reject(&self, kind: MutationKind, message: String) -> MutationError {
        warn!(resource = %R::KIND, kind = %kind, message = %message, "Mutation rejected");
        let error = MutationError::Validation(message);
        self.notify_failure(kind, &error);
        error
    }

    fn require_durable(&self, kind: MutationKind, id: &ResourceId) -> Result<DurableId, MutationError> {
        id.durable().ok_or_else(|| {
            self.reject(
                kind,
                format!("{} {} has not been saved yet", R::KIND.label(), id),
            )
        })
    }

    fn ensure_kind(&self, key: &QueryKey) -> Result<(), MutationError> {
        if key.kind() != R::KIND {
            return Err(MutationError::Validation(format!(
                "Query key {key} does not hold {}",
                R::KIND
            )));
        }
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), MutationError> {
        if self.scope.is_cancelled() {
            return Err(MutationError::Cancelled);
        }
        Ok(())
    }

    fn notify_success(&self, pending: &PendingMutation<R>) {
        self.notify(Notification::success(R::KIND, pending.kind()));
    }

    fn notify_failure(&self, kind: MutationKind, error: &MutationError) {
        let mut notification = Notification::failure(R::KIND, kind, error.user_message(R::KIND));
        if error.is_quota_exceeded() {
            notification = notification.with_follow_up(FollowUp::Register);
        }
        self.notify(notification);
    }

    fn notify(&self, notification: Notification) {
        if self.scope.is_cancelled() {
            debug!(message = %notification.message, "Notification suppressed: scope cancelled");
            return;
        }
        self.notifier.notify(&notification);
    }
}
