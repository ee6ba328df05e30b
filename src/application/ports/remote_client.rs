use crate::application::error::RemoteError;
use crate::domain::entities::Resource;
use crate::domain::value_objects::{DurableId, QueryKey};
use async_trait::async_trait;

/// リソース種別ごとのリモート API ポート。
///
/// 各メソッドは一度だけ通信し、再試行はしない。ID は [`DurableId`] のみ受け付けるので
/// 仮 ID がリクエストに載ることはない。
#[async_trait]
pub trait RemoteResourceClient<R: Resource>: Send + Sync {
    /// クエリキーに対応するコレクションを取得
    async fn list(&self, key: &QueryKey) -> Result<Vec<R>, RemoteError>;

    /// `key` は作成先の親（タスクのボードなど）を決めるために使う
    async fn create(&self, key: &QueryKey, draft: &R::Draft) -> Result<R, RemoteError>;

    async fn update(&self, id: &DurableId, patch: &R::Patch) -> Result<R, RemoteError>;

    async fn delete(&self, id: &DurableId) -> Result<(), RemoteError>;

    async fn reorder(&self, key: &QueryKey, ordered_ids: &[DurableId]) -> Result<(), RemoteError>;
}
