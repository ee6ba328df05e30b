use super::{CollectionSnapshot, Resource};
use crate::domain::value_objects::{CacheVersion, MutationKind, QueryKey, ResourceId};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 楽観的に適用する変更内容
#[derive(Debug, Clone)]
pub enum MutationIntent<R: Resource> {
    /// 仮 ID を持つ仮エンティティを末尾に追加
    Create { entry: R },
    Update { id: ResourceId, patch: R::Patch },
    Delete { id: ResourceId },
    Reorder { ids: Vec<ResourceId> },
}

impl<R: Resource> MutationIntent<R> {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationIntent::Create { .. } => MutationKind::Create,
            MutationIntent::Update { .. } => MutationKind::Update,
            MutationIntent::Delete { .. } => MutationKind::Delete,
            MutationIntent::Reorder { .. } => MutationKind::Reorder,
        }
    }

    /// 単一エンティティを対象とする変更ならその ID
    pub fn target(&self) -> Option<&ResourceId> {
        match self {
            MutationIntent::Create { entry } => Some(entry.id()),
            MutationIntent::Update { id, .. } | MutationIntent::Delete { id } => Some(id),
            MutationIntent::Reorder { .. } => None,
        }
    }
}

/// サーバーが確定させた結果
#[derive(Debug, Clone, PartialEq)]
pub enum Committed<R> {
    Created(R),
    Updated(R),
    Deleted(ResourceId),
    Reordered,
}

/// 開始から確定（成功・失敗）までの間だけ存在する変更記録。
///
/// `previous` と `speculative` はスナップショットが読み込み済みのキーでのみ `Some` になる。
/// 未読込のキーには楽観的な上書きを行わない。
#[derive(Debug, Clone)]
pub struct PendingMutation<R: Resource> {
    pub mutation_id: Uuid,
    pub key: QueryKey,
    pub intent: MutationIntent<R>,
    pub previous: Option<CollectionSnapshot<R>>,
    pub speculative: Option<CollectionSnapshot<R>>,
    /// 楽観的適用の書き込みで得たバージョン
    pub applied_version: CacheVersion,
    pub started_at: DateTime<Utc>,
}

impl<R: Resource> PendingMutation<R> {
    pub fn new(key: QueryKey, intent: MutationIntent<R>) -> Self {
        Self {
            mutation_id: Uuid::new_v4(),
            key,
            intent,
            previous: None,
            speculative: None,
            applied_version: CacheVersion::ABSENT,
            started_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> MutationKind {
        self.intent.kind()
    }

    pub fn target(&self) -> Option<&ResourceId> {
        self.intent.target()
    }

    pub fn was_applied(&self) -> bool {
        self.speculative.is_some()
    }

    /// 開始からの経過ミリ秒
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}
