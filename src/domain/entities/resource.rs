use crate::domain::value_objects::{ResourceId, ResourceKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// 楽観的更新の対象となるエンティティ。
///
/// ボード・タスク・スクラム系エンティティはすべてこの形に揃える。
/// `Draft` は作成リクエスト、`Patch` は部分更新リクエストのボディになる。
pub trait Resource:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Draft: Clone + Debug + Serialize + Send + Sync + 'static;
    type Patch: Clone + Debug + Serialize + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> &ResourceId;

    /// 作成応答を待つ間キャッシュに置く仮エンティティ
    fn provisional(id: ResourceId, draft: &Self::Draft) -> Self;

    fn apply_patch(&mut self, patch: &Self::Patch);

    /// 並べ替え時に表示順を書き換える。順序を持たない種別は何もしない。
    fn set_position(&mut self, _position: u32) {}

    /// 送信前のクライアント側バリデーション
    fn validate_draft(_draft: &Self::Draft) -> Result<(), String> {
        Ok(())
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}
