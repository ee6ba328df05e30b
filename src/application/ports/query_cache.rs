use crate::domain::entities::{CollectionSnapshot, Resource};
use crate::domain::value_objects::{CacheVersion, QueryKey};

/// `transact` の中で見える現在値
#[derive(Debug)]
pub struct CacheView<'a, R> {
    pub snapshot: Option<&'a CollectionSnapshot<R>>,
    pub version: CacheVersion,
}

/// `transact` の結果としてキャッシュに行う書き込み
#[derive(Debug, Clone, PartialEq)]
pub enum CacheWrite<R> {
    Keep,
    Replace(CollectionSnapshot<R>),
}

/// クエリキー単位のコレクションキャッシュ。
///
/// 書き込みのたびにキーのバージョンが単調増加する。各操作は同期的に完了し、
/// `transact` は読み取りから書き込みまでを一つの臨界区間で行う。
pub trait QueryCache<R: Resource>: Send + Sync {
    fn get(&self, key: &QueryKey) -> Option<CollectionSnapshot<R>>;

    /// 未読込または無効化済みなら [`CacheVersion::ABSENT`]
    fn version(&self, key: &QueryKey) -> CacheVersion;

    fn set(&self, key: &QueryKey, snapshot: CollectionSnapshot<R>) -> CacheVersion;

    /// スナップショットを破棄する。次回参照時に再取得させる。
    fn invalidate(&self, key: &QueryKey) -> bool;

    /// 条件に合うキーをすべて無効化し、その件数を返す
    fn invalidate_where(&self, predicate: &dyn Fn(&QueryKey) -> bool) -> usize;

    fn keys(&self) -> Vec<QueryKey>;

    /// 現在値を見て書き込みを決める。戻り値は書き込み後のバージョン。
    fn transact(
        &self,
        key: &QueryKey,
        decide: &mut dyn FnMut(CacheView<'_, R>) -> CacheWrite<R>,
    ) -> CacheVersion;
}
