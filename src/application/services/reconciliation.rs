//! 楽観的適用・確定・ロールバックのスナップショット計算。
//!
//! どれもキャッシュに触れない純粋関数で、`QueryCache::transact` の中から呼ばれる。

use crate::application::ports::{CacheView, CacheWrite};
use crate::domain::entities::{CollectionSnapshot, Committed, MutationIntent, PendingMutation, Resource};

/// 変更内容をスナップショットへ投機的に適用した結果を返す
pub fn apply_intent<R: Resource>(
    snapshot: &CollectionSnapshot<R>,
    intent: &MutationIntent<R>,
) -> CollectionSnapshot<R> {
    let mut next = snapshot.clone();
    match intent {
        MutationIntent::Create { entry } => next.push(entry.clone()),
        MutationIntent::Update { id, patch } => {
            next.update(id, |item| item.apply_patch(patch));
        }
        MutationIntent::Delete { id } => {
            next.remove(id);
        }
        MutationIntent::Reorder { ids } => next = snapshot.reordered(ids),
    }
    next
}

/// サーバー応答を現在のスナップショットへ反映する。
///
/// 常に現在値を基準にするので、途中で同じキーへ別の変更が入っていても
/// その効果は残る。対象エンティティはサーバー表現で丸ごと置き換える。
pub fn commit<R: Resource>(
    pending: &PendingMutation<R>,
    view: CacheView<'_, R>,
    committed: &Committed<R>,
) -> CacheWrite<R> {
    let Some(current) = view.snapshot else {
        return CacheWrite::Keep;
    };
    let mut next = current.clone();

    let changed = match committed {
        Committed::Created(entity) => {
            let temp_id = pending.target();
            if next.contains(entity.id()) {
                // 再取得などで既に正式 ID のエントリがある
                let removed = temp_id.and_then(|id| next.remove(id)).is_some();
                let replaced = next.replace(entity.id(), entity.clone());
                removed || replaced
            } else {
                let replaced = temp_id.is_some_and(|id| next.replace(id, entity.clone()));
                if !replaced {
                    next.push(entity.clone());
                }
                true
            }
        }
        Committed::Updated(entity) => next.replace(entity.id(), entity.clone()),
        Committed::Deleted(id) => next.remove(id).is_some(),
        // 並び順は settle 後の再取得で確定させる
        Committed::Reordered => false,
    };

    if changed && next != *current {
        CacheWrite::Replace(next)
    } else {
        CacheWrite::Keep
    }
}

/// 失敗した変更を取り消す。
///
/// 楽観的適用以降キーが書き換えられていなければ直前のスナップショットへ丸ごと戻す。
/// 書き換えられていれば、この変更が触れたエンティティだけを元に戻す。ただし
/// そのエンティティが投機的な状態のままのときに限る。後続の変更や再取得が
/// 上書きしていれば、そちらの方が新しいので触れない。
pub fn rollback<R: Resource>(pending: &PendingMutation<R>, view: CacheView<'_, R>) -> CacheWrite<R> {
    let (Some(previous), Some(speculative)) = (&pending.previous, &pending.speculative) else {
        return CacheWrite::Keep;
    };
    let Some(current) = view.snapshot else {
        return CacheWrite::Keep;
    };

    if view.version == pending.applied_version {
        return CacheWrite::Replace(previous.clone());
    }

    let mut next = current.clone();
    match &pending.intent {
        MutationIntent::Create { entry } => {
            next.remove(entry.id());
        }
        MutationIntent::Update { id, .. } => {
            if current.get(id) == speculative.get(id)
                && let Some(prior) = previous.get(id)
            {
                next.replace(id, prior.clone());
            }
        }
        MutationIntent::Delete { id } => {
            if current.get(id) == speculative.get(id)
                && let Some(index) = previous.position_of(id)
                && let Some(prior) = previous.get(id)
            {
                next.insert(index, prior.clone());
            }
        }
        MutationIntent::Reorder { .. } => {
            if current.ids() == speculative.ids() {
                next = current.reordered(&previous.ids());
            }
        }
    }

    if next == *current {
        CacheWrite::Keep
    } else {
        CacheWrite::Replace(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Board, BoardDraft, BoardPatch};
    use crate::domain::value_objects::{CacheVersion, QueryKey, ResourceId};

    fn id(value: &str) -> ResourceId {
        ResourceId::new(value.to_string()).unwrap()
    }

    fn boards() -> CollectionSnapshot<Board> {
        CollectionSnapshot::new(vec![Board::fixture("b1", "A"), Board::fixture("b2", "B")])
    }

    fn titles(snapshot: &CollectionSnapshot<Board>) -> Vec<String> {
        snapshot.items().iter().map(|b| b.title.clone()).collect()
    }

    fn started(
        intent: MutationIntent<Board>,
        previous: &CollectionSnapshot<Board>,
        applied_version: u64,
    ) -> PendingMutation<Board> {
        let mut pending = PendingMutation::new(QueryKey::boards(), intent);
        pending.speculative = Some(apply_intent(previous, &pending.intent));
        pending.previous = Some(previous.clone());
        pending.applied_version = CacheVersion::new(applied_version);
        pending
    }

    fn view(snapshot: &CollectionSnapshot<Board>, version: u64) -> CacheView<'_, Board> {
        CacheView {
            snapshot: Some(snapshot),
            version: CacheVersion::new(version),
        }
    }

    fn replaced(write: CacheWrite<Board>) -> CollectionSnapshot<Board> {
        match write {
            CacheWrite::Replace(snapshot) => snapshot,
            other => panic!("expected replace, got {other:?}"),
        }
    }

    #[test]
    fn update_is_visible_in_speculative_snapshot() {
        let intent = MutationIntent::Update {
            id: id("b1"),
            patch: BoardPatch::title("A2"),
        };
        let speculative = apply_intent(&boards(), &intent);
        assert_eq!(titles(&speculative), vec!["A2", "B"]);
    }

    #[test]
    fn rollback_restores_previous_when_untouched() {
        let previous = boards();
        let pending = started(
            MutationIntent::Update {
                id: id("b1"),
                patch: BoardPatch::title("A2"),
            },
            &previous,
            3,
        );
        let speculative = pending.speculative.clone().unwrap();

        let restored = replaced(rollback(&pending, view(&speculative, 3)));
        assert_eq!(restored, previous);
    }

    #[test]
    fn rollback_after_concurrent_write_only_reverts_own_entity() {
        let previous = boards();
        let pending = started(
            MutationIntent::Update {
                id: id("b1"),
                patch: BoardPatch::title("A2"),
            },
            &previous,
            3,
        );
        // 別の変更が b2 を書き換えた後の状態
        let mut current = pending.speculative.clone().unwrap();
        current.update(&id("b2"), |b| b.title = "B2".to_string());

        let restored = replaced(rollback(&pending, view(&current, 4)));
        assert_eq!(titles(&restored), vec!["A", "B2"]);
    }

    #[test]
    fn rollback_of_delete_reinserts_at_prior_index() {
        let previous = CollectionSnapshot::new(vec![
            Board::fixture("b1", "A"),
            Board::fixture("b2", "B"),
            Board::fixture("b3", "C"),
        ]);
        let pending = started(MutationIntent::Delete { id: id("b2") }, &previous, 5);
        let mut current = pending.speculative.clone().unwrap();
        current.push(Board::fixture("b4", "D"));

        let restored = replaced(rollback(&pending, view(&current, 6)));
        assert_eq!(titles(&restored), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn rollback_without_optimistic_apply_keeps_cache() {
        let pending = PendingMutation::new(
            QueryKey::boards(),
            MutationIntent::<Board>::Delete { id: id("b1") },
        );
        let current = boards();
        assert_eq!(rollback(&pending, view(&current, 9)), CacheWrite::Keep);
    }

    #[test]
    fn commit_swaps_temporary_entry_for_server_entity() {
        let entry = Board::provisional(ResourceId::temporary(), &BoardDraft::new("C"));
        let pending = started(MutationIntent::Create { entry }, &boards(), 2);
        let speculative = pending.speculative.clone().unwrap();
        assert!(speculative.has_temporary());

        let server = Board::fixture("srv-1", "C");
        let committed = replaced(commit(&pending, view(&speculative, 2), &Committed::Created(server)));

        assert_eq!(committed.len(), 3);
        assert!(committed.contains(&id("srv-1")));
        assert!(!committed.has_temporary());
    }

    #[test]
    fn commit_drops_temporary_entry_when_server_entity_already_loaded() {
        let entry = Board::provisional(ResourceId::temporary(), &BoardDraft::new("C"));
        let pending = started(MutationIntent::Create { entry }, &boards(), 2);
        let mut current = pending.speculative.clone().unwrap();
        current.push(Board::fixture("srv-1", "C"));

        let server = Board::fixture("srv-1", "C");
        let committed = replaced(commit(&pending, view(&current, 3), &Committed::Created(server)));

        assert_eq!(committed.ids().iter().filter(|i| i.as_str() == "srv-1").count(), 1);
        assert!(!committed.has_temporary());
    }

    #[test]
    fn commit_on_unloaded_key_is_noop() {
        let pending = PendingMutation::new(
            QueryKey::boards(),
            MutationIntent::<Board>::Delete { id: id("b1") },
        );
        let view = CacheView {
            snapshot: None,
            version: CacheVersion::ABSENT,
        };
        assert_eq!(
            commit(&pending, view, &Committed::Deleted(id("b1"))),
            CacheWrite::Keep
        );
    }

    #[test]
    fn rollback_of_reorder_after_concurrent_write_restores_order() {
        let previous = boards();
        let pending = started(
            MutationIntent::Reorder {
                ids: vec![id("b2"), id("b1")],
            },
            &previous,
            7,
        );
        let mut current = pending.speculative.clone().unwrap();
        current.update(&id("b1"), |b| b.title = "A2".to_string());

        let restored = replaced(rollback(&pending, view(&current, 8)));
        assert_eq!(titles(&restored), vec!["A2", "B"]);
    }

    #[test]
    fn rollback_keeps_entity_committed_by_later_mutation() {
        let previous = boards();
        let pending = started(
            MutationIntent::Update {
                id: id("b1"),
                patch: BoardPatch::title("A2"),
            },
            &previous,
            3,
        );
        // 後続の変更がサーバー表現で b1 を確定させた
        let mut current = pending.speculative.clone().unwrap();
        current.replace(&id("b1"), Board::fixture("b1", "A3"));

        assert_eq!(rollback(&pending, view(&current, 5)), CacheWrite::Keep);
    }

    #[test]
    fn rollback_of_reorder_keeps_order_set_by_refresh() {
        let previous = boards();
        let pending = started(
            MutationIntent::Reorder {
                ids: vec![id("b2"), id("b1")],
            },
            &previous,
            7,
        );
        let current = CollectionSnapshot::new(vec![
            Board::fixture("b1", "A"),
            Board::fixture("b3", "C"),
            Board::fixture("b2", "B"),
        ]);

        assert_eq!(rollback(&pending, view(&current, 9)), CacheWrite::Keep);
    }
}
