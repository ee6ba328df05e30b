use super::Resource;
use crate::domain::value_objects::ResourceId;
use std::collections::HashSet;

/// クエリキーに紐づく順序付きエンティティ列
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot<R> {
    items: Vec<R>,
}

impl<R> Default for CollectionSnapshot<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: Resource> CollectionSnapshot<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn into_items(self) -> Vec<R> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<ResourceId> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }

    pub fn position_of(&self, id: &ResourceId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn get(&self, id: &ResourceId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn has_temporary(&self) -> bool {
        self.items.iter().any(|item| item.id().is_temporary())
    }

    pub fn push(&mut self, item: R) {
        self.items.push(item);
    }

    pub fn insert(&mut self, index: usize, item: R) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// ID が一致するエントリを置き換える。見つからなければ `false`。
    pub fn replace(&mut self, id: &ResourceId, item: R) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    pub fn update<F>(&mut self, id: &ResourceId, f: F) -> bool
    where
        F: FnOnce(&mut R),
    {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &ResourceId) -> Option<(usize, R)> {
        let index = self.position_of(id)?;
        Some((index, self.items.remove(index)))
    }

    /// 指定した ID 順に並べ替えた新しいスナップショットを返す。
    ///
    /// 未知の ID と重複は無視し、指定されなかったエントリは元の相対順のまま末尾に残す。
    /// 並べ替え後の添字を表示順として書き戻す。
    pub fn reordered(&self, ordered_ids: &[ResourceId]) -> Self {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.items.len());

        for id in ordered_ids {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(item) = self.get(id) {
                items.push(item.clone());
            }
        }
        for item in &self.items {
            if !seen.contains(item.id()) {
                items.push(item.clone());
            }
        }
        for (index, item) in items.iter_mut().enumerate() {
            item.set_position(index as u32);
        }

        Self { items }
    }
}

impl<R: Resource> From<Vec<R>> for CollectionSnapshot<R> {
    fn from(items: Vec<R>) -> Self {
        Self::new(items)
    }
}
