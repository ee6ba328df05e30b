use super::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// コレクションスナップショットをキャッシュする際のキー。
///
/// 例: `boards`, `tasks?boardId=b1`, `stories?sprintId=s1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    kind: ResourceKind,
    filters: BTreeMap<String, String>,
}

impl QueryKey {
    /// 種別の全件を表すキー
    pub fn all(kind: ResourceKind) -> Self {
        Self {
            kind,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    pub fn boards() -> Self {
        Self::all(ResourceKind::Board)
    }

    pub fn tasks_for_board(board_id: &str) -> Self {
        Self::all(ResourceKind::Task).with_filter("boardId", board_id)
    }

    pub fn sprints() -> Self {
        Self::all(ResourceKind::Sprint)
    }

    pub fn epics() -> Self {
        Self::all(ResourceKind::Epic)
    }

    pub fn stories() -> Self {
        Self::all(ResourceKind::Story)
    }

    pub fn stories_for_sprint(sprint_id: &str) -> Self {
        Self::stories().with_filter("sprintId", sprint_id)
    }

    pub fn stories_for_epic(epic_id: &str) -> Self {
        Self::stories().with_filter("epicId", epic_id)
    }

    pub fn team() -> Self {
        Self::all(ResourceKind::TeamMember)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 同じ種別で別の絞り込み条件を持つキーかどうか
    pub fn is_sibling_of(&self, other: &QueryKey) -> bool {
        self.kind == other.kind && self != other
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        let mut separator = '?';
        for (name, value) in &self.filters {
            write!(f, "{separator}{name}={value}")?;
            separator = '&';
        }
        Ok(())
    }
}
