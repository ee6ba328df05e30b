use crate::application::error::RemoteError;
use crate::domain::value_objects::{DurableId, QueryKey, ResourceKind};

const BOARD_FILTER: &str = "boardId";

/// パスセグメント。URL への組み立て時に一つずつエンコードされる。
pub(crate) type Segments = Vec<String>;

fn base_segments(kind: ResourceKind) -> Segments {
    match kind {
        ResourceKind::Board => vec!["boards".to_string()],
        ResourceKind::Task => vec!["tasks".to_string()],
        ResourceKind::Sprint => vec!["scrum".to_string(), "sprints".to_string()],
        ResourceKind::Epic => vec!["scrum".to_string(), "epics".to_string()],
        ResourceKind::Story => vec!["scrum".to_string(), "stories".to_string()],
        ResourceKind::TeamMember => vec!["scrum".to_string(), "team".to_string()],
    }
}

/// 一覧取得・作成に使うパス
pub(crate) fn collection_path(key: &QueryKey) -> Result<Segments, RemoteError> {
    if key.kind() != ResourceKind::Task {
        return Ok(base_segments(key.kind()));
    }
    let board_id = key.filter(BOARD_FILTER).ok_or_else(|| RemoteError::Validation {
        message: format!("Query key {key} has no {BOARD_FILTER}"),
        details: None,
    })?;
    Ok(vec![
        "boards".to_string(),
        board_id.to_string(),
        "tasks".to_string(),
    ])
}

pub(crate) fn item_path(kind: ResourceKind, id: &DurableId) -> Segments {
    let mut segments = base_segments(kind);
    segments.push(id.as_str().to_string());
    segments
}

pub(crate) fn reorder_path(key: &QueryKey) -> Result<Segments, RemoteError> {
    let mut segments = collection_path(key)?;
    segments.push("reorder".to_string());
    Ok(segments)
}

/// パスに埋め込まなかった絞り込み条件をクエリ文字列にする
pub(crate) fn list_query(key: &QueryKey) -> Vec<(String, String)> {
    key.filters()
        .filter(|(name, _)| !(key.kind() == ResourceKind::Task && *name == BOARD_FILTER))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
