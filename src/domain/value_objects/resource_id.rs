use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// 楽観的作成中のエンティティに付与する仮 ID の接頭辞
pub const TEMP_ID_PREFIX: &str = "temp-";

/// キャッシュ上のエンティティ識別子。
///
/// サーバー採番済みの ID と、作成リクエストの応答待ちの仮 ID の両方を表す。
/// 仮 ID はリクエストに載せられないため、送信前に [`ResourceId::durable`] で
/// [`DurableId`] へ変換する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// 新しい仮 ID を発行
    pub fn temporary() -> Self {
        Self(format!("{TEMP_ID_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMP_ID_PREFIX)
    }

    pub fn durable(&self) -> Option<DurableId> {
        if self.is_temporary() {
            None
        } else {
            Some(DurableId(self.0.clone()))
        }
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Resource ID cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}

impl From<DurableId> for ResourceId {
    fn from(value: DurableId) -> Self {
        Self(value.0)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// サーバーが採番した ID。リモート呼び出しはこの型しか受け付けない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DurableId(String);

impl DurableId {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Durable ID cannot be empty".to_string());
        }
        if value.starts_with(TEMP_ID_PREFIX) {
            return Err(format!("Temporary ID cannot be used as durable: {value}"));
        }
        Ok(())
    }
}

impl fmt::Display for DurableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporary_ids_are_never_durable() {
        let id = ResourceId::temporary();
        assert!(id.is_temporary());
        assert!(id.durable().is_none());
        assert!(DurableId::new(id.to_string()).is_err());
    }

    #[test]
    fn server_ids_convert_to_durable() {
        let id = ResourceId::new("srv-1".to_string()).unwrap();
        assert!(!id.is_temporary());
        assert_eq!(id.durable().unwrap().as_str(), "srv-1");
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert!(ResourceId::new("  ".to_string()).is_err());
        assert!(DurableId::new(String::new()).is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ResourceId::new("b1".to_string()).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"b1\"");
        let parsed: ResourceId = serde_json::from_str("\"b2\"").unwrap();
        assert_eq!(parsed.as_str(), "b2");
        assert!(serde_json::from_str::<ResourceId>("\"\"").is_err());
    }
}
