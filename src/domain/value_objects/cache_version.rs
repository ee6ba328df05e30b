use std::fmt;

/// キャッシュへの書き込みごとに単調増加するバージョン。
///
/// 値はキャッシュ全体で一意なので、キーが追い出されて再登録された場合でも
/// 以前のバージョンと衝突しない。`ABSENT` はスナップショットが存在しないことを表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheVersion(u64);

impl CacheVersion {
    pub const ABSENT: CacheVersion = CacheVersion(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CacheVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
