#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

use kanri_lib::application::services::{MutationCoordinator, MutationOptions};
use kanri_lib::domain::entities::Resource;
use kanri_lib::infrastructure::cache::MemoryQueryCache;
use std::sync::Arc;

pub use fakes::{Gate, RecordingNotifier, ScriptedClient};

/// テスト用のコーディネーター一式
pub struct Harness<R: Resource> {
    pub client: Arc<ScriptedClient<R>>,
    pub cache: Arc<MemoryQueryCache<R>>,
    pub notifier: Arc<RecordingNotifier>,
    pub coordinator: MutationCoordinator<R>,
}

impl<R: Resource> Harness<R> {
    pub fn new() -> Self {
        Self::with_options(MutationOptions::default())
    }

    pub fn with_options(options: MutationOptions) -> Self {
        let client = Arc::new(ScriptedClient::new());
        let cache = Arc::new(MemoryQueryCache::new(32));
        let notifier = Arc::new(RecordingNotifier::default());
        let coordinator = MutationCoordinator::new(
            client.clone(),
            cache.clone(),
            notifier.clone(),
            options,
        );
        Self {
            client,
            cache,
            notifier,
            coordinator,
        }
    }
}

/// 条件が満たされるまでスケジューラに制御を返す
pub async fn yield_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition was not met after 1000 yields");
}
