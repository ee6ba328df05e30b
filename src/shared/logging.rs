use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// ログ設定の初期化
///
/// `RUST_LOG` が設定されていればそちらを優先する。
pub fn init_logging(level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = if json {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    // テストなどで二重に初期化された場合は既存のサブスクライバを使う
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
