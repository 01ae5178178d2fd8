use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging with an env-filter (`RUST_LOG` wins over the
/// provided default level).
pub fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
