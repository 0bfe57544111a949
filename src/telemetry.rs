use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Initializes the global tracing subscriber.
///
/// Respects `RUST_LOG` when set and otherwise defaults to info-level output
/// with debug logging for this crate.
pub fn init_tracing_subscriber() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,metaforge=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
