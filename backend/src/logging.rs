//! Tracing subscriber setup.
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG` when set, else from `default_filter`.
/// Falls back to `info` when neither parses.
pub fn build_filter(env_directives: Option<&str>, default_filter: &str) -> EnvFilter {
    env_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global fmt subscriber.
///
/// Returns `false` if a subscriber was already installed, in which case
/// nothing changes.
pub fn init_logging(default_filter: &str) -> bool {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env_directives.as_deref(), default_filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
