use tracing_subscriber::EnvFilter;

/// Installs a compact `fmt` subscriber filtered by `filter` (`EnvFilter`
/// syntax, e.g. `"canvas_runtime=debug,info"`). `RUST_LOG` takes precedence
/// when set. Returns `false` if a global subscriber was already installed.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
