//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter for `level`, falling back to "info" when the directive
/// does not parse.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global compact fmt subscriber. A second call is a no-op.
pub fn init(level: &str) {
    // A subscriber may already be installed by a test harness; keep it.
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_target(true)
        .with_thread_ids(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init("warn");
        init("warn");
    }
}
