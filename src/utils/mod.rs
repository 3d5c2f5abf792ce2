pub mod build_info;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. Without `RUST_LOG` the filter is
/// `finance_core=info`; output goes to stderr so shell output on stdout stays
/// clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(log_filter())
            .with_writer(std::io::stderr)
            .try_init();
    });
}

const DEFAULT_DIRECTIVE: &str = "finance_core=info";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins_over_the_default_directive() {
        std::env::set_var("RUST_LOG", "finance_core=debug");
        let configured = log_filter().to_string();
        std::env::remove_var("RUST_LOG");
        let fallback = log_filter().to_string();

        assert_eq!(configured, "finance_core=debug");
        assert_eq!(fallback, DEFAULT_DIRECTIVE);
    }
}
