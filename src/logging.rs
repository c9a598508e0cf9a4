//! Logging setup
//!
//! All diagnostics go through `tracing` and are written to stderr so that command
//! output on stdout stays machine-readable. The level comes from `JFROG_CLI_LOG_LEVEL`
//! (or the settings file); `RUST_LOG` takes precedence when set.

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Map a CLI log level name to a tracing filter directive
pub fn level_directive(level: Option<&str>) -> &'static str {
    match level.map(|l| l.trim().to_uppercase()).as_deref() {
        Some("ERROR") => "error",
        Some("WARN") => "warn",
        Some("DEBUG") => "debug",
        Some("INFO") => "info",
        _ => DEFAULT_LEVEL,
    }
}

/// Initialize logging once; later calls are no-ops
pub fn init_logging(level: Option<&str>) {
    static INIT: std::sync::Once = std::sync::Once::new();
    let directive = level_directive(level);
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .finish();

        // Fails only if another subscriber is already installed
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive(Some("DEBUG")), "debug");
        assert_eq!(level_directive(Some(" warn ")), "warn");
        assert_eq!(level_directive(Some("ERROR")), "error");
        assert_eq!(level_directive(Some("verbose")), "info");
        assert_eq!(level_directive(None), "info");
    }
}
