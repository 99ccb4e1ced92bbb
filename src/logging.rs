//! Logging setup.
//!
//! Level filtering comes from the `[logging]` config block; the `RUST_LOG`
//! environment variable takes precedence when set.
//!
//! ```toml
//! [logging]
//! default = "warn"
//!
//! [logging.modules]
//! "formgen::index" = "debug"
//! ```
//!
//! ```bash
//! RUST_LOG=formgen=debug formgen serve
//! ```

use std::sync::Once;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber from configuration.
///
/// Only the first call takes effect, so an embedding application that has
/// already installed its own subscriber wins.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            let mut directives = config.default.clone();
            for (module, level) in &config.modules {
                directives.push_str(&format!(",{module}={level}"));
            }
            EnvFilter::new(directives)
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}

/// Initialize logging with the default configuration (quiet, `warn`).
pub fn init() {
    init_with_config(&LoggingConfig::default());
}
