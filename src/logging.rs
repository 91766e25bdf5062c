//! Tracing setup for the `expense` binary
//!
//! Log output goes to stderr so it never mixes with command output. The
//! filter comes from `EXPENSE_LOG` (same syntax as `RUST_LOG`); without it,
//! `-v` flags raise the crate's level from warn.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "EXPENSE_LOG";

static TRACING_INIT: Once = Once::new();

/// Default filter for a verbosity count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "expense_cli=warn",
        1 => "expense_cli=info",
        2 => "expense_cli=debug",
        _ => "expense_cli=trace",
    }
}

/// Initialize the global tracing subscriber once
pub fn init(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
