//! Tracing subscriber setup
//!
//! Log levels:
//! - `error` - failed writes and watcher errors only
//! - `warn`  - adds skipped menu configs
//! - `info`  - adds one line per written module (default)
//! - `debug` - adds every classification decision

use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Install a compact fmt subscriber filtered at `level`.
///
/// `level` accepts any `EnvFilter` directive (e.g. `info,menugen_core=debug`);
/// an invalid directive falls back to `info`. Only the first call has an
/// effect, and an already installed global subscriber is left in place.
pub fn init(level: &str) {
    INIT.call_once(|| {
        let filter = filter_for(level);

        let fmt_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_level(true)
            .with_filter(filter);

        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
