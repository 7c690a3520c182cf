//! Unified test logging initialization.
//!
//! Tests across the workspace call a single `init()` so log output is
//! configured the same way everywhere.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe; may be called at the top of every test. The
/// logging level is controlled by `TEST_LOG`, then `RUST_LOG`, and defaults
/// to `"warn"` when neither is set.
pub fn init() {
    INIT.get_or_init(install);
}

fn install() {
    let filter = EnvFilter::try_from_env("TEST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Another subscriber may already be registered (e.g. by a harness);
    // losing that race is fine.
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init();
}
