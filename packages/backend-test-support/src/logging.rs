//! Test logging initialization.
//!
//! Unit tests call this through a `ctor` hook in the backend crate; integration
//! tests call it at the top of each test.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize a test-friendly subscriber once per process.
///
/// Level precedence: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
/// Safe to call from any number of tests concurrently.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();
    });
}
