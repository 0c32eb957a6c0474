//! Shared settings for domain property tests.

use proptest::prelude::ProptestConfig;

/// Case count comes from `PROPTEST_CASES`; the default stays low for CI.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(32);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
