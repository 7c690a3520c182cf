//! Shared configuration for property tests.

use proptest::prelude::ProptestConfig;

/// Proptest configuration used by every `tests_props_*` module.
pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}
