//! Shared fixtures for the pqkey benchmarks.

use pqkey_core::testing;
use pqkey_picnic::{picnic_l1_fs, Registry};

/// Picnic bound to the SchemeX-sized test primitive.
pub fn registry() -> Registry {
    Registry::new().with(picnic_l1_fs(testing::scheme_x))
}
