//! Store options
//!
//! Usually embedded in an application's config file under a `[store]` table.

use serde::{Deserialize, Serialize};

/// Behavioral switches of a [`Store`](crate::Store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Insert a skip-repeats stage for equatable subscriptions
    #[serde(default = "default_automatically_skips_repeats")]
    pub automatically_skips_repeats: bool,
}

fn default_automatically_skips_repeats() -> bool {
    true
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            automatically_skips_repeats: default_automatically_skips_repeats(),
        }
    }
}
