//! Read synchronization behavior.

use serde::{Deserialize, Serialize};
use shop_core::enums::RowLimit;

const fn default_cancel_superseded() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Row limit the session starts with.
    #[serde(default)]
    pub default_row_limit: RowLimit,

    /// Abort in-flight reads once a newer read for the same query is issued.
    ///
    /// Stale responses are discarded on arrival either way.
    #[serde(default = "default_cancel_superseded")]
    pub cancel_superseded: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_row_limit: RowLimit::default(),
            cancel_superseded: default_cancel_superseded(),
        }
    }
}
