//! Presentation-side derivation settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Feature names hidden from the feature-importance ranking.
    ///
    /// Empty by default: every feature the classifier reports is shown.
    #[serde(default)]
    pub excluded_features: Vec<String>,
}
