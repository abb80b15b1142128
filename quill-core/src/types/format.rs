//! Physical book format descriptor

use serde::{Deserialize, Serialize};

/// A printed book format, used for pagination estimates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookFormat {
    /// Format name ("Taschenbuch")
    pub name: String,

    /// "W x H" in centimetres with a decimal comma ("12,5 x 19")
    pub dimensions: String,

    /// Characters per page with a thousands dot ("1.800")
    pub characters_per_page: String,

    /// What the format suits; not carried by persisted records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitable_for: Option<String>,
}

impl BookFormat {
    pub fn new(
        name: impl Into<String>,
        dimensions: impl Into<String>,
        characters_per_page: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions: dimensions.into(),
            characters_per_page: characters_per_page.into(),
            suitable_for: None,
        }
    }

    /// Set what the format suits
    pub fn with_suitable_for(mut self, suitable_for: impl Into<String>) -> Self {
        self.suitable_for = Some(suitable_for.into());
        self
    }
}
