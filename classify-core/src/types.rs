//! Request and result types shared by the resolver and its callers.

use serde::{Deserialize, Serialize};

/// Raw text submitted for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// The free-form text to extract fields from. May be empty.
    pub text: String,
}

/// The four extracted fields.
///
/// An empty string means the field was not found. All four fields are always
/// present when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Five-digit postal code.
    pub zip: String,
    /// Brand name.
    pub brand: String,
    /// Product or service category.
    pub category: String,
    /// Preferred time of day.
    pub time_pref: String,
}

impl ClassificationResult {
    /// Returns a result with every field empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when no field was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zip.is_empty()
            && self.brand.is_empty()
            && self.category.is_empty()
            && self.time_pref.is_empty()
    }
}
