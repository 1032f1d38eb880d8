//! Shipping address and its completeness predicate.

use serde::{Deserialize, Serialize};

/// A shipping address.
///
/// The four geographic name fields are paired with the external directory
/// service's identifiers so a saved address can re-seed the cascading
/// selectors. The names, not the IDs, are what completeness is judged on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub full_name: String,
    pub phone_number: String,
    pub village: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    /// Optional delivery notes.
    pub notes: String,
    /// Directory ID of the selected province.
    pub province_id: String,
    /// Directory ID of the selected regency (city).
    pub regency_id: String,
    /// Directory ID of the selected district.
    pub district_id: String,
    /// Directory ID of the selected village.
    pub village_id: String,
}

impl Address {
    /// Whether the address satisfies the checkout's address gate.
    ///
    /// True iff all seven required fields are non-empty; `notes` and the
    /// directory IDs are not required.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty()
            && !self.phone_number.is_empty()
            && !self.village.is_empty()
            && !self.district.is_empty()
            && !self.city.is_empty()
            && !self.province.is_empty()
            && !self.postal_code.is_empty()
    }
}
