//! Wire types for the geographic directory service.
//!
//! The service returns arrays of `{id, name}` records, each carrying its
//! parent's ID one level up from provinces. IDs are strings on the wire.

use serde::{Deserialize, Serialize};

/// A province, the top of the regional hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
}

/// A regency or city within a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regency {
    pub id: String,
    pub province_id: String,
    pub name: String,
}

/// A district within a regency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub regency_id: String,
    pub name: String,
}

/// A village within a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Village {
    pub id: String,
    pub district_id: String,
    pub name: String,
}
