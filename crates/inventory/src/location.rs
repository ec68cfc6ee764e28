use serde::{Deserialize, Serialize};

use stockdepot_core::{Entity, RecordId};

/// Location identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub RecordId);

impl LocationId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Location usage: only `Internal` locations hold company-managed stock and
/// participate in deposit accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationUsage {
    Internal,
    Customer,
    Supplier,
    Transit,
}

/// Stock location entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub usage: LocationUsage,
}

impl Location {
    pub fn internal(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            usage: LocationUsage::Internal,
        }
    }

    pub fn new(id: LocationId, name: impl Into<String>, usage: LocationUsage) -> Self {
        Self {
            id,
            name: name.into(),
            usage,
        }
    }
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
