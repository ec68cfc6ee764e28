use serde::{Deserialize, Serialize};

use stockdepot_core::{DomainError, Entity, RecordId};

/// Warehouse identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(pub RecordId);

impl WarehouseId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Logistics route identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub RecordId);

impl RouteId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for RouteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Warehouse configuration entity.
///
/// A warehouse may enable customer deposits; doing so requires a designated
/// logistics route used exclusively for deposit-creation moves, so the
/// pairing is enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    id: WarehouseId,
    name: String,
    use_customer_deposits: bool,
    customer_deposit_route_id: Option<RouteId>,
}

impl Warehouse {
    /// Warehouse with customer deposits disabled.
    pub fn new(id: WarehouseId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("warehouse name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            use_customer_deposits: false,
            customer_deposit_route_id: None,
        })
    }

    /// Warehouse with customer deposits enabled on the given route.
    pub fn with_customer_deposits(
        id: WarehouseId,
        name: impl Into<String>,
        deposit_route: RouteId,
    ) -> Result<Self, DomainError> {
        let mut warehouse = Self::new(id, name)?;
        warehouse.use_customer_deposits = true;
        warehouse.customer_deposit_route_id = Some(deposit_route);
        Ok(warehouse)
    }

    pub fn id_typed(&self) -> WarehouseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn use_customer_deposits(&self) -> bool {
        self.use_customer_deposits
    }

    pub fn deposit_route(&self) -> Option<RouteId> {
        self.customer_deposit_route_id
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Lookup used by rules that only hold a [`WarehouseId`].
pub trait WarehouseDirectory {
    fn warehouse(&self, id: WarehouseId) -> Option<&Warehouse>;
}

impl WarehouseDirectory for std::collections::HashMap<WarehouseId, Warehouse> {
    fn warehouse(&self, id: WarehouseId) -> Option<&Warehouse> {
        self.get(&id)
    }
}
