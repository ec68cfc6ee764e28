use serde::{Deserialize, Serialize};

use stockdepot_core::{DomainError, DomainResult, Entity, RecordId};
use stockdepot_parties::PartyId;
use stockdepot_products::{ProductId, UnitOfMeasure};

use crate::location::LocationId;
use crate::warehouse::{RouteId, Warehouse, WarehouseId};

/// Stock move identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub RecordId);

impl MoveId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for MoveId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock move line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveLineId(pub RecordId);

impl MoveLineId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for MoveLineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock move lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    Draft,
    Confirmed,
    Assigned,
    Done,
}

/// A pending or completed transfer of a product quantity between locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMove {
    pub id: MoveId,
    pub product_id: ProductId,
    pub product_uom: UnitOfMeasure,
    /// Requested quantity, in `product_uom`.
    pub requested_qty: f64,
    /// Source location the quantity is taken from.
    pub location_id: LocationId,
    pub warehouse_id: Option<WarehouseId>,
    /// Partner the transfer is for, used for deposit-owner resolution.
    pub partner_id: Option<PartyId>,
    pub route_ids: Vec<RouteId>,
    pub state: MoveState,
}

impl StockMove {
    /// Whether this move travels the warehouse's deposit-creation route.
    pub fn is_deposit_creation(&self, warehouse: &Warehouse) -> bool {
        warehouse
            .deposit_route()
            .is_some_and(|route| self.route_ids.contains(&route))
    }
}

impl Entity for StockMove {
    type Id = MoveId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Company-level stock policy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyStockPolicy {
    /// When set, the done quantity of a validated transfer can only be
    /// edited by callers holding the override permission.
    pub lock_qty_done: bool,
}

/// Detail line of a stock move: the quantity actually processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMoveLine {
    pub id: MoveLineId,
    pub move_id: MoveId,
    pub qty_done: f64,
    pub state: MoveState,
}

impl StockMoveLine {
    /// Update the done quantity, honoring the company lock: once the move is
    /// validated, edits require the override permission.
    pub fn set_qty_done(
        &mut self,
        qty: f64,
        policy: &CompanyStockPolicy,
        can_edit_locked: bool,
    ) -> DomainResult<()> {
        if qty < 0.0 {
            return Err(DomainError::validation("done quantity cannot be negative"));
        }
        if self.state == MoveState::Done && policy.lock_qty_done && !can_edit_locked {
            return Err(DomainError::validation(
                "done quantities are locked after the transfer is validated",
            ));
        }
        self.qty_done = qty;
        Ok(())
    }
}

impl Entity for StockMoveLine {
    type Id = MoveLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
