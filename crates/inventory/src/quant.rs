use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockdepot_core::{Entity, RecordId};
use stockdepot_parties::{PartyDirectory, PartyId};
use stockdepot_products::ProductId;

use crate::location::{Location, LocationId, LocationUsage};
use crate::warehouse::WarehouseId;

/// Quant identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantId(pub RecordId);

impl QuantId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for QuantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A quantity of one product at one location, the atomic unit of on-hand
/// inventory accounting. Optionally tagged with the party that owns the
/// stock (deposit accounting) and the warehouse holding the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quant {
    pub id: QuantId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub warehouse_id: Option<WarehouseId>,
    pub quantity: f64,
    pub reserved_quantity: f64,
    pub owner_id: Option<PartyId>,
}

impl Quant {
    /// Quantity not yet reserved against a pending move.
    pub fn available_quantity(&self) -> f64 {
        self.quantity - self.reserved_quantity
    }
}

impl Entity for Quant {
    type Id = QuantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Filter selecting the quants that make up a customer's deposit.
///
/// Matches quants in internal locations of the given warehouses, with a
/// strictly positive quantity, owned by the customer or by any party in its
/// commercial hierarchy (an ancestor or a descendant). Ownership may be
/// recorded at any level of the hierarchy, hence the three-way disjunction.
///
/// Pure filter construction; evaluation never mutates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositQuantFilter {
    warehouse_ids: Vec<WarehouseId>,
    partner_id: PartyId,
}

impl DepositQuantFilter {
    pub fn new(warehouse_ids: Vec<WarehouseId>, partner_id: PartyId) -> Self {
        Self {
            warehouse_ids,
            partner_id,
        }
    }

    pub fn warehouse_ids(&self) -> &[WarehouseId] {
        &self.warehouse_ids
    }

    pub fn partner_id(&self) -> PartyId {
        self.partner_id
    }

    /// Evaluate the filter against a single quant.
    pub fn matches<P: PartyDirectory + ?Sized>(
        &self,
        quant: &Quant,
        location_usage: Option<LocationUsage>,
        parties: &P,
    ) -> bool {
        if location_usage != Some(LocationUsage::Internal) {
            return false;
        }
        let Some(warehouse_id) = quant.warehouse_id else {
            return false;
        };
        if !self.warehouse_ids.contains(&warehouse_id) {
            return false;
        }
        if quant.quantity <= 0.0 {
            return false;
        }
        let Some(owner_id) = quant.owner_id else {
            return false;
        };
        parties.in_same_hierarchy(owner_id, self.partner_id)
    }
}

/// In-memory quant set with the grouped queries the deposit rules need.
///
/// Stands in for the framework's relational query layer; reads only, the
/// stock subsystem owns all mutation.
#[derive(Debug, Default)]
pub struct QuantStore {
    locations: HashMap<LocationId, Location>,
    quants: Vec<Quant>,
}

impl QuantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.insert(location.id, location);
    }

    pub fn add_quant(&mut self, quant: Quant) {
        self.quants.push(quant);
    }

    pub fn location_usage(&self, id: LocationId) -> Option<LocationUsage> {
        self.locations.get(&id).map(|l| l.usage)
    }

    /// Quants matching a deposit filter.
    pub fn search<'s, P: PartyDirectory + ?Sized>(
        &'s self,
        filter: &DepositQuantFilter,
        parties: &P,
    ) -> Vec<&'s Quant> {
        self.quants
            .iter()
            .filter(|q| filter.matches(q, self.location_usage(q.location_id), parties))
            .collect()
    }

    /// Number of quants matching a deposit filter.
    pub fn count<P: PartyDirectory + ?Sized>(
        &self,
        filter: &DepositQuantFilter,
        parties: &P,
    ) -> usize {
        self.search(filter, parties).len()
    }

    /// Availability aggregation: total available quantity per product over
    /// the quants matching the filter. Products with no matching quants are
    /// absent from the map; callers default to `0.0` on lookup miss.
    pub fn available_by_product<P: PartyDirectory + ?Sized>(
        &self,
        filter: &DepositQuantFilter,
        parties: &P,
    ) -> HashMap<ProductId, f64> {
        let mut totals: HashMap<ProductId, f64> = HashMap::new();
        for quant in self.search(filter, parties) {
            *totals.entry(quant.product_id).or_insert(0.0) += quant.available_quantity();
        }
        totals
    }

    /// Available quantity of one product at one location, optionally
    /// restricted to an exact owner (no hierarchy expansion here; callers
    /// resolve the commercial partner first).
    ///
    /// With `allow_negative` false, a negative total reads as zero.
    pub fn available_at_location(
        &self,
        location_id: LocationId,
        product_id: ProductId,
        owner_id: Option<PartyId>,
        allow_negative: bool,
    ) -> f64 {
        let total: f64 = self
            .quants
            .iter()
            .filter(|q| {
                q.location_id == location_id
                    && q.product_id == product_id
                    && q.owner_id == owner_id
            })
            .map(Quant::available_quantity)
            .sum();
        if allow_negative { total } else { total.max(0.0) }
    }
}
