//! Owner-aware reservation routing for stock moves.
//!
//! Reservation itself is the job of the underlying stock engine; this module
//! decides, per pending move, which owner context that engine should run
//! with: none for plain warehouses, explicitly cleared for deposit-creation
//! moves, and the commercial partner for moves that can be satisfied from an
//! existing deposit.

use stockdepot_core::{float_compare, DomainResult};
use stockdepot_parties::{PartyDirectory, PartyId};

use crate::quant::QuantStore;
use crate::stock_move::StockMove;
use crate::warehouse::WarehouseDirectory;

/// Owner value threaded through a reservation pass.
///
/// `Cleared` is not the same as `Unspecified`: deposit-creation moves must
/// reserve unowned stock even when a stale owner was in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerContext {
    Unspecified,
    Cleared,
    Assigned(PartyId),
}

/// Ambient parameters of one reservation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignContext {
    pub owner: OwnerContext,
}

impl AssignContext {
    pub fn unspecified() -> Self {
        Self {
            owner: OwnerContext::Unspecified,
        }
    }

    pub fn cleared() -> Self {
        Self {
            owner: OwnerContext::Cleared,
        }
    }

    pub fn with_owner(owner: PartyId) -> Self {
        Self {
            owner: OwnerContext::Assigned(owner),
        }
    }
}

/// Reservation hook: reserve physical stock against the given moves under
/// the given owner context. Implementations are supplied by the stock
/// engine; [`DepositAssigner`] wraps one to add deposit routing.
pub trait MoveAssigner {
    fn assign(&mut self, moves: &[StockMove], ctx: &AssignContext) -> DomainResult<()>;
}

/// Deposit-aware routing layered over a plain assigner.
pub struct DepositAssigner<'a, A, W, P> {
    inner: A,
    quants: &'a QuantStore,
    warehouses: &'a W,
    parties: &'a P,
}

impl<'a, A, W, P> DepositAssigner<'a, A, W, P>
where
    A: MoveAssigner,
    W: WarehouseDirectory,
    P: PartyDirectory,
{
    pub fn new(inner: A, quants: &'a QuantStore, warehouses: &'a W, parties: &'a P) -> Self {
        Self {
            inner,
            quants,
            warehouses,
            parties,
        }
    }

    pub fn into_inner(self) -> A {
        self.inner
    }

    fn deposits_enabled(&self, stock_move: &StockMove) -> bool {
        stock_move
            .warehouse_id
            .and_then(|id| self.warehouses.warehouse(id))
            .is_some_and(|wh| wh.use_customer_deposits())
    }

    fn is_deposit_creation(&self, stock_move: &StockMove) -> bool {
        stock_move
            .warehouse_id
            .and_then(|id| self.warehouses.warehouse(id))
            .is_some_and(|wh| stock_move.is_deposit_creation(wh))
    }

    /// Owner context for a move that may pull from an existing deposit: the
    /// move's commercial partner when that partner's deposit covers the
    /// requested quantity, otherwise cleared (falls back to general stock).
    fn pull_owner(&self, stock_move: &StockMove) -> OwnerContext {
        let owner = stock_move
            .partner_id
            .map(|partner| self.parties.commercial_partner_of(partner));
        let available = self.quants.available_at_location(
            stock_move.location_id,
            stock_move.product_id,
            owner,
            false,
        );
        match owner {
            Some(owner)
                if float_compare(
                    available,
                    stock_move.requested_qty,
                    stock_move.product_uom.rounding,
                )
                .is_ge() =>
            {
                OwnerContext::Assigned(owner)
            }
            _ => OwnerContext::Cleared,
        }
    }
}

impl<A, W, P> MoveAssigner for DepositAssigner<'_, A, W, P>
where
    A: MoveAssigner,
    W: WarehouseDirectory,
    P: PartyDirectory,
{
    fn assign(&mut self, moves: &[StockMove], ctx: &AssignContext) -> DomainResult<()> {
        // Already inside an owner-scoped pass: no re-routing.
        if matches!(ctx.owner, OwnerContext::Assigned(_)) {
            return self.inner.assign(moves, ctx);
        }

        let (deposit_moves, plain_moves): (Vec<_>, Vec<_>) = moves
            .iter()
            .cloned()
            .partition(|m| self.deposits_enabled(m));
        let (push_moves, pull_moves): (Vec<_>, Vec<_>) = deposit_moves
            .into_iter()
            .partition(|m| self.is_deposit_creation(m));

        tracing::debug!(
            plain = plain_moves.len(),
            deposit_creation = push_moves.len(),
            deposit_pull = pull_moves.len(),
            "routing reservation pass"
        );

        // Warehouses without the deposit feature: untouched context.
        if !plain_moves.is_empty() {
            self.inner.assign(&plain_moves, ctx)?;
        }

        // Candidates to pull from a deposit: each move gets its own owner
        // decision, so each is an independent reservation call.
        for stock_move in pull_moves {
            let owner = self.pull_owner(&stock_move);
            tracing::debug!(move_id = %stock_move.id, ?owner, "deposit pull decision");
            self.inner
                .assign(core::slice::from_ref(&stock_move), &AssignContext { owner })?;
        }

        // Deposit-creation moves: owner explicitly cleared, a stale owner in
        // scope must not leak into the new deposit quants.
        if !push_moves.is_empty() {
            self.inner.assign(&push_moves, &AssignContext::cleared())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use stockdepot_core::RecordId;
    use stockdepot_parties::Party;
    use stockdepot_products::{ProductId, UnitOfMeasure};

    use crate::location::{Location, LocationId};
    use crate::quant::{Quant, QuantId};
    use crate::stock_move::{MoveId, MoveState};
    use crate::warehouse::{RouteId, Warehouse, WarehouseId};

    /// Records every delegated call: (move ids, owner context).
    #[derive(Default)]
    struct RecordingAssigner {
        calls: Vec<(Vec<MoveId>, OwnerContext)>,
    }

    impl MoveAssigner for RecordingAssigner {
        fn assign(&mut self, moves: &[StockMove], ctx: &AssignContext) -> DomainResult<()> {
            self.calls
                .push((moves.iter().map(|m| m.id).collect(), ctx.owner));
            Ok(())
        }
    }

    struct Fixture {
        quants: QuantStore,
        warehouses: HashMap<WarehouseId, Warehouse>,
        parties: HashMap<PartyId, Party>,
        deposit_wh: WarehouseId,
        deposit_route: RouteId,
        plain_wh: WarehouseId,
        company: PartyId,
        contact: PartyId,
        location: LocationId,
        product: ProductId,
    }

    fn fixture() -> Fixture {
        let deposit_wh = WarehouseId::new(RecordId::new());
        let deposit_route = RouteId::new(RecordId::new());
        let plain_wh = WarehouseId::new(RecordId::new());
        let mut warehouses = HashMap::new();
        warehouses.insert(
            deposit_wh,
            Warehouse::with_customer_deposits(deposit_wh, "Main", deposit_route).unwrap(),
        );
        warehouses.insert(plain_wh, Warehouse::new(plain_wh, "Annex").unwrap());

        let company = PartyId::new(RecordId::new());
        let contact = PartyId::new(RecordId::new());
        let mut parties = HashMap::new();
        parties.insert(company, Party::company(company, "Acme Industrial").unwrap());
        parties.insert(
            contact,
            Party::contact(contact, "Jamie Doe", Some(company)).unwrap(),
        );

        let location = LocationId::new(RecordId::new());
        let mut quants = QuantStore::new();
        quants.add_location(Location::internal(location, "WH/Stock"));

        Fixture {
            quants,
            warehouses,
            parties,
            deposit_wh,
            deposit_route,
            plain_wh,
            company,
            contact,
            location,
            product: ProductId::new(RecordId::new()),
        }
    }

    fn stock_move(fx: &Fixture, warehouse: WarehouseId, qty: f64) -> StockMove {
        StockMove {
            id: MoveId::new(RecordId::new()),
            product_id: fx.product,
            product_uom: UnitOfMeasure::units(),
            requested_qty: qty,
            location_id: fx.location,
            warehouse_id: Some(warehouse),
            partner_id: Some(fx.contact),
            route_ids: vec![],
            state: MoveState::Confirmed,
        }
    }

    fn owned_quant(fx: &Fixture, owner: PartyId, qty: f64) -> Quant {
        Quant {
            id: QuantId::new(RecordId::new()),
            product_id: fx.product,
            location_id: fx.location,
            warehouse_id: Some(fx.deposit_wh),
            quantity: qty,
            reserved_quantity: 0.0,
            owner_id: Some(owner),
        }
    }

    #[test]
    fn owner_scoped_pass_delegates_untouched() {
        let fx = fixture();
        let moves = vec![
            stock_move(&fx, fx.deposit_wh, 5.0),
            stock_move(&fx, fx.plain_wh, 5.0),
        ];
        let mut assigner = DepositAssigner::new(
            RecordingAssigner::default(),
            &fx.quants,
            &fx.warehouses,
            &fx.parties,
        );
        assigner
            .assign(&moves, &AssignContext::with_owner(fx.company))
            .unwrap();
        let calls = assigner.into_inner().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.len(), 2);
        assert_eq!(calls[0].1, OwnerContext::Assigned(fx.company));
    }

    #[test]
    fn plain_warehouse_moves_keep_the_incoming_context() {
        let fx = fixture();
        let moves = vec![stock_move(&fx, fx.plain_wh, 5.0)];
        let mut assigner = DepositAssigner::new(
            RecordingAssigner::default(),
            &fx.quants,
            &fx.warehouses,
            &fx.parties,
        );
        assigner.assign(&moves, &AssignContext::unspecified()).unwrap();
        let calls = assigner.into_inner().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, OwnerContext::Unspecified);
    }

    #[test]
    fn deposit_creation_moves_clear_a_stale_owner() {
        let fx = fixture();
        let mut push = stock_move(&fx, fx.deposit_wh, 5.0);
        push.route_ids = vec![fx.deposit_route];
        let mut assigner = DepositAssigner::new(
            RecordingAssigner::default(),
            &fx.quants,
            &fx.warehouses,
            &fx.parties,
        );
        assigner
            .assign(core::slice::from_ref(&push), &AssignContext::cleared())
            .unwrap();
        let calls = assigner.into_inner().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec![push.id]);
        assert_eq!(calls[0].1, OwnerContext::Cleared);
    }

    #[test]
    fn exact_deposit_coverage_reserves_with_owner() {
        let mut fx = fixture();
        fx.quants.add_quant(owned_quant(&fx, fx.company, 10.0));
        let moves = vec![stock_move(&fx, fx.deposit_wh, 10.0)];
        let mut assigner = DepositAssigner::new(
            RecordingAssigner::default(),
            &fx.quants,
            &fx.warehouses,
            &fx.parties,
        );
        assigner.assign(&moves, &AssignContext::unspecified()).unwrap();
        let calls = assigner.into_inner().calls;
        assert_eq!(calls.len(), 1);
        // The move's partner is the contact; availability is checked against
        // (and the reservation scoped to) the commercial partner.
        assert_eq!(calls[0].1, OwnerContext::Assigned(fx.company));
    }

    #[test]
    fn deposit_shortfall_falls_back_to_general_stock() {
        let mut fx = fixture();
        fx.quants.add_quant(owned_quant(&fx, fx.company, 10.0));
        let moves = vec![stock_move(&fx, fx.deposit_wh, 11.0)];
        let mut assigner = DepositAssigner::new(
            RecordingAssigner::default(),
            &fx.quants,
            &fx.warehouses,
            &fx.parties,
        );
        assigner.assign(&moves, &AssignContext::unspecified()).unwrap();
        let calls = assigner.into_inner().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, OwnerContext::Cleared);
    }

    #[test]
    fn moves_without_partner_reserve_ownerless() {
        let mut fx = fixture();
        let mut m = stock_move(&fx, fx.deposit_wh, 5.0);
        m.partner_id = None;
        // Plenty of unowned stock at the location; still no owner to assign.
        fx.quants.add_quant(Quant {
            id: QuantId::new(RecordId::new()),
            product_id: fx.product,
            location_id: fx.location,
            warehouse_id: Some(fx.deposit_wh),
            quantity: 100.0,
            reserved_quantity: 0.0,
            owner_id: None,
        });
        let mut assigner = DepositAssigner::new(
            RecordingAssigner::default(),
            &fx.quants,
            &fx.warehouses,
            &fx.parties,
        );
        assigner
            .assign(core::slice::from_ref(&m), &AssignContext::unspecified())
            .unwrap();
        let calls = assigner.into_inner().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, OwnerContext::Cleared);
    }

    #[test]
    fn mixed_batch_partitions_into_independent_calls() {
        let mut fx = fixture();
        fx.quants.add_quant(owned_quant(&fx, fx.company, 10.0));

        let plain = stock_move(&fx, fx.plain_wh, 5.0);
        let covered = stock_move(&fx, fx.deposit_wh, 10.0);
        let short = stock_move(&fx, fx.deposit_wh, 50.0);
        let mut push = stock_move(&fx, fx.deposit_wh, 7.0);
        push.route_ids = vec![fx.deposit_route];

        let moves = vec![plain.clone(), covered.clone(), short.clone(), push.clone()];
        let mut assigner = DepositAssigner::new(
            RecordingAssigner::default(),
            &fx.quants,
            &fx.warehouses,
            &fx.parties,
        );
        assigner.assign(&moves, &AssignContext::unspecified()).unwrap();
        let calls = assigner.into_inner().calls;

        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], (vec![plain.id], OwnerContext::Unspecified));
        assert_eq!(calls[1], (vec![covered.id], OwnerContext::Assigned(fx.company)));
        // Both pull moves see the same unreserved snapshot; only coverage
        // decides the owner, the 50-unit request falls back.
        assert_eq!(calls[2], (vec![short.id], OwnerContext::Cleared));
        assert_eq!(calls[3], (vec![push.id], OwnerContext::Cleared));
    }
}
