//! Customer-deposit rules for sale order confirmation.
//!
//! A customer deposit is stock physically held in the vendor's warehouse but
//! owned by a customer. Orders flagged as deposit orders create that stock
//! along the warehouse's deposit route; regular orders may consume it, but
//! never more than what the customer's commercial hierarchy owns.

use std::collections::HashSet;

use stockdepot_core::{float_compare, DomainError, DomainResult};
use stockdepot_inventory::{DepositQuantFilter, QuantStore, Warehouse, WarehouseDirectory};
use stockdepot_parties::PartyDirectory;
use stockdepot_products::{Product, ProductDirectory, ProductId};

use crate::order::{OrderConfirmation, SaleOrder, SaleOrderLine};

/// Filter selecting the quants of this order's customer deposit: the order's
/// warehouse and the full commercial hierarchy of its partner.
pub fn deposit_quant_filter(order: &SaleOrder) -> DepositQuantFilter {
    DepositQuantFilter::new(vec![order.warehouse_id()], order.partner_id())
}

/// Number of deposit quants backing this order's partner in its warehouse.
/// Zero when the warehouse does not use customer deposits.
pub fn deposit_quant_count<W, P>(
    order: &SaleOrder,
    quants: &QuantStore,
    warehouses: &W,
    parties: &P,
) -> usize
where
    W: WarehouseDirectory,
    P: PartyDirectory,
{
    let enabled = warehouses
        .warehouse(order.warehouse_id())
        .is_some_and(Warehouse::use_customer_deposits);
    if !enabled {
        return 0;
    }
    quants.count(&deposit_quant_filter(order), parties)
}

/// Recompute each product line's available-from-deposit quantity from the
/// current quant aggregation.
pub fn refresh_deposit_available<P>(order: &mut SaleOrder, quants: &QuantStore, parties: &P)
where
    P: PartyDirectory,
{
    let totals = quants.available_by_product(&deposit_quant_filter(order), parties);
    for line in order.lines_mut() {
        if let Some(product_id) = line.product_id {
            line.deposit_available_qty = totals.get(&product_id).copied().unwrap_or(0.0);
        }
    }
}

/// Deposit-aware confirmation layered over an inner confirmation step.
///
/// Per order: route preconditions first (fail fast), then, for orders that
/// consume rather than create a deposit, the availability validation. Only
/// when every order passes is the inner confirmation invoked; an error on
/// any order aborts the whole batch.
pub struct DepositConfirmation<'a, C, W, P, D> {
    inner: C,
    quants: &'a QuantStore,
    warehouses: &'a W,
    parties: &'a P,
    products: &'a D,
}

impl<'a, C, W, P, D> DepositConfirmation<'a, C, W, P, D>
where
    C: OrderConfirmation,
    W: WarehouseDirectory,
    P: PartyDirectory,
    D: ProductDirectory,
{
    pub fn new(
        inner: C,
        quants: &'a QuantStore,
        warehouses: &'a W,
        parties: &'a P,
        products: &'a D,
    ) -> Self {
        Self {
            inner,
            quants,
            warehouses,
            parties,
            products,
        }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Goods lines of the order, with their catalog records.
    fn goods_lines<'o>(
        &self,
        order: &'o SaleOrder,
    ) -> DomainResult<Vec<(&'o SaleOrderLine, &'a Product)>> {
        let mut lines = Vec::new();
        for line in order.lines() {
            let Some(product_id) = line.product_id else {
                continue;
            };
            let product = self
                .products
                .product(product_id)
                .ok_or(DomainError::NotFound)?;
            if product.is_goods() {
                lines.push((line, product));
            }
        }
        Ok(lines)
    }

    /// Route preconditions: deposit orders must route every goods line
    /// through the deposit route; regular orders must not use it at all.
    fn check_deposit_routes(&self, order: &SaleOrder) -> DomainResult<()> {
        let warehouse = self
            .warehouses
            .warehouse(order.warehouse_id())
            .ok_or(DomainError::NotFound)?;
        let goods_lines = self.goods_lines(order)?;

        if order.is_customer_deposit() {
            let Some(route) = warehouse.deposit_route() else {
                return Err(DomainError::route_configuration(format!(
                    "warehouse '{}' has no customer deposit route",
                    warehouse.name()
                )));
            };
            if goods_lines.iter().any(|(l, _)| l.route_id != Some(route)) {
                return Err(DomainError::route_configuration(
                    "all product lines of a customer deposit order must use the \
                     customer deposit route",
                ));
            }
        } else if let Some(route) = warehouse.deposit_route() {
            if goods_lines.iter().any(|(l, _)| l.route_id == Some(route)) {
                return Err(DomainError::route_configuration(
                    "the customer deposit route is only allowed on orders marked \
                     as customer deposits",
                ));
            }
        }
        Ok(())
    }

    /// Availability validation for a deposit-consuming order: per product,
    /// the requested total must not exceed what the customer's hierarchy has
    /// on deposit in the order's warehouse.
    fn check_deposit_availability(&self, order: &SaleOrder) -> DomainResult<()> {
        let mut deposit_lines: Vec<(ProductId, &SaleOrderLine, &Product)> = Vec::new();
        for line in order.lines() {
            if line.is_display() {
                continue;
            }
            let Some(product_id) = line.product_id else {
                continue;
            };
            let product = self
                .products
                .product(product_id)
                .ok_or(DomainError::NotFound)?;
            let rounding = product.uom().rounding;
            if float_compare(line.deposit_available_qty, 0.0, rounding).is_gt()
                && float_compare(line.requested_qty, 0.0, rounding).is_gt()
            {
                deposit_lines.push((product_id, line, product));
            }
        }
        // Nothing on deposit for any line: plain order, nothing to validate.
        if deposit_lines.is_empty() {
            return Ok(());
        }

        let totals = self
            .quants
            .available_by_product(&deposit_quant_filter(order), self.parties);

        let mut checked: HashSet<ProductId> = HashSet::new();
        for (product_id, _, product) in &deposit_lines {
            if !checked.insert(*product_id) {
                continue;
            }
            let requested: f64 = deposit_lines
                .iter()
                .filter(|(p, _, _)| p == product_id)
                .map(|(_, line, _)| line.requested_qty)
                .sum();
            let available = totals.get(product_id).copied().unwrap_or(0.0);
            if float_compare(available, requested, product.uom().rounding).is_lt() {
                tracing::debug!(
                    order = %order.id_typed(),
                    product = product.name(),
                    requested,
                    available,
                    "deposit shortfall"
                );
                return Err(DomainError::insufficient_deposit(
                    product.name(),
                    format!(
                        "requested {requested} but only {available} available; \
                         adjust the quantity or create a new deposit order first"
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl<C, W, P, D> OrderConfirmation for DepositConfirmation<'_, C, W, P, D>
where
    C: OrderConfirmation,
    W: WarehouseDirectory,
    P: PartyDirectory,
    D: ProductDirectory,
{
    fn confirm(&mut self, orders: &mut [SaleOrder]) -> DomainResult<()> {
        for order in orders.iter() {
            self.check_deposit_routes(order)?;
        }
        // Deposit-creation orders never consume a deposit; skip them.
        for order in orders.iter().filter(|o| !o.is_customer_deposit()) {
            self.check_deposit_availability(order)?;
        }
        self.inner.confirm(orders)
    }
}
