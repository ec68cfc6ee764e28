use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockdepot_core::{DomainError, DomainResult, Entity, RecordId};
use stockdepot_inventory::{RouteId, WarehouseId};
use stockdepot_parties::PartyId;
use stockdepot_products::ProductId;

/// Sale order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub RecordId);

impl OrderId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Sale order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Draft,
    Confirmed,
    Cancelled,
}

/// Display-only line kinds (no product, no quantity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Section,
    Note,
}

/// Order line: a requested product quantity with its fulfillment route and
/// the quantity currently available from the customer's deposit for the
/// line's product/customer/warehouse combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleOrderLine {
    pub line_no: u32,
    pub display_type: Option<DisplayType>,
    pub product_id: Option<ProductId>,
    pub requested_qty: f64,
    pub route_id: Option<RouteId>,
    /// Computed; refreshed from the deposit aggregation before validation.
    pub deposit_available_qty: f64,
}

impl SaleOrderLine {
    pub fn product(line_no: u32, product_id: ProductId, requested_qty: f64) -> Self {
        Self {
            line_no,
            display_type: None,
            product_id: Some(product_id),
            requested_qty,
            route_id: None,
            deposit_available_qty: 0.0,
        }
    }

    pub fn section(line_no: u32) -> Self {
        Self {
            line_no,
            display_type: Some(DisplayType::Section),
            product_id: None,
            requested_qty: 0.0,
            route_id: None,
            deposit_available_qty: 0.0,
        }
    }

    pub fn with_route(mut self, route_id: RouteId) -> Self {
        self.route_id = Some(route_id);
        self
    }

    /// Section/note lines carry no product and are skipped by validation.
    pub fn is_display(&self) -> bool {
        self.display_type.is_some()
    }
}

/// Sale order entity.
///
/// An order either consumes from a customer deposit (the default) or, when
/// flagged, creates one: its deliveries stay in the vendor's warehouse as
/// customer-owned stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleOrder {
    id: OrderId,
    partner_id: PartyId,
    warehouse_id: WarehouseId,
    customer_deposit: bool,
    state: OrderState,
    date_order: DateTime<Utc>,
    lines: Vec<SaleOrderLine>,
}

impl SaleOrder {
    pub fn new(
        id: OrderId,
        partner_id: PartyId,
        warehouse_id: WarehouseId,
        date_order: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            partner_id,
            warehouse_id,
            customer_deposit: false,
            state: OrderState::Draft,
            date_order,
            lines: Vec::new(),
        }
    }

    /// Order that creates a customer deposit instead of delivering.
    pub fn customer_deposit_order(
        id: OrderId,
        partner_id: PartyId,
        warehouse_id: WarehouseId,
        date_order: DateTime<Utc>,
    ) -> Self {
        let mut order = Self::new(id, partner_id, warehouse_id, date_order);
        order.customer_deposit = true;
        order
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn partner_id(&self) -> PartyId {
        self.partner_id
    }

    pub fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    pub fn is_customer_deposit(&self) -> bool {
        self.customer_deposit
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn date_order(&self) -> DateTime<Utc> {
        self.date_order
    }

    pub fn lines(&self) -> &[SaleOrderLine] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [SaleOrderLine] {
        &mut self.lines
    }

    pub fn add_line(&mut self, line: SaleOrderLine) -> DomainResult<()> {
        if self.state != OrderState::Draft {
            return Err(DomainError::invariant(
                "cannot modify order once it is confirmed or cancelled",
            ));
        }
        if line.display_type.is_none() && line.product_id.is_none() {
            return Err(DomainError::validation(
                "product lines must reference a product",
            ));
        }
        self.lines.push(line);
        Ok(())
    }

    pub(crate) fn mark_confirmed(&mut self) {
        self.state = OrderState::Confirmed;
    }
}

impl Entity for SaleOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Confirmation hook for a batch of orders.
///
/// Extensions wrap an inner implementation and delegate after their own
/// checks; [`BaseConfirmation`] is the innermost step that performs the
/// state transition.
pub trait OrderConfirmation {
    fn confirm(&mut self, orders: &mut [SaleOrder]) -> DomainResult<()>;
}

/// Innermost confirmation: draft orders with at least one line move to
/// confirmed.
#[derive(Debug, Default)]
pub struct BaseConfirmation;

impl OrderConfirmation for BaseConfirmation {
    fn confirm(&mut self, orders: &mut [SaleOrder]) -> DomainResult<()> {
        for order in orders.iter() {
            if order.state() != OrderState::Draft {
                return Err(DomainError::invariant("only draft orders can be confirmed"));
            }
            if order.lines().is_empty() {
                return Err(DomainError::validation("cannot confirm order without lines"));
            }
        }
        for order in orders.iter_mut() {
            order.mark_confirmed();
        }
        Ok(())
    }
}
