//! Sales domain module.
//!
//! Sale orders and the customer-deposit confirmation rules: route
//! preconditions, availability validation against the customer's deposit,
//! and the per-line available-from-deposit quantities. All logic is
//! deterministic domain code (no IO, no HTTP, no storage).

pub mod deposit;
pub mod order;

pub use deposit::{
    deposit_quant_count, deposit_quant_filter, refresh_deposit_available, DepositConfirmation,
};
pub use order::{
    BaseConfirmation, DisplayType, OrderConfirmation, OrderId, OrderState, SaleOrder,
    SaleOrderLine,
};
