//! Inventory domain module.
//!
//! This crate contains the warehouse-side business rules for customer
//! deposits: the deposit quant filter and availability aggregation, the
//! owner-aware reservation router for stock moves, the valuation-layer
//! taken-data hook, and the done-quantity edit lock. All logic is
//! deterministic domain code (no IO, no HTTP, no storage).

pub mod assign;
pub mod location;
pub mod quant;
pub mod stock_move;
pub mod valuation;
pub mod warehouse;

pub use assign::{AssignContext, DepositAssigner, MoveAssigner, OwnerContext};
pub use location::{Location, LocationId, LocationUsage};
pub use quant::{DepositQuantFilter, Quant, QuantId, QuantStore};
pub use stock_move::{
    CompanyStockPolicy, MoveId, MoveLineId, MoveState, StockMove, StockMoveLine,
};
pub use valuation::{
    LayerContext, TakenDataHook, ValuationLayerCreator, ValuationLayerId, ValuationLayerValues,
};
pub use warehouse::{RouteId, Warehouse, WarehouseDirectory, WarehouseId};
