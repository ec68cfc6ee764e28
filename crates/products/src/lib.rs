//! Products domain module.
//!
//! This crate contains the product catalog entities used by the inventory and
//! sales rules, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod product;

pub use product::{Product, ProductDirectory, ProductId, ProductKind, UnitOfMeasure};
