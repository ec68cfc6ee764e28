//! `stockdepot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod rounding;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CompanyId, RecordId, UserId};
pub use rounding::{float_compare, float_is_zero, float_round};
pub use value_object::ValueObject;
