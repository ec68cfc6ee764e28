//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, route configuration, stock availability). Infrastructure
/// concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. concurrent state change).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A logistics route is misconfigured for the requested operation.
    ///
    /// Raised by order-confirmation preconditions; aborts the confirmation.
    #[error("route configuration error: {0}")]
    RouteConfiguration(String),

    /// A customer deposit does not hold enough stock for the requested
    /// quantity. The message names the offending product.
    #[error("insufficient customer deposit for '{product}': {detail}")]
    InsufficientDeposit { product: String, detail: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn route_configuration(msg: impl Into<String>) -> Self {
        Self::RouteConfiguration(msg.into())
    }

    pub fn insufficient_deposit(
        product: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InsufficientDeposit {
            product: product.into(),
            detail: detail.into(),
        }
    }
}
