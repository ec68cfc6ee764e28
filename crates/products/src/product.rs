use serde::{Deserialize, Serialize};

use stockdepot_core::{DomainError, Entity, RecordId, ValueObject};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

impl ProductId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product kind: whether stock is tracked for it.
///
/// Only `Goods` products participate in routing and deposit checks; services
/// never hold quants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Goods,
    Service,
}

/// Unit of measure with the rounding precision used for every quantity
/// comparison involving this product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    pub name: String,
    /// Smallest representable quantity step (e.g. `1.0` for units, `0.01`
    /// for kilograms weighed to the gram times ten).
    pub rounding: f64,
}

impl UnitOfMeasure {
    pub fn new(name: impl Into<String>, rounding: f64) -> Result<Self, DomainError> {
        if rounding <= 0.0 {
            return Err(DomainError::validation(
                "unit of measure rounding must be positive",
            ));
        }
        Ok(Self {
            name: name.into(),
            rounding,
        })
    }

    /// Whole units, the most common default.
    pub fn units() -> Self {
        Self {
            name: "Units".to_string(),
            rounding: 1.0,
        }
    }
}

impl ValueObject for UnitOfMeasure {}

/// Product entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    kind: ProductKind,
    uom: UnitOfMeasure,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        kind: ProductKind,
        uom: UnitOfMeasure,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            kind,
            uom,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn uom(&self) -> &UnitOfMeasure {
        &self.uom
    }

    pub fn is_goods(&self) -> bool {
        self.kind == ProductKind::Goods
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog lookup used by rules that only hold a [`ProductId`].
pub trait ProductDirectory {
    fn product(&self, id: ProductId) -> Option<&Product>;
}

impl ProductDirectory for std::collections::HashMap<ProductId, Product> {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdepot_core::RecordId;

    fn test_product_id() -> ProductId {
        ProductId::new(RecordId::new())
    }

    #[test]
    fn rejects_empty_name() {
        let err = Product::new(
            test_product_id(),
            "  ",
            ProductKind::Goods,
            UnitOfMeasure::units(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_non_positive_rounding() {
        assert!(UnitOfMeasure::new("Units", 0.0).is_err());
        assert!(UnitOfMeasure::new("Units", -0.01).is_err());
    }

    #[test]
    fn goods_vs_service_kind() {
        let goods = Product::new(
            test_product_id(),
            "Steel bolt",
            ProductKind::Goods,
            UnitOfMeasure::units(),
        )
        .unwrap();
        let service = Product::new(
            test_product_id(),
            "Assembly hour",
            ProductKind::Service,
            UnitOfMeasure::new("Hours", 0.01).unwrap(),
        )
        .unwrap();
        assert!(goods.is_goods());
        assert!(!service.is_goods());
    }
}
