//! Valuation-layer creation hook for "taken from" tagging.
//!
//! FIFO-style costing can annotate each new valuation layer with the data of
//! the layers it was taken from. That annotation is not a persisted field:
//! it is stripped from the record values and threaded through the creation
//! context as a parallel list aligned by creation order, for the underlying
//! creation routine to consume.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockdepot_core::{DomainResult, RecordId};
use stockdepot_products::ProductId;

/// Valuation layer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuationLayerId(pub RecordId);

impl ValuationLayerId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ValuationLayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Field values for one valuation layer to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationLayerValues {
    pub product_id: ProductId,
    pub quantity: f64,
    /// Value in smallest currency unit (e.g., cents); negative for out moves.
    pub value: i64,
    /// Optional "taken from" annotation, consumed by the creation context
    /// rather than persisted with the layer.
    pub taken_data: Option<JsonValue>,
}

/// Ambient per-call context for layer creation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerContext {
    /// One entry per record being created, aligned by creation order.
    /// Records without an annotation get an empty object.
    pub taken_data: Option<Vec<JsonValue>>,
}

/// Record-creation hook for valuation layers. The base implementation is
/// supplied by the valuation engine; [`TakenDataHook`] wraps one to divert
/// the taken-data payloads into the context.
pub trait ValuationLayerCreator {
    fn create(
        &mut self,
        values: Vec<ValuationLayerValues>,
        ctx: &LayerContext,
    ) -> DomainResult<Vec<ValuationLayerId>>;
}

/// Strips `taken_data` from incoming values and threads it through the
/// creation context. Batches without any annotation pass through unchanged.
pub struct TakenDataHook<C> {
    inner: C,
}

impl<C: ValuationLayerCreator> TakenDataHook<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: ValuationLayerCreator> ValuationLayerCreator for TakenDataHook<C> {
    fn create(
        &mut self,
        mut values: Vec<ValuationLayerValues>,
        ctx: &LayerContext,
    ) -> DomainResult<Vec<ValuationLayerId>> {
        if values.iter().all(|v| v.taken_data.is_none()) {
            return self.inner.create(values, ctx);
        }
        let taken_data: Vec<JsonValue> = values
            .iter_mut()
            .map(|v| {
                v.taken_data
                    .take()
                    .unwrap_or_else(|| JsonValue::Object(serde_json::Map::new()))
            })
            .collect();
        let ctx = LayerContext {
            taken_data: Some(taken_data),
        };
        self.inner.create(values, &ctx)
    }
}
