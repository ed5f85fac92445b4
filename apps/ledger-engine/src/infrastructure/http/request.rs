//! HTTP request bodies.
//!
//! Inputs are validated against explicit constraints in the domain layer;
//! these types only define the wire shape.

use serde::{Deserialize, Serialize};

/// Body for placing a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Security identifier, non-empty.
    pub security: String,
    /// Total requested size in units, positive.
    pub quantity: i64,
}

/// Body for amending a pending order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmendOrderRequest {
    /// New total size in units, positive and above the executed quantity.
    pub quantity: i64,
}

/// Body for executing part or all of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteOrderRequest {
    /// Operator-approved fill quantity in units, positive and at most the
    /// remaining quantity.
    pub fill_qty: i64,
}
