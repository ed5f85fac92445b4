//! HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::portfolio::PortfolioHolding;

/// Wire representation of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order identifier.
    pub id: String,
    /// Security identifier.
    pub security: String,
    /// Total requested size.
    pub quantity: i64,
    /// Quantity executed so far.
    pub executed_qty: i64,
    /// Remaining fillable quantity.
    pub remaining: i64,
    /// Lifecycle status.
    pub status: String,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last update time, RFC 3339.
    pub updated_at: String,
}

impl OrderResponse {
    /// Build from a domain order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            security: order.security().to_string(),
            quantity: order.quantity().units(),
            executed_qty: order.executed_qty().units(),
            remaining: order.remaining().units(),
            status: order.status().to_string(),
            created_at: order.created_at().to_rfc3339(),
            updated_at: order.updated_at().to_rfc3339(),
        }
    }
}

/// Wire representation of a portfolio holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingResponse {
    /// Security identifier.
    pub security: String,
    /// Accumulated quantity.
    pub quantity: i64,
}

impl HoldingResponse {
    /// Build from a domain holding.
    #[must_use]
    pub fn from_holding(holding: &PortfolioHolding) -> Self {
        Self {
            security: holding.security().to_string(),
            quantity: holding.quantity().units(),
        }
    }
}

/// Response for the order list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrdersResponse {
    /// Caller's orders, newest first.
    pub orders: Vec<OrderResponse>,
}

/// Response for the portfolio list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioResponse {
    /// Caller's holdings, sorted by security.
    pub portfolio: Vec<HoldingResponse>,
}

/// Response for an execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// The updated order.
    pub order: OrderResponse,
    /// Quantity confirmed filled by this call.
    pub filled: i64,
}

/// Response for the execution preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPreviewResponse {
    /// The order as stored.
    pub order: OrderResponse,
    /// Remaining fillable quantity.
    pub remaining: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Application version.
    pub version: String,
}
