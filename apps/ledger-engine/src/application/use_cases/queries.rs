//! Query Use Cases
//!
//! Read-only views over the caller's orders and holdings, plus the
//! execution preview. No query mutates state.

use std::sync::Arc;

use super::amend_order::load_owned;
use crate::application::ports::LedgerStore;
use crate::domain::order::{Order, OrderError};
use crate::domain::portfolio::PortfolioHolding;
use crate::domain::shared::{OrderId, Quantity, UserId};
use crate::error::EngineError;

/// Read-only queries over orders and holdings.
pub struct QueryUseCase<L: LedgerStore> {
    ledger: Arc<L>,
}

impl<L: LedgerStore> QueryUseCase<L> {
    /// Create a new `QueryUseCase`.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// All orders owned by the caller, newest first.
    ///
    /// # Errors
    ///
    /// Fails with `StorageFailure` if the store is unavailable.
    pub async fn list_orders(&self, caller: &UserId) -> Result<Vec<Order>, EngineError> {
        self.ledger
            .list_orders(caller)
            .await
            .map_err(|e| EngineError::storage_failure(e.to_string()))
    }

    /// All holdings owned by the caller, sorted by security.
    ///
    /// # Errors
    ///
    /// Fails with `StorageFailure` if the store is unavailable.
    pub async fn list_portfolio(
        &self,
        caller: &UserId,
    ) -> Result<Vec<PortfolioHolding>, EngineError> {
        self.ledger
            .list_holdings(caller)
            .await
            .map_err(|e| EngineError::storage_failure(e.to_string()))
    }

    /// Preview an execution: the order plus its remaining fillable
    /// quantity. Same ownership and terminal-status checks as execution
    /// validation, but never mutates.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order is absent or not owned by the caller.
    /// - `InvalidState` if the order is executed or cancelled.
    pub async fn execution_preview(
        &self,
        caller: &UserId,
        order_id: &OrderId,
    ) -> Result<(Order, Quantity), EngineError> {
        let order = load_owned(self.ledger.as_ref(), caller, order_id).await?;

        if order.status().is_terminal() {
            return Err(OrderError::InvalidState {
                operation: "execute",
                status: order.status(),
            }
            .into());
        }

        let remaining = order.remaining();
        Ok((order, remaining))
    }
}
