//! Execute Order Use Case - the Execution Coordinator.
//!
//! Converts an operator-approved fill quantity into a durable, exactly-once
//! update of one order and one portfolio holding. This is the only
//! operation that touches two entities; the order-side write and the
//! holding-side write commit as a single unit through
//! [`LedgerStore::commit_fill`], so no failure or concurrent retry can
//! observe one without the other.
//!
//! The fill quantity arrives as a direct request argument; approval happens
//! out of band. Nothing here ever waits on interactive input.

use std::sync::Arc;

use super::amend_order::load_owned;
use crate::application::ports::{LedgerStore, StoreError};
use crate::application::services::OrderLockMap;
use crate::domain::order::Order;
use crate::domain::shared::{OrderId, Quantity, UserId};
use crate::error::EngineError;

/// Result of a successful execution: the updated order and the quantity
/// actually filled.
#[derive(Debug, Clone)]
pub struct ExecutionReceipt {
    /// The order after the fill was applied.
    pub order: Order,
    /// Quantity confirmed filled by this call.
    pub filled: Quantity,
}

/// Use case for executing part or all of an order.
pub struct ExecuteOrderUseCase<L: LedgerStore> {
    ledger: Arc<L>,
    locks: Arc<OrderLockMap>,
    max_retries: u32,
}

impl<L: LedgerStore> ExecuteOrderUseCase<L> {
    /// Create a new `ExecuteOrderUseCase`.
    pub fn new(ledger: Arc<L>, locks: Arc<OrderLockMap>, max_retries: u32) -> Self {
        Self {
            ledger,
            locks,
            max_retries,
        }
    }

    /// Execute `fill_qty` units of the caller's order.
    ///
    /// Holds the order's exclusive scope across the whole
    /// read-validate-commit sequence, so concurrent executions of the same
    /// order observe each other's effects. On a store version conflict the
    /// full sequence is re-run from a fresh read, a bounded number of
    /// times.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order is absent or not owned by the caller.
    /// - `InvalidState` if the order is executed or cancelled.
    /// - `InvalidInput` if the fill is non-positive or exceeds remaining.
    /// - `NothingToExecute` if no fillable quantity remains.
    /// - `StorageFailure` if the store stays contended past the retry bound.
    pub async fn execute(
        &self,
        caller: &UserId,
        order_id: &OrderId,
        fill_qty: Quantity,
    ) -> Result<ExecutionReceipt, EngineError> {
        let lock = self.locks.lock_for(order_id);
        let _guard = lock.lock().await;

        for _attempt in 0..=self.max_retries {
            let mut order = load_owned(self.ledger.as_ref(), caller, order_id).await?;
            let outcome = order.apply_fill(fill_qty)?;

            match self.ledger.commit_fill(&order, outcome.filled).await {
                Ok(version) => {
                    order.set_version(version);
                    tracing::info!(
                        order_id = %order.id(),
                        owner = %caller,
                        security = %order.security(),
                        filled = %outcome.filled,
                        executed_qty = %order.executed_qty(),
                        status = %order.status(),
                        "Fill committed"
                    );
                    return Ok(ExecutionReceipt {
                        order,
                        filled: outcome.filled,
                    });
                }
                Err(StoreError::VersionConflict { .. }) => {
                    tracing::warn!(
                        order_id = %order_id,
                        "Fill commit hit version conflict, retrying"
                    );
                }
                Err(e) => return Err(EngineError::storage_failure(e.to_string())),
            }
        }

        Err(EngineError::storage_failure(
            "Fill commit kept conflicting, giving up",
        ))
    }
}
