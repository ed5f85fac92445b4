//! Place Order Use Case

use std::sync::Arc;

use crate::application::ports::LedgerStore;
use crate::domain::order::{Order, PlaceOrderCommand};
use crate::domain::shared::{Quantity, Security, UserId};
use crate::error::EngineError;

/// Use case for placing a new order.
pub struct PlaceOrderUseCase<L: LedgerStore> {
    ledger: Arc<L>,
}

impl<L: LedgerStore> PlaceOrderUseCase<L> {
    /// Create a new `PlaceOrderUseCase`.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Place an order for the caller.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty security or non-positive quantity.
    /// - `StorageFailure` if the store rejects the insert.
    pub async fn execute(
        &self,
        owner: UserId,
        security: Security,
        quantity: Quantity,
    ) -> Result<Order, EngineError> {
        let order = Order::place(PlaceOrderCommand {
            owner,
            security,
            quantity,
        })?;

        self.ledger
            .insert_order(&order)
            .await
            .map_err(|e| EngineError::storage_failure(e.to_string()))?;

        tracing::info!(
            order_id = %order.id(),
            owner = %order.owner(),
            security = %order.security(),
            quantity = %order.quantity(),
            "Order placed"
        );

        Ok(order)
    }
}
