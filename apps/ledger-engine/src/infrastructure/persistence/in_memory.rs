//! In-memory ledger store.
//!
//! Keeps both collections behind one `RwLock` so `commit_fill` can apply
//! the order update and the holding delta under a single write guard.
//! Suitable for testing and single-process deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::ports::{LedgerStore, StoreError};
use crate::domain::order::Order;
use crate::domain::portfolio::PortfolioHolding;
use crate::domain::shared::{OrderId, Quantity, Security, UserId};

#[derive(Debug, Clone)]
struct OrderRecord {
    order: Order,
    // Insertion sequence, used for newest-first listing.
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    orders: HashMap<OrderId, OrderRecord>,
    holdings: HashMap<(UserId, Security), PortfolioHolding>,
    next_seq: u64,
}

/// In-memory implementation of [`LedgerStore`].
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<Inner>,
}

impl InMemoryLedgerStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();

        if inner.orders.contains_key(order.id()) {
            return Err(StoreError::DuplicateOrder {
                order_id: order.id().to_string(),
            });
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.orders.insert(
            order.id().clone(),
            OrderRecord {
                order: order.clone(),
                seq,
            },
        );
        Ok(())
    }

    async fn find_order(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.orders.get(id).map(|r| r.order.clone()))
    }

    async fn update_order(&self, order: &Order) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().unwrap();

        let record = inner
            .orders
            .get_mut(order.id())
            .ok_or_else(|| StoreError::MissingOrder {
                order_id: order.id().to_string(),
            })?;

        if record.order.version() != order.version() {
            return Err(StoreError::VersionConflict {
                order_id: order.id().to_string(),
            });
        }

        let new_version = order.version() + 1;
        record.order = order.clone();
        record.order.set_version(new_version);
        Ok(new_version)
    }

    async fn list_orders(&self, owner: &UserId) -> Result<Vec<Order>, StoreError> {
        let inner = self.inner.read().unwrap();
        let mut records: Vec<&OrderRecord> = inner
            .orders
            .values()
            .filter(|r| r.order.is_owned_by(owner))
            .collect();
        records.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(records.into_iter().map(|r| r.order.clone()).collect())
    }

    async fn commit_fill(&self, order: &Order, delta: Quantity) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().unwrap();

        let record = inner
            .orders
            .get(order.id())
            .ok_or_else(|| StoreError::MissingOrder {
                order_id: order.id().to_string(),
            })?;
        if record.order.version() != order.version() {
            return Err(StoreError::VersionConflict {
                order_id: order.id().to_string(),
            });
        }
        let seq = record.seq;

        // Stage the holding update before touching either collection, so a
        // rejected delta leaves the store untouched.
        let key = (order.owner().clone(), order.security().clone());
        let updated_holding = match inner.holdings.get(&key) {
            Some(existing) => {
                let mut holding = existing.clone();
                holding
                    .apply_delta(delta)
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                holding
            }
            None => PortfolioHolding::open(key.0.clone(), key.1.clone(), delta),
        };

        let new_version = order.version() + 1;
        let mut stored = order.clone();
        stored.set_version(new_version);
        inner.orders.insert(
            order.id().clone(),
            OrderRecord { order: stored, seq },
        );
        inner.holdings.insert(key, updated_holding);
        Ok(new_version)
    }

    async fn list_holdings(&self, owner: &UserId) -> Result<Vec<PortfolioHolding>, StoreError> {
        let inner = self.inner.read().unwrap();
        let mut holdings: Vec<PortfolioHolding> = inner
            .holdings
            .values()
            .filter(|h| h.owner() == owner)
            .cloned()
            .collect();
        holdings.sort_by(|a, b| a.security().cmp(b.security()));
        Ok(holdings)
    }
}
