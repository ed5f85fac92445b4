//! End-to-end lifecycle tests through the use-case layer.
//!
//! Exercises the full place → amend → execute → reconcile flow against the
//! in-memory ledger store, including the contention behavior of concurrent
//! executions of one order.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use ledger_engine::application::services::OrderLockMap;
use ledger_engine::application::use_cases::{
    AmendOrderUseCase, CancelOrderUseCase, ExecuteOrderUseCase, PlaceOrderUseCase, QueryUseCase,
};
use ledger_engine::domain::order::OrderStatus;
use ledger_engine::domain::shared::{Quantity, Security, UserId};
use ledger_engine::error::ErrorCode;
use ledger_engine::infrastructure::persistence::InMemoryLedgerStore;

struct Engine {
    place: PlaceOrderUseCase<InMemoryLedgerStore>,
    amend: AmendOrderUseCase<InMemoryLedgerStore>,
    cancel: CancelOrderUseCase<InMemoryLedgerStore>,
    execute: Arc<ExecuteOrderUseCase<InMemoryLedgerStore>>,
    queries: QueryUseCase<InMemoryLedgerStore>,
}

fn engine() -> Engine {
    let ledger = Arc::new(InMemoryLedgerStore::new());
    let locks = Arc::new(OrderLockMap::new());
    Engine {
        place: PlaceOrderUseCase::new(Arc::clone(&ledger)),
        amend: AmendOrderUseCase::new(Arc::clone(&ledger), Arc::clone(&locks), 3),
        cancel: CancelOrderUseCase::new(Arc::clone(&ledger), Arc::clone(&locks), 3),
        execute: Arc::new(ExecuteOrderUseCase::new(
            Arc::clone(&ledger),
            Arc::clone(&locks),
            3,
        )),
        queries: QueryUseCase::new(ledger),
    }
}

fn alice() -> UserId {
    UserId::new("alice")
}

fn bob() -> UserId {
    UserId::new("bob")
}

#[tokio::test]
async fn place_partial_fill_then_complete_rolls_into_portfolio() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(100))
        .await
        .unwrap();

    // First partial fill.
    let receipt = engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(40))
        .await
        .unwrap();
    assert_eq!(receipt.filled, Quantity::new(40));
    assert_eq!(receipt.order.status(), OrderStatus::Pending);
    assert_eq!(receipt.order.remaining(), Quantity::new(60));

    // Second fill completes the order.
    let receipt = engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(60))
        .await
        .unwrap();
    assert_eq!(receipt.order.status(), OrderStatus::Executed);
    assert_eq!(receipt.order.remaining(), Quantity::ZERO);

    // Both fills landed in the portfolio.
    let holdings = engine.queries.list_portfolio(&alice()).await.unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].security().as_str(), "AAPL");
    assert_eq!(holdings[0].quantity(), Quantity::new(100));
}

#[tokio::test]
async fn fills_for_one_security_accumulate_across_orders() {
    let engine = engine();
    for qty in [10, 25] {
        let order = engine
            .place
            .execute(alice(), Security::new("MSFT"), Quantity::new(qty))
            .await
            .unwrap();
        engine
            .execute
            .execute(&alice(), order.id(), Quantity::new(qty))
            .await
            .unwrap();
    }

    let holdings = engine.queries.list_portfolio(&alice()).await.unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].quantity(), Quantity::new(35));
}

#[tokio::test]
async fn amend_below_executed_is_rejected_and_leaves_order_intact() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(100))
        .await
        .unwrap();
    engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(70))
        .await
        .unwrap();

    // Equal to executed is also rejected: completion only happens via fills.
    for bad_qty in [50, 70] {
        let err = engine
            .amend
            .execute(&alice(), order.id(), Quantity::new(bad_qty))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    let amended = engine
        .amend
        .execute(&alice(), order.id(), Quantity::new(80))
        .await
        .unwrap();
    assert_eq!(amended.quantity(), Quantity::new(80));
    assert_eq!(amended.executed_qty(), Quantity::new(70));
    assert_eq!(amended.remaining(), Quantity::new(10));
}

#[tokio::test]
async fn cancelled_order_rejects_amend_and_execute() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(10))
        .await
        .unwrap();

    let cancelled = engine.cancel.execute(&alice(), order.id()).await.unwrap();
    assert_eq!(cancelled.status(), OrderStatus::Cancelled);

    let err = engine
        .amend
        .execute(&alice(), order.id(), Quantity::new(20))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);

    let err = engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(5))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);

    // Cancelling again is equally invalid.
    let err = engine.cancel.execute(&alice(), order.id()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
}

#[tokio::test]
async fn executed_order_reports_nothing_to_execute() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(10))
        .await
        .unwrap();
    engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(10))
        .await
        .unwrap();

    let err = engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
}

#[tokio::test]
async fn overfill_is_rejected_without_side_effects() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(10))
        .await
        .unwrap();

    let err = engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(11))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);

    // Rejected fill must not have touched the portfolio.
    let holdings = engine.queries.list_portfolio(&alice()).await.unwrap();
    assert!(holdings.is_empty());

    let orders = engine.queries.list_orders(&alice()).await.unwrap();
    assert_eq!(orders[0].executed_qty(), Quantity::ZERO);
}

#[tokio::test]
async fn other_users_orders_are_invisible() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(10))
        .await
        .unwrap();

    // Bob sees nothing and cannot act on Alice's order. The error is
    // indistinguishable from a missing order.
    assert!(engine.queries.list_orders(&bob()).await.unwrap().is_empty());

    let err = engine
        .cancel
        .execute(&bob(), order.id())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = engine
        .execute
        .execute(&bob(), order.id(), Quantity::new(1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn execution_preview_does_not_mutate() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(100))
        .await
        .unwrap();
    engine
        .execute
        .execute(&alice(), order.id(), Quantity::new(30))
        .await
        .unwrap();

    let (previewed, remaining) = engine
        .queries
        .execution_preview(&alice(), order.id())
        .await
        .unwrap();
    assert_eq!(remaining, Quantity::new(70));
    assert_eq!(previewed.executed_qty(), Quantity::new(30));

    // Preview again: identical answer, nothing moved.
    let (_, remaining_again) = engine
        .queries
        .execution_preview(&alice(), order.id())
        .await
        .unwrap();
    assert_eq!(remaining_again, Quantity::new(70));
}

#[tokio::test]
async fn concurrent_fills_never_exceed_order_quantity() {
    let engine = engine();
    let order = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(100))
        .await
        .unwrap();

    // 8 tasks each try to fill 30 units of a 100-unit order. Only three can
    // succeed in full; the rest must fail cleanly.
    let mut handles = Vec::new();
    for _ in 0..8 {
        let execute = Arc::clone(&engine.execute);
        let order_id = order.id().clone();
        handles.push(tokio::spawn(async move {
            execute.execute(&alice(), &order_id, Quantity::new(30)).await
        }));
    }

    let mut filled_total = 0;
    for handle in handles {
        if let Ok(receipt) = handle.await.unwrap() {
            filled_total += receipt.filled.units();
        }
    }
    assert_eq!(filled_total, 90);

    let orders = engine.queries.list_orders(&alice()).await.unwrap();
    assert_eq!(orders[0].executed_qty(), Quantity::new(90));
    assert_eq!(orders[0].status(), OrderStatus::Pending);

    // The portfolio agrees with the order exactly.
    let holdings = engine.queries.list_portfolio(&alice()).await.unwrap();
    assert_eq!(holdings[0].quantity(), Quantity::new(90));
}

#[tokio::test]
async fn orders_list_newest_first() {
    let engine = engine();
    let first = engine
        .place
        .execute(alice(), Security::new("AAPL"), Quantity::new(1))
        .await
        .unwrap();
    let second = engine
        .place
        .execute(alice(), Security::new("MSFT"), Quantity::new(2))
        .await
        .unwrap();

    let orders = engine.queries.list_orders(&alice()).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id(), second.id());
    assert_eq!(orders[1].id(), first.id());
}

#[tokio::test]
async fn portfolio_lists_securities_in_order() {
    let engine = engine();
    for security in ["MSFT", "AAPL", "GOOG"] {
        let order = engine
            .place
            .execute(alice(), Security::new(security), Quantity::new(5))
            .await
            .unwrap();
        engine
            .execute
            .execute(&alice(), order.id(), Quantity::new(5))
            .await
            .unwrap();
    }

    let holdings = engine.queries.list_portfolio(&alice()).await.unwrap();
    let securities: Vec<&str> = holdings.iter().map(|h| h.security().as_str()).collect();
    assert_eq!(securities, vec!["AAPL", "GOOG", "MSFT"]);
}
