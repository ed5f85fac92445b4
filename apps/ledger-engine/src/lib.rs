// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Ledger Engine - Order Execution & Portfolio Reconciliation
//!
//! Manages the full order lifecycle (place, amend, cancel, execute) with
//! partial-fill accounting, and reconciles confirmed fills into per-user
//! portfolio holdings.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic with no external dependencies
//!   - `order`: Order aggregate, status lifecycle, fill accounting
//!   - `portfolio`: Portfolio holding entity
//!   - `shared`: Identifiers, quantities, securities, timestamps
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: `LedgerStore` and `IdentityProvider` interfaces
//!   - `use_cases`: `PlaceOrder`, `AmendOrder`, `CancelOrder`, `ExecuteOrder`, queries
//!   - `services`: per-order lock map for write serialization
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: in-memory ledger store with versioned writes
//!   - `identity`: static bearer-token identity provider
//!   - `http`: axum REST API

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Engine configuration.
pub mod config;

/// Error taxonomy shared across layers.
pub mod error;

// Domain re-exports
pub use domain::order::{Order, OrderStatus, PlaceOrderCommand};
pub use domain::portfolio::PortfolioHolding;
pub use domain::shared::{OrderId, Quantity, Security, Timestamp, UserId};

// Application re-exports
pub use application::ports::{IdentityProvider, LedgerStore, StoreError};
pub use application::services::OrderLockMap;
pub use application::use_cases::{
    AmendOrderUseCase, CancelOrderUseCase, ExecuteOrderUseCase, PlaceOrderUseCase, QueryUseCase,
};

// Infrastructure re-exports
pub use config::EngineConfig;
pub use error::{EngineError, ErrorCode};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::identity::StaticTokenIdentity;
pub use infrastructure::persistence::InMemoryLedgerStore;
