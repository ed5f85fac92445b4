//! Ledger Engine Binary
//!
//! Starts the order execution and portfolio reconciliation engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ledger-engine
//! ```
//!
//! # Environment Variables
//!
//! - `LEDGER_HOST`: HTTP bind host (default: 127.0.0.1)
//! - `LEDGER_PORT`: HTTP bind port (default: 8080)
//! - `LEDGER_MAX_COMMIT_RETRIES`: retry bound on write contention (default: 3)
//! - `LEDGER_TOKENS`: static bearer tokens as `token:user` pairs, comma separated
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use ledger_engine::application::services::OrderLockMap;
use ledger_engine::application::use_cases::{
    AmendOrderUseCase, CancelOrderUseCase, ExecuteOrderUseCase, PlaceOrderUseCase, QueryUseCase,
};
use ledger_engine::config::EngineConfig;
use ledger_engine::infrastructure::http::{AppState, create_router};
use ledger_engine::infrastructure::identity::StaticTokenIdentity;
use ledger_engine::infrastructure::persistence::InMemoryLedgerStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = EngineConfig::load()?;
    log_config(&config);

    let state = build_state(&config);
    let router = create_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Ledger engine listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Ledger engine stopped");
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is a compile-time constant guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "ledger_engine=info"
                    .parse()
                    .expect("static directive 'ledger_engine=info' is valid"),
            ),
        )
        .init();
}

/// Log the parsed configuration.
fn log_config(config: &EngineConfig) {
    tracing::info!(
        host = %config.host,
        port = config.port,
        max_commit_retries = config.max_commit_retries,
        token_count = config.token_pairs().len(),
        "Configuration loaded"
    );
}

/// Wire the in-memory store, identity provider, and use cases into shared state.
fn build_state(config: &EngineConfig) -> AppState<InMemoryLedgerStore, StaticTokenIdentity> {
    let ledger = Arc::new(InMemoryLedgerStore::new());
    let locks = Arc::new(OrderLockMap::new());
    let identity = Arc::new(StaticTokenIdentity::from_pairs(config.token_pairs()));

    AppState {
        place_order: Arc::new(PlaceOrderUseCase::new(Arc::clone(&ledger))),
        amend_order: Arc::new(AmendOrderUseCase::new(
            Arc::clone(&ledger),
            Arc::clone(&locks),
            config.max_commit_retries,
        )),
        cancel_order: Arc::new(CancelOrderUseCase::new(
            Arc::clone(&ledger),
            Arc::clone(&locks),
            config.max_commit_retries,
        )),
        execute_order: Arc::new(ExecuteOrderUseCase::new(
            Arc::clone(&ledger),
            Arc::clone(&locks),
            config.max_commit_retries,
        )),
        queries: Arc::new(QueryUseCase::new(Arc::clone(&ledger))),
        identity,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Resolve when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
