//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that resolves the caller identity once per request
//! and delegates to the application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
};

use crate::application::ports::{IdentityProvider, LedgerStore};
use crate::application::use_cases::{
    AmendOrderUseCase, CancelOrderUseCase, ExecuteOrderUseCase, PlaceOrderUseCase, QueryUseCase,
};
use crate::domain::shared::{OrderId, Quantity, Security, UserId};
use crate::error::EngineError;

use super::request::{AmendOrderRequest, ExecuteOrderRequest, PlaceOrderRequest};
use super::response::{
    ExecutionPreviewResponse, ExecutionResponse, HealthResponse, HoldingResponse,
    ListOrdersResponse, OrderResponse, PortfolioResponse,
};

/// Application state shared across handlers.
pub struct AppState<L, I>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    /// Use case for placing orders.
    pub place_order: Arc<PlaceOrderUseCase<L>>,
    /// Use case for amending orders.
    pub amend_order: Arc<AmendOrderUseCase<L>>,
    /// Use case for cancelling orders.
    pub cancel_order: Arc<CancelOrderUseCase<L>>,
    /// Use case for executing fills.
    pub execute_order: Arc<ExecuteOrderUseCase<L>>,
    /// Read-only queries.
    pub queries: Arc<QueryUseCase<L>>,
    /// Identity provider for bearer tokens.
    pub identity: Arc<I>,
    /// Application version.
    pub version: String,
}

impl<L, I> Clone for AppState<L, I>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    fn clone(&self) -> Self {
        Self {
            place_order: Arc::clone(&self.place_order),
            amend_order: Arc::clone(&self.amend_order),
            cancel_order: Arc::clone(&self.cancel_order),
            execute_order: Arc::clone(&self.execute_order),
            queries: Arc::clone(&self.queries),
            identity: Arc::clone(&self.identity),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<L, I>(state: AppState<L, I>) -> Router
where
    L: LedgerStore + 'static,
    I: IdentityProvider + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/orders", post(place_order).get(list_orders))
        .route("/api/v1/orders/{id}/amend", patch(amend_order))
        .route("/api/v1/orders/{id}/cancel", patch(cancel_order))
        .route("/api/v1/orders/{id}/execution", get(execution_preview))
        .route("/api/v1/orders/{id}/execute", post(execute_order))
        .route("/api/v1/portfolio", get(list_portfolio))
        .with_state(state)
}

/// Resolve the caller identity from the Authorization header.
async fn authenticate<I: IdentityProvider>(
    identity: &I,
    headers: &HeaderMap,
) -> Result<UserId, ApiError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError(EngineError::unauthenticated()))?;

    identity
        .resolve(token)
        .await
        .map_err(|_| ApiError(EngineError::unauthenticated()))
}

/// Health check endpoint.
async fn health_check<L, I>(State(state): State<AppState<L, I>>) -> impl IntoResponse
where
    L: LedgerStore,
    I: IdentityProvider,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Place order endpoint.
async fn place_order<L, I>(
    State(state): State<AppState<L, I>>,
    headers: HeaderMap,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    let caller = authenticate(state.identity.as_ref(), &headers).await?;

    let order = state
        .place_order
        .execute(
            caller,
            Security::new(request.security),
            Quantity::new(request.quantity),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from_order(&order))))
}

/// List orders endpoint.
async fn list_orders<L, I>(
    State(state): State<AppState<L, I>>,
    headers: HeaderMap,
) -> Result<Json<ListOrdersResponse>, ApiError>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    let caller = authenticate(state.identity.as_ref(), &headers).await?;

    let orders = state.queries.list_orders(&caller).await?;
    Ok(Json(ListOrdersResponse {
        orders: orders.iter().map(OrderResponse::from_order).collect(),
    }))
}

/// Amend order endpoint.
async fn amend_order<L, I>(
    State(state): State<AppState<L, I>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<AmendOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    let caller = authenticate(state.identity.as_ref(), &headers).await?;

    let order = state
        .amend_order
        .execute(&caller, &OrderId::new(id), Quantity::new(request.quantity))
        .await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// Cancel order endpoint.
async fn cancel_order<L, I>(
    State(state): State<AppState<L, I>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<OrderResponse>, ApiError>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    let caller = authenticate(state.identity.as_ref(), &headers).await?;

    let order = state
        .cancel_order
        .execute(&caller, &OrderId::new(id))
        .await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// Execution preview endpoint. Read-only.
async fn execution_preview<L, I>(
    State(state): State<AppState<L, I>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ExecutionPreviewResponse>, ApiError>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    let caller = authenticate(state.identity.as_ref(), &headers).await?;

    let (order, remaining) = state
        .queries
        .execution_preview(&caller, &OrderId::new(id))
        .await?;
    Ok(Json(ExecutionPreviewResponse {
        order: OrderResponse::from_order(&order),
        remaining: remaining.units(),
    }))
}

/// Execute order endpoint.
async fn execute_order<L, I>(
    State(state): State<AppState<L, I>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ExecuteOrderRequest>,
) -> Result<Json<ExecutionResponse>, ApiError>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    let caller = authenticate(state.identity.as_ref(), &headers).await?;

    let receipt = state
        .execute_order
        .execute(&caller, &OrderId::new(id), Quantity::new(request.fill_qty))
        .await?;
    Ok(Json(ExecutionResponse {
        order: OrderResponse::from_order(&receipt.order),
        filled: receipt.filled.units(),
    }))
}

/// List portfolio endpoint.
async fn list_portfolio<L, I>(
    State(state): State<AppState<L, I>>,
    headers: HeaderMap,
) -> Result<Json<PortfolioResponse>, ApiError>
where
    L: LedgerStore,
    I: IdentityProvider,
{
    let caller = authenticate(state.identity.as_ref(), &headers).await?;

    let holdings = state.queries.list_portfolio(&caller).await?;
    Ok(Json(PortfolioResponse {
        portfolio: holdings.iter().map(HoldingResponse::from_holding).collect(),
    }))
}

/// API error wrapper mapping engine errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.0.code().http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.to_response())).into_response()
    }
}
