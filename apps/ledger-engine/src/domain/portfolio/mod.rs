//! Portfolio Aggregate
//!
//! Per-user holdings, accumulated from executed fill deltas.

pub mod holding;

pub use holding::PortfolioHolding;
