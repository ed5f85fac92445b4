//! Infrastructure layer - Adapters for the application ports.

pub mod http;
pub mod identity;
pub mod persistence;
