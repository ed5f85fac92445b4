//! Identity Provider Port
//!
//! Maps a bearer credential to a caller identity. The engine trusts the
//! returned identity for every ownership check and never holds
//! cross-request session state itself.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::shared::UserId;

/// Errors from identity resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The credential is missing, malformed, or unknown.
    #[error("Invalid or unknown credential")]
    InvalidCredential,
}

/// Port for resolving caller identity, once per request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to a user identity.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidCredential` if the token cannot be resolved.
    async fn resolve(&self, token: &str) -> Result<UserId, IdentityError>;
}
