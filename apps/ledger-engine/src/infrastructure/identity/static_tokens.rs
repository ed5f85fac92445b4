//! Static token identity adapter.
//!
//! Resolves bearer tokens against a fixed token-to-user table supplied by
//! configuration. Stands in for a real identity provider at the engine
//! boundary; the engine only ever sees the resolved `UserId`.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{IdentityError, IdentityProvider};
use crate::domain::shared::UserId;

/// Identity provider backed by a static token table.
#[derive(Debug, Default)]
pub struct StaticTokenIdentity {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenIdentity {
    /// Create an empty provider (every token rejected).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// Build from `token => user` pairs.
    #[must_use]
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            tokens: pairs
                .into_iter()
                .map(|(token, user)| (token.into(), UserId::new(user.into())))
                .collect(),
        }
    }

    /// Register a token for a user.
    pub fn insert(&mut self, token: impl Into<String>, user: UserId) {
        self.tokens.insert(token.into(), user);
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentity {
    async fn resolve(&self, token: &str) -> Result<UserId, IdentityError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(IdentityError::InvalidCredential)
    }
}
