//! Application ports: interfaces to external collaborators.

pub mod identity_port;
pub mod ledger_port;

pub use identity_port::{IdentityError, IdentityProvider};
pub use ledger_port::{LedgerStore, StoreError};
