//! Ledger store adapters.

pub mod in_memory;

pub use in_memory::InMemoryLedgerStore;

#[cfg(test)]
pub(crate) use in_memory::test_support::ContendedLedgerStore;
