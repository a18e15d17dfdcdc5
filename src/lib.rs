//! ledgerline — personal income and expense ledger.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], wiring and menu loop in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
