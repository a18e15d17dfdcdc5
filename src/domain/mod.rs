//! Core domain types and logic.

pub mod transaction;
pub mod validation;
pub mod summary;
pub mod config;
pub mod error;
