//! # AuthConsole Domain
//!
//! Business domain types and models for AuthConsole.
//!
//! This crate contains:
//! - Access-control models (platforms, roles, permissions, profiles and their
//!   assignments)
//! - Expense-tracking models (accounts, categories, transactions, budgets,
//!   insights)
//! - The JSON response envelope shared by every endpoint
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other AuthConsole crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
