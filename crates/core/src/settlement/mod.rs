//! Balance and settlement engine.
//!
//! This module implements the core trip-splitting functionality:
//! - Expense and balance domain types
//! - Ledger builder folding expenses into net balances
//! - Settlement planner producing pairwise transfer instructions
//! - Service facade combining both stages
//! - Error types for engine operations
//!
//! Both stages are pure, synchronous functions over immutable snapshots:
//! balances and plans are derived values, recomputed from the current
//! expense set on every call.

pub mod error;
pub mod ledger;
pub mod planner;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::SettlementError;
pub use ledger::LedgerBuilder;
pub use planner::{SETTLEMENT_EPSILON, SettlementPlanner};
pub use service::SettlementService;
pub use types::{BalanceSheet, Expense, MemberBalance, SettlementInstruction, SettlementSummary};
