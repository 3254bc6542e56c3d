//! Settlement service facade.
//!
//! The operations the owning service layer calls. Each is a pure function of
//! its inputs; balances and plans are recomputed from the current expense
//! snapshot on every call, so concurrent requests for different trips need
//! no coordination.

use std::collections::BTreeSet;

use splittrip_shared::types::MemberId;

use super::error::SettlementError;
use super::ledger::LedgerBuilder;
use super::planner::SettlementPlanner;
use super::types::{BalanceSheet, Expense, SettlementInstruction, SettlementSummary};

/// Facade over the ledger builder and settlement planner.
pub struct SettlementService;

impl SettlementService {
    /// Computes each roster member's net balance from the expense list.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError`] if an expense is malformed or references
    /// a member outside the roster.
    pub fn compute_balances(
        roster: &BTreeSet<MemberId>,
        expenses: &[Expense],
    ) -> Result<BalanceSheet, SettlementError> {
        LedgerBuilder::build(roster, expenses)
    }

    /// Computes the transfer list that settles the given balances.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::Unbalanced`] if the balances do not settle
    /// to zero (the sheet did not come from [`Self::compute_balances`]).
    pub fn compute_settlement_plan(
        balances: &BalanceSheet,
    ) -> Result<Vec<SettlementInstruction>, SettlementError> {
        SettlementPlanner::plan(balances)
    }

    /// Computes balances and settlement instructions in one call, for
    /// callers that always want both.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError`] under the same conditions as the two
    /// stages it composes.
    pub fn compute_settlement_summary(
        roster: &BTreeSet<MemberId>,
        expenses: &[Expense],
    ) -> Result<SettlementSummary, SettlementError> {
        let sheet = LedgerBuilder::build(roster, expenses)?;
        let instructions = SettlementPlanner::plan(&sheet)?;
        Ok(SettlementSummary {
            balances: sheet.to_member_balances(),
            instructions,
        })
    }
}
