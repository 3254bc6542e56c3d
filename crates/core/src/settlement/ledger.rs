//! Ledger builder: folds expenses into net balances per member.
//!
//! The builder is the leaf stage of the engine. It validates each expense
//! against the roster before touching any balance, credits the payer the
//! full amount, and debits each participant an exact integer share. Because
//! every share distribution sums to the expense amount bit-for-bit, the
//! resulting sheet sums to exactly zero, and because integer addition
//! commutes, the result is independent of expense order.

use std::collections::{BTreeMap, BTreeSet};

use splittrip_shared::types::{MemberId, Money};

use super::error::SettlementError;
use super::types::{BalanceSheet, Expense};

/// Builds net balance sheets from raw expense lists.
pub struct LedgerBuilder;

impl LedgerBuilder {
    /// Folds `expenses` over `roster` into a net balance per member.
    ///
    /// Every roster member appears in the output, including members with a
    /// zero net. The output sums to exactly zero.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::InvalidExpense`] if an expense has a non-positive
    ///   amount or no participants.
    /// - [`SettlementError::UnknownMember`] if an expense references a payer
    ///   or participant outside the roster.
    ///
    /// Either error fails the whole computation; no partial sheet escapes.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use splittrip_core::settlement::{Expense, LedgerBuilder};
    /// use splittrip_shared::types::{MemberId, Money};
    ///
    /// let roster = BTreeSet::from([MemberId::new("ana"), MemberId::new("ben")]);
    /// let expenses = vec![Expense::new(
    ///     MemberId::new("ana"),
    ///     Money::from_minor(200),
    ///     [MemberId::new("ana"), MemberId::new("ben")],
    /// )];
    ///
    /// let sheet = LedgerBuilder::build(&roster, &expenses)?;
    /// assert_eq!(sheet.net(&MemberId::new("ana")), Money::from_minor(100));
    /// assert_eq!(sheet.net(&MemberId::new("ben")), Money::from_minor(-100));
    /// # Ok::<(), splittrip_core::settlement::SettlementError>(())
    /// ```
    pub fn build(
        roster: &BTreeSet<MemberId>,
        expenses: &[Expense],
    ) -> Result<BalanceSheet, SettlementError> {
        let mut balances: BTreeMap<MemberId, Money> = roster
            .iter()
            .map(|member| (member.clone(), Money::ZERO))
            .collect();

        for expense in expenses {
            Self::validate(roster, expense)?;
            Self::apply(&mut balances, expense);
        }

        Ok(BalanceSheet::new(balances))
    }

    /// Splits `amount` into `count` integer shares that sum to `amount`
    /// exactly.
    ///
    /// Each share is `amount / count` rounded down; the `amount % count`
    /// leftover minor units are handed out one-by-one starting from the
    /// first share. Callers that iterate participants in ascending ID order
    /// therefore assign the residual deterministically.
    #[must_use]
    pub fn split_equal(amount: Money, count: usize) -> Vec<Money> {
        if count == 0 {
            return Vec::new();
        }

        let divisor = count as i64;
        let base = amount.minor().div_euclid(divisor);
        let leftover = amount.minor().rem_euclid(divisor);

        (0..divisor)
            .map(|i| {
                if i < leftover {
                    Money::from_minor(base + 1)
                } else {
                    Money::from_minor(base)
                }
            })
            .collect()
    }

    /// Rejects malformed expenses and roster violations before any mutation.
    fn validate(roster: &BTreeSet<MemberId>, expense: &Expense) -> Result<(), SettlementError> {
        if !expense.amount.is_positive() {
            return Err(SettlementError::InvalidExpense {
                reason: format!("amount must be positive, got {}", expense.amount),
            });
        }
        if expense.participants.is_empty() {
            return Err(SettlementError::InvalidExpense {
                reason: "expense has no participants".to_string(),
            });
        }
        if !roster.contains(&expense.payer) {
            return Err(SettlementError::UnknownMember(expense.payer.clone()));
        }
        if let Some(missing) = expense
            .participants
            .iter()
            .find(|participant| !roster.contains(*participant))
        {
            return Err(SettlementError::UnknownMember(missing.clone()));
        }
        Ok(())
    }

    /// Credits the payer and debits each participant's share.
    ///
    /// The expense has already been validated, so every referenced member has
    /// an entry in `balances`.
    fn apply(balances: &mut BTreeMap<MemberId, Money>, expense: &Expense) {
        if let Some(balance) = balances.get_mut(&expense.payer) {
            *balance += expense.amount;
        }

        let shares = Self::split_equal(expense.amount, expense.participants.len());
        for (participant, share) in expense.participants.iter().zip(shares) {
            if let Some(balance) = balances.get_mut(participant) {
                *balance -= share;
            }
        }
    }
}
