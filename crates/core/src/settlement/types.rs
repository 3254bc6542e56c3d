//! Settlement domain types.
//!
//! These are the value types the engine consumes and produces. Balances and
//! instructions are ephemeral projections recomputed from the expense
//! snapshot on every request; nothing here is a persistent entity.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use splittrip_shared::types::{MemberId, Money};

/// A recorded trip expense.
///
/// `participants` is the set of members the amount is split between and need
/// not include the payer (someone can pay for a dinner they skipped). Every
/// referenced member must belong to the trip roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The member who paid the full amount up front.
    pub payer: MemberId,
    /// The amount paid, in minor units. Must be positive.
    pub amount: Money,
    /// The members sharing the expense. Must be non-empty.
    pub participants: BTreeSet<MemberId>,
}

impl Expense {
    /// Creates an expense split between the given participants.
    #[must_use]
    pub fn new(
        payer: MemberId,
        amount: Money,
        participants: impl IntoIterator<Item = MemberId>,
    ) -> Self {
        Self {
            payer,
            amount,
            participants: participants.into_iter().collect(),
        }
    }
}

/// Net balances for every roster member, keyed by member ID.
///
/// Positive means the member is owed money, negative means the member owes
/// money. Builder output always sums to exactly zero; sheets constructed by
/// hand are re-checked by the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    balances: BTreeMap<MemberId, Money>,
}

impl BalanceSheet {
    /// Creates a sheet from a prepared balance mapping.
    #[must_use]
    pub fn new(balances: BTreeMap<MemberId, Money>) -> Self {
        Self { balances }
    }

    /// Returns the net position of a member, zero if absent.
    #[must_use]
    pub fn net(&self, member: &MemberId) -> Money {
        self.balances.get(member).copied().unwrap_or(Money::ZERO)
    }

    /// Iterates members in ascending ID order with their net positions.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Money)> {
        self.balances.iter().map(|(member, net)| (member, *net))
    }

    /// Number of members on the sheet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns true if the sheet has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Sum of all net positions; exactly zero for any builder output.
    #[must_use]
    pub fn total(&self) -> Money {
        self.balances.values().sum()
    }

    /// Flattens the sheet into presentation rows, ascending by member ID.
    #[must_use]
    pub fn to_member_balances(&self) -> Vec<MemberBalance> {
        self.balances
            .iter()
            .map(|(member, net)| MemberBalance {
                member: member.clone(),
                net_amount: *net,
            })
            .collect()
    }
}

impl FromIterator<(MemberId, Money)> for BalanceSheet {
    fn from_iter<I: IntoIterator<Item = (MemberId, Money)>>(iter: I) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

/// One member's net position, for presentation to callers.
///
/// Display names are attached by the caller; the engine only knows IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// The member this row belongs to.
    pub member: MemberId,
    /// Net position: positive = owed money, negative = owes money.
    pub net_amount: Money,
}

/// A directed transfer that reduces one debtor's and one creditor's
/// outstanding balance: "`from` pays `amount` to `to`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    /// The paying member (a debtor).
    pub from: MemberId,
    /// The receiving member (a creditor).
    pub to: MemberId,
    /// The transfer amount. Always positive.
    pub amount: Money,
}

/// Balances and settlement instructions for a trip, computed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Net position per roster member, ascending by member ID.
    pub balances: Vec<MemberBalance>,
    /// Transfers that settle all debts, in generation order.
    pub instructions: Vec<SettlementInstruction>,
}
