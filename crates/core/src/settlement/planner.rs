//! Settlement planner: converts net balances into pairwise transfers.
//!
//! The planner is a deterministic greedy two-pointer sweep, not bin-packing:
//! it does not minimize the number of transfers (that problem is NP-hard),
//! it guarantees termination in at most `|creditors| + |debtors| - 1`
//! instructions and leaves every member within [`SETTLEMENT_EPSILON`] of
//! zero. Debtors and creditors are both processed in ascending member-ID
//! order, so the same sheet always yields the same plan.

use splittrip_shared::types::{MemberId, Money};

use super::error::SettlementError;
use super::types::{BalanceSheet, SettlementInstruction};

/// Tolerance below which a balance counts as settled.
///
/// Two minor units, absorbing the residue an integer share split can leave
/// on a single member. Members within the tolerance are excluded from the
/// plan entirely.
pub const SETTLEMENT_EPSILON: Money = Money::from_minor(2);

/// Plans transfers that settle a balance sheet.
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Produces the ordered transfer list that settles `balances`.
    ///
    /// Instructions come out debtor-major, creditor-minor, both ascending by
    /// member ID. Applying every transfer brings each member's net position
    /// to within [`SETTLEMENT_EPSILON`] of zero. A sheet that is already
    /// settled yields an empty list, which is not an error.
    ///
    /// # Errors
    ///
    /// [`SettlementError::Unbalanced`] if the sheet's total is farther than
    /// [`SETTLEMENT_EPSILON`] from zero, or if a member beyond the tolerance
    /// is left without a counterparty. Both indicate balances that did not
    /// come from the ledger builder; no partial plan is returned.
    pub fn plan(balances: &BalanceSheet) -> Result<Vec<SettlementInstruction>, SettlementError> {
        let residual = balances.total();
        if residual.abs() > SETTLEMENT_EPSILON {
            return Err(SettlementError::Unbalanced { residual });
        }

        // BTreeMap iteration yields ascending member IDs, which pins the
        // processing order for both partitions.
        let mut creditors: Vec<(MemberId, Money)> = Vec::new();
        let mut debtors: Vec<(MemberId, Money)> = Vec::new();
        for (member, net) in balances.iter() {
            if net > SETTLEMENT_EPSILON {
                creditors.push((member.clone(), net));
            } else if net < -SETTLEMENT_EPSILON {
                // Stored as positive outstanding debt
                debtors.push((member.clone(), -net));
            }
        }

        let mut instructions = Vec::new();
        let mut cursor = 0;

        for (debtor, mut owed) in debtors {
            while owed > SETTLEMENT_EPSILON {
                let Some((creditor, credit)) = creditors.get_mut(cursor) else {
                    // Debt remains but every creditor is drained: the other
                    // side of this debt is hidden below the tolerance.
                    return Err(SettlementError::Unbalanced { residual: -owed });
                };
                if *credit <= SETTLEMENT_EPSILON {
                    cursor += 1;
                    continue;
                }

                let transfer = owed.min(*credit);
                instructions.push(SettlementInstruction {
                    from: debtor.clone(),
                    to: creditor.clone(),
                    amount: transfer,
                });
                owed -= transfer;
                *credit -= transfer;
            }
        }

        // Debtors are exhausted; a creditor still beyond the tolerance has
        // no payer left.
        if let Some((_, credit)) = creditors
            .iter()
            .find(|(_, credit)| *credit > SETTLEMENT_EPSILON)
        {
            return Err(SettlementError::Unbalanced { residual: *credit });
        }

        Ok(instructions)
    }
}
