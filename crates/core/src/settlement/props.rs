//! Property-based tests for the settlement engine.
//!
//! - Zero-sum: builder output sums to exactly zero
//! - Order-independence: permuting expenses does not change the sheet
//! - Settlement correctness: applying a plan settles every member
//! - Determinism: same sheet, same plan

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use splittrip_shared::types::{MemberId, Money};

use super::ledger::LedgerBuilder;
use super::planner::{SETTLEMENT_EPSILON, SettlementPlanner};
use super::types::{BalanceSheet, Expense, SettlementInstruction};

const MEMBER_POOL: [&str; 6] = ["ana", "ben", "cleo", "dev", "emma", "filip"];

fn member(index: usize) -> MemberId {
    MemberId::new(MEMBER_POOL[index])
}

/// Strategy for one expense referencing the first `n` pool members.
fn expense_strategy(n: usize) -> impl Strategy<Value = Expense> {
    (
        0..n,
        1i64..50_000,
        prop::collection::btree_set(0..n, 1..=n),
    )
        .prop_map(|(payer, minor, participants)| {
            Expense::new(
                member(payer),
                Money::from_minor(minor),
                participants.into_iter().map(member),
            )
        })
}

/// Strategy for a whole trip: a roster and expenses that reference it.
fn trip_strategy() -> impl Strategy<Value = (BTreeSet<MemberId>, Vec<Expense>)> {
    (2usize..=MEMBER_POOL.len()).prop_flat_map(|n| {
        (
            Just((0..n).map(member).collect::<BTreeSet<_>>()),
            prop::collection::vec(expense_strategy(n), 0..12),
        )
    })
}

/// Applies every instruction to the sheet and returns the resulting nets.
fn apply_plan(
    sheet: &BalanceSheet,
    plan: &[SettlementInstruction],
) -> BTreeMap<MemberId, Money> {
    let mut remaining: BTreeMap<MemberId, Money> = sheet
        .iter()
        .map(|(m, net)| (m.clone(), net))
        .collect();
    for step in plan {
        if let Some(balance) = remaining.get_mut(&step.from) {
            *balance += step.amount;
        }
        if let Some(balance) = remaining.get_mut(&step.to) {
            *balance -= step.amount;
        }
    }
    remaining
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* roster and well-formed expense list, the balances SHALL sum
    /// to exactly zero — integer arithmetic, no tolerance needed.
    #[test]
    fn prop_balances_sum_to_zero((roster, expenses) in trip_strategy()) {
        let sheet = LedgerBuilder::build(&roster, &expenses).unwrap();
        prop_assert_eq!(sheet.total(), Money::ZERO);
        prop_assert_eq!(sheet.len(), roster.len());
    }

    /// *For any* expense list, permuting it SHALL NOT change the sheet.
    #[test]
    fn prop_balances_order_independent((roster, expenses) in trip_strategy()) {
        let forward = LedgerBuilder::build(&roster, &expenses).unwrap();

        let mut reversed = expenses.clone();
        reversed.reverse();
        prop_assert_eq!(&LedgerBuilder::build(&roster, &reversed).unwrap(), &forward);

        let mut rotated = expenses;
        if !rotated.is_empty() {
            rotated.rotate_left(1);
        }
        prop_assert_eq!(&LedgerBuilder::build(&roster, &rotated).unwrap(), &forward);
    }

    /// *For any* builder output, applying the plan SHALL leave every member
    /// within the settlement tolerance.
    #[test]
    fn prop_plan_settles_all_members((roster, expenses) in trip_strategy()) {
        let sheet = LedgerBuilder::build(&roster, &expenses).unwrap();
        // The planner refuses sheets whose counterparties are hidden below
        // the tolerance; those inputs are not plannable, skip them.
        let Ok(plan) = SettlementPlanner::plan(&sheet) else {
            return Ok(());
        };

        for (member, net) in apply_plan(&sheet, &plan) {
            prop_assert!(
                net.abs() <= SETTLEMENT_EPSILON,
                "{} left at {} after settlement",
                member,
                net
            );
        }
    }

    /// *For any* sheet, planning twice SHALL yield identical instructions.
    #[test]
    fn prop_plan_deterministic((roster, expenses) in trip_strategy()) {
        let sheet = LedgerBuilder::build(&roster, &expenses).unwrap();
        let first = SettlementPlanner::plan(&sheet);
        let second = SettlementPlanner::plan(&sheet);
        prop_assert_eq!(first, second);
    }

    /// *For any* plannable sheet, the sweep SHALL emit at most
    /// `|creditors| + |debtors| - 1` instructions.
    #[test]
    fn prop_instruction_count_bound((roster, expenses) in trip_strategy()) {
        let sheet = LedgerBuilder::build(&roster, &expenses).unwrap();
        let Ok(plan) = SettlementPlanner::plan(&sheet) else {
            return Ok(());
        };

        let creditors = sheet.iter().filter(|(_, net)| *net > SETTLEMENT_EPSILON).count();
        let debtors = sheet.iter().filter(|(_, net)| *net < -SETTLEMENT_EPSILON).count();
        prop_assert!(plan.len() <= (creditors + debtors).saturating_sub(1));
    }

    /// *For any* plannable sheet, every instruction SHALL carry a positive
    /// amount between two distinct roster members.
    #[test]
    fn prop_instructions_are_well_formed((roster, expenses) in trip_strategy()) {
        let sheet = LedgerBuilder::build(&roster, &expenses).unwrap();
        let Ok(plan) = SettlementPlanner::plan(&sheet) else {
            return Ok(());
        };

        for step in plan {
            prop_assert!(step.amount.is_positive());
            prop_assert_ne!(&step.from, &step.to);
            prop_assert!(roster.contains(&step.from));
            prop_assert!(roster.contains(&step.to));
        }
    }
}
