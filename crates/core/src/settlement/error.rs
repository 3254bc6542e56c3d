//! Settlement engine error types.
//!
//! Both stages fail fast and return a typed error; the computation is pure
//! and deterministic, so nothing is retried and nothing is logged here. The
//! owning service layer translates these into user-facing responses using
//! the code and status accessors.

use splittrip_shared::types::{MemberId, Money};
use thiserror::Error;

/// Errors produced by the balance and settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// An expense is malformed: non-positive amount or no participants.
    /// The whole computation is rejected; no balance is partially applied.
    #[error("Invalid expense: {reason}")]
    InvalidExpense {
        /// Why the expense was rejected.
        reason: String,
    },

    /// An expense references a payer or participant missing from the trip
    /// roster. Checked before any balance is mutated.
    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    /// The planner was handed balances that do not settle to zero. This is a
    /// caller bug (the ledger builder was bypassed), not a user-facing
    /// condition.
    #[error("Balances do not sum to zero: {residual} unaccounted")]
    Unbalanced {
        /// The amount left over that no counterparty can absorb.
        residual: Money,
    },
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidExpense { .. } => "INVALID_EXPENSE",
            Self::UnknownMember(_) => "UNKNOWN_MEMBER",
            Self::Unbalanced { .. } => "UNBALANCED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - rejected input
            Self::InvalidExpense { .. } | Self::UnknownMember(_) => 400,
            // 500 Internal Server Error - consistency failure upstream
            Self::Unbalanced { .. } => 500,
        }
    }

    /// Returns true if this error indicates a bug in the caller rather than
    /// bad user input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Unbalanced { .. })
    }
}
