//! Shared types for SplitTrip.
//!
//! This crate provides the foundation types used across all other crates:
//! - `Money` in exact integer minor units with decimal boundary conversion
//! - Typed member IDs for type-safe entity references

pub mod types;

pub use types::{MemberId, Money};
