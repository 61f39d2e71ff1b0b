//! Reportable, caller-facing errors.
//!
//! Per the error-handling design, a malformed bit block or out-of-range
//! permutation index is a bug in the caller, but it is still reported as a
//! structured error rather than a panic so a driver can surface it instead
//! of aborting the process. Internal invariants that can never be violated
//! by a public-API caller (fixed-size table lengths, etc.) stay as
//! `debug_assert!`/`assert!` at the point they're established.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DesError {
    #[error("hex string {0:?} has odd length")]
    OddHexLength(String),

    #[error("{0:?} is not a valid hex string")]
    InvalidHex(String),

    #[error("permutation table references index {index}, which is out of range for a {width}-bit source block")]
    PermutationIndexOutOfRange { index: u8, width: u8 },

    #[error("round count {0} is out of range; DES round-parameterised operations accept 1..=16")]
    InvalidRoundCount(u8),
}
