//! AMM Math - Pure constant product and LP share arithmetic
//!
//! Integer-only formulas shared by every party that re-executes a pool
//! transition. All divisions floor toward zero; every product is formed in
//! u128 and narrowed back to u64 with a checked conversion, so no input can
//! make these functions panic.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[cfg(kani)]
extern crate kani;

pub mod liquidity;
pub mod reserve;
pub mod swap;

pub use liquidity::{initial_shares, integer_sqrt, proportional_shares, redeem_shares, Redemption};
pub use reserve::min_balance;
pub use swap::{constant_product_output, required_input, SwapQuote};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Error types for AMM math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Invalid reserves (zero)
    InvalidReserves,
    /// Invalid amount (zero or out of range)
    InvalidAmount,
    /// Fee at or above 100%
    InvalidFee,
    /// Requested output would empty the reserve
    InsufficientLiquidity,
    /// Arithmetic overflow
    Overflow,
}

/// Narrow a u128 intermediate back to u64
#[inline]
pub(crate) fn to_u64(value: u128) -> Result<u64, MathError> {
    u64::try_from(value).map_err(|_| MathError::Overflow)
}
