//! Constant product swaps against a pool record

use crate::action::SwapDirection;
use crate::error::{Result, TransitionError};
use crate::state::PoolState;
use serde::{Deserialize, Serialize};

/// Priced swap with the reserves it leaves behind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub amount_out: u64,

    /// Input withheld from pricing (stays in the input reserve)
    pub fee_amount: u64,

    /// Part of `fee_amount` attributable to the protocol cut
    pub protocol_fee_amount: u64,

    pub new_reserve_in: u64,
    pub new_reserve_out: u64,
}

impl SwapResult {
    /// Post-state with the new reserves written back by direction
    pub fn apply(&self, pool: &PoolState) -> PoolState {
        let mut next = pool.clone();
        match self.direction {
            SwapDirection::AdaToToken => {
                next.ada_reserve = self.new_reserve_in;
                next.token_reserve = self.new_reserve_out;
            }
            SwapDirection::TokenToAda => {
                next.token_reserve = self.new_reserve_in;
                next.ada_reserve = self.new_reserve_out;
            }
        }
        next
    }
}

/// (reserve_in, reserve_out) for a direction
fn oriented_reserves(pool: &PoolState, direction: SwapDirection) -> (u64, u64) {
    match direction {
        SwapDirection::AdaToToken => (pool.ada_reserve, pool.token_reserve),
        SwapDirection::TokenToAda => (pool.token_reserve, pool.ada_reserve),
    }
}

/// Price an exact-input swap at `fee_bps`
///
/// The full `amount_in` is credited to the input reserve; only the
/// post-fee amount is priced against the curve.
///
/// # Errors
/// * `InvalidAmount` - zero input, or an output that rounds to zero
/// * `Overflow` - input reserve would exceed u64
pub fn swap(
    pool: &PoolState,
    amount_in: u64,
    direction: SwapDirection,
    fee_bps: u64,
) -> Result<SwapResult> {
    if amount_in == 0 {
        return Err(TransitionError::InvalidAmount);
    }
    let (reserve_in, reserve_out) = oriented_reserves(pool, direction);

    let quote = amm_math::constant_product_output(reserve_in, reserve_out, amount_in, fee_bps)?;
    if quote.amount_out == 0 {
        return Err(TransitionError::InvalidAmount);
    }

    let protocol_bps = (pool.protocol_fee_bps as u64).min(fee_bps);
    let protocol_fee_amount = if fee_bps == 0 {
        0
    } else {
        // fee_amount < 2^64 and protocol_bps <= fee_bps, so this is <= fee_amount
        ((quote.fee_amount as u128) * (protocol_bps as u128) / (fee_bps as u128)) as u64
    };

    Ok(SwapResult {
        direction,
        amount_in,
        amount_out: quote.amount_out,
        fee_amount: quote.fee_amount,
        protocol_fee_amount,
        new_reserve_in: quote.new_reserve_in,
        new_reserve_out: quote.new_reserve_out,
    })
}

/// Swap at the pool's own fee with slippage protection
pub fn swap_exact_in(
    pool: &PoolState,
    amount_in: u64,
    direction: SwapDirection,
    min_out: u64,
) -> Result<SwapResult> {
    let result = swap(pool, amount_in, direction, pool.total_fee_bps())?;
    if result.amount_out < min_out {
        return Err(TransitionError::SlippageExceeded {
            minimum: min_out,
            actual: result.amount_out,
        });
    }
    Ok(result)
}

/// Input sufficient to buy at least `amount_out` at the pool's own fee
pub fn required_input(pool: &PoolState, amount_out: u64, direction: SwapDirection) -> Result<u64> {
    let (reserve_in, reserve_out) = oriented_reserves(pool, direction);
    Ok(amm_math::required_input(
        reserve_in,
        reserve_out,
        amount_out,
        pool.total_fee_bps(),
    )?)
}
