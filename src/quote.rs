//! Read-only previews for off-chain quoting
//!
//! These reuse the engines so a preview can never disagree with what the
//! validator would accept for the same pre-state.

use crate::action::{ActionKind, SwapDirection};
use crate::engine::{self, Withdrawal};
use crate::error::{Result, TransitionError};
use crate::state::{PoolPhase, PoolState};
use amm_math::BPS_SCALE;
use serde::{Deserialize, Serialize};

/// Expected result of a swap, before it is submitted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPreview {
    pub amount_out: u64,
    pub fee_amount: u64,
    pub protocol_fee_amount: u64,

    /// Shortfall of the execution price against the spot price, in bps
    /// (fee included)
    pub price_impact_bps: u64,
}

fn require_active(pool: &PoolState, action: ActionKind) -> Result<()> {
    match pool.phase() {
        PoolPhase::Active => Ok(()),
        PoolPhase::Paused => Err(TransitionError::PoolPaused),
        phase => Err(TransitionError::InvalidTransition { phase, action }),
    }
}

/// Preview an exact-input swap at the pool's fee
pub fn quote_swap(pool: &PoolState, amount_in: u64, direction: SwapDirection) -> Result<SwapPreview> {
    require_active(pool, ActionKind::Swap)?;
    let result = engine::swap(pool, amount_in, direction, pool.total_fee_bps())?;

    let (reserve_in, reserve_out) = match direction {
        SwapDirection::AdaToToken => (pool.ada_reserve, pool.token_reserve),
        SwapDirection::TokenToAda => (pool.token_reserve, pool.ada_reserve),
    };

    // execution / spot = (amount_out / amount_in) / (reserve_out / reserve_in)
    let realized = (result.amount_out as u128) * (reserve_in as u128);
    let at_spot = (amount_in as u128) * (reserve_out as u128);
    let scale = BPS_SCALE as u128;
    let ratio_bps = match realized.checked_mul(scale) {
        Some(scaled) => scaled / at_spot,
        None => realized / (at_spot / scale).max(1),
    };

    Ok(SwapPreview {
        amount_out: result.amount_out,
        fee_amount: result.fee_amount,
        protocol_fee_amount: result.protocol_fee_amount,
        price_impact_bps: (scale - ratio_bps.min(scale)) as u64,
    })
}

/// Preview a withdrawal of `lp_amount` LP tokens
pub fn quote_remove_liquidity(pool: &PoolState, lp_amount: u64) -> Result<Withdrawal> {
    require_active(pool, ActionKind::RemoveLiquidity)?;
    engine::remove_liquidity(pool, lp_amount, 0, 0)
}

/// `min_out` to submit for an expected output and a slippage tolerance
///
/// Tolerances above 100% are clamped, giving a minimum of zero.
pub fn min_out_with_tolerance(expected: u64, tolerance_bps: u64) -> u64 {
    let keep = BPS_SCALE - tolerance_bps.min(BPS_SCALE);
    ((expected as u128) * (keep as u128) / BPS_SCALE as u128) as u64
}
