//! Container minimum balance
//!
//! A container whose base-asset balance drops below the ledger minimum can
//! never be spent again, which would freeze the pool for good. The floor
//! is therefore checked after every mutating action, not only withdrawals.

use crate::context::MinReserveProfile;
use crate::error::{Result, TransitionError};
use crate::state::PoolState;

/// min = raw + raw * buffer_bps / 10_000, where
/// raw = base + asset_count * per_asset_cost + state_size_bytes * per_byte_cost
pub fn calculate_min_reserve(
    asset_count: u64,
    state_size_bytes: u64,
    profile: &MinReserveProfile,
) -> Result<u64> {
    Ok(amm_math::min_balance(
        profile.base,
        profile.per_asset_cost,
        profile.per_byte_cost,
        profile.buffer_bps,
        asset_count,
        state_size_bytes,
    )?)
}

/// Minimum balance for the container holding `pool`
pub fn min_reserve_for(pool: &PoolState, profile: &MinReserveProfile) -> Result<u64> {
    calculate_min_reserve(pool.asset_count(), pool.state_size_bytes(), profile)
}

/// Reject a post-state whose base reserve is below the floor
///
/// A pool with no LP supply left is exempt: fully draining it is the one
/// way reserves may reach zero.
pub fn check_min_reserve(pool: &PoolState, profile: &MinReserveProfile) -> Result<()> {
    if pool.lp_total_supply == 0 {
        return Ok(());
    }

    let required = min_reserve_for(pool, profile)?;
    if pool.ada_reserve < required {
        return Err(TransitionError::PoolUnderfunded {
            required,
            available: pool.ada_reserve,
        });
    }
    Ok(())
}
