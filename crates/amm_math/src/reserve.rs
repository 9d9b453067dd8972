//! Minimum base-asset balance of a stateful container

use crate::{to_u64, MathError, BPS_SCALE};

/// Minimum balance a container must hold to stay spendable
///
/// raw = base + asset_count * per_asset_cost + size_bytes * per_byte_cost
/// min = raw + raw * buffer_bps / BPS_SCALE
pub fn min_balance(
    base: u64,
    per_asset_cost: u64,
    per_byte_cost: u64,
    buffer_bps: u16,
    asset_count: u64,
    size_bytes: u64,
) -> Result<u64, MathError> {
    let raw = (base as u128)
        .checked_add((asset_count as u128) * (per_asset_cost as u128))
        .and_then(|acc| acc.checked_add((size_bytes as u128) * (per_byte_cost as u128)))
        .ok_or(MathError::Overflow)?;

    let buffer = raw
        .checked_mul(buffer_bps as u128)
        .ok_or(MathError::Overflow)?
        / BPS_SCALE as u128;

    to_u64(raw.checked_add(buffer).ok_or(MathError::Overflow)?)
}
