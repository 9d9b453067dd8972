//! Constant product swap math (x·y=k) with the fee retained in the pool

use crate::{to_u64, MathError, BPS_SCALE};

/// Result of pricing a trade against a pair of reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Amount paid out of the output reserve
    pub amount_out: u64,

    /// Input remaining after the fee haircut
    pub effective_in: u64,

    /// amount_in - effective_in
    pub fee_amount: u64,

    /// Input reserve after the trade (credited with the full amount_in)
    pub new_reserve_in: u64,

    /// Output reserve after the trade
    pub new_reserve_out: u64,
}

/// Price an exact-input trade
///
/// - effective_in = amount_in * (BPS_SCALE - fee_bps) / BPS_SCALE
/// - amount_out = reserve_out * effective_in / (reserve_in + effective_in)
/// - reserve_in' = reserve_in + amount_in
/// - reserve_out' = reserve_out - amount_out
///
/// Because the whole `amount_in` is credited while only `effective_in` is
/// priced, `reserve_in' * reserve_out' >= reserve_in * reserve_out`.
///
/// # Arguments
/// * `reserve_in` - Reserve of the asset being sold to the pool
/// * `reserve_out` - Reserve of the asset being bought from the pool
/// * `amount_in` - Gross input amount
/// * `fee_bps` - Total fee in basis points
///
/// # Returns
/// * `SwapQuote` with the output and the new reserves
/// * `MathError` for zero reserves, zero input, a fee of 100% or more,
///   or a reserve that would leave the u64 domain
pub fn constant_product_output(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    fee_bps: u64,
) -> Result<SwapQuote, MathError> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(MathError::InvalidReserves);
    }
    if amount_in == 0 {
        return Err(MathError::InvalidAmount);
    }
    if fee_bps >= BPS_SCALE {
        return Err(MathError::InvalidFee);
    }

    let x0 = reserve_in as u128;
    let y0 = reserve_out as u128;
    let dx = amount_in as u128;

    let dx_net = dx * (BPS_SCALE - fee_bps) as u128 / BPS_SCALE as u128;
    // reserve_out < 2^64 and dx_net < 2^64, so the product fits in u128
    let dy = y0 * dx_net / (x0 + dx_net);

    let new_reserve_in = reserve_in.checked_add(amount_in).ok_or(MathError::Overflow)?;
    let amount_out = to_u64(dy)?;

    Ok(SwapQuote {
        amount_out,
        effective_in: to_u64(dx_net)?,
        fee_amount: to_u64(dx - dx_net)?,
        new_reserve_in,
        new_reserve_out: reserve_out - amount_out,
    })
}

/// Smallest gross input that is guaranteed to buy at least `amount_out`
///
/// Inverts both floors of [`constant_product_output`] with ceilings:
/// - effective_in = ceil(reserve_in * amount_out / (reserve_out - amount_out))
/// - amount_in = ceil(effective_in * BPS_SCALE / (BPS_SCALE - fee_bps))
pub fn required_input(
    reserve_in: u64,
    reserve_out: u64,
    amount_out: u64,
    fee_bps: u64,
) -> Result<u64, MathError> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(MathError::InvalidReserves);
    }
    if amount_out == 0 {
        return Err(MathError::InvalidAmount);
    }
    if amount_out >= reserve_out {
        return Err(MathError::InsufficientLiquidity);
    }
    if fee_bps >= BPS_SCALE {
        return Err(MathError::InvalidFee);
    }

    let x0 = reserve_in as u128;
    let dy = amount_out as u128;
    let remaining = (reserve_out - amount_out) as u128;

    let dx_net = (x0 * dy).div_ceil(remaining);
    let fee_divisor = (BPS_SCALE - fee_bps) as u128;
    let dx = dx_net
        .checked_mul(BPS_SCALE as u128)
        .ok_or(MathError::Overflow)?
        .div_ceil(fee_divisor);

    to_u64(dx)
}


// ============================================================================
// Kani Proof Harnesses
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// The product of the reserves never decreases across a swap
    #[kani::proof]
    fn proof_k_non_decreasing() {
        let x0: u64 = kani::any();
        let y0: u64 = kani::any();
        let dx: u64 = kani::any();
        let fee_bps: u64 = kani::any();

        kani::assume(x0 > 0 && x0 < 1 << 40);
        kani::assume(y0 > 0 && y0 < 1 << 40);
        kani::assume(dx > 0 && dx < 1 << 40);
        kani::assume(fee_bps < 1_000);

        if let Ok(quote) = constant_product_output(x0, y0, dx, fee_bps) {
            let k0 = (x0 as u128) * (y0 as u128);
            let k1 = (quote.new_reserve_in as u128) * (quote.new_reserve_out as u128);
            assert!(k1 >= k0);
            assert!(quote.amount_out < y0);
        }
    }

    /// Same inputs always yield the same quote
    #[kani::proof]
    fn proof_deterministic() {
        let x0: u64 = kani::any();
        let y0: u64 = kani::any();
        let dx: u64 = kani::any();
        kani::assume(x0 < 1 << 32 && y0 < 1 << 32 && dx < 1 << 32);

        assert_eq!(
            constant_product_output(x0, y0, dx, 30),
            constant_product_output(x0, y0, dx, 30)
        );
    }
}
