//! LP share math: first-deposit mint, proportional mint, redemption

use crate::{to_u64, MathError};

/// Assets released by burning LP shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    pub ada_out: u64,
    pub token_out: u64,
}

/// Integer square root: floor(sqrt(n))
///
/// Newton's method started from a power of two above the root, so the
/// iterates decrease monotonically until they stop at the floor.
pub fn integer_sqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }

    // sqrt(n) < 2^((log2(n) + 1) / 2)
    let shift = (127 - n.leading_zeros()) / 2 + 1;
    let mut x = 1u128 << shift;

    loop {
        let next_x = (x + n / x) / 2;
        if next_x >= x {
            return x;
        }
        x = next_x;
    }
}

/// Shares minted by the first deposit into an empty pool
///
/// shares = floor(sqrt(ada_amount * token_amount))
pub fn initial_shares(ada_amount: u64, token_amount: u64) -> Result<u64, MathError> {
    if ada_amount == 0 || token_amount == 0 {
        return Err(MathError::InvalidAmount);
    }
    let product = (ada_amount as u128) * (token_amount as u128);
    to_u64(integer_sqrt(product))
}

/// Shares minted by a deposit into a live pool
///
/// shares = min(ada_in * supply / ada_reserve, token_in * supply / token_reserve)
///
/// Each ratio is floored before the minimum is taken, so the depositor is
/// paid for the weaker side of the deposit only; any surplus on the other
/// side stays in the pool.
pub fn proportional_shares(
    ada_in: u64,
    token_in: u64,
    ada_reserve: u64,
    token_reserve: u64,
    supply: u64,
) -> Result<u64, MathError> {
    if ada_reserve == 0 || token_reserve == 0 || supply == 0 {
        return Err(MathError::InvalidReserves);
    }
    if ada_in == 0 || token_in == 0 {
        return Err(MathError::InvalidAmount);
    }

    let by_ada = (ada_in as u128) * (supply as u128) / (ada_reserve as u128);
    let by_token = (token_in as u128) * (supply as u128) / (token_reserve as u128);

    to_u64(by_ada.min(by_token))
}

/// Assets released by burning `shares` out of `supply`
///
/// ada_out = floor(ada_reserve * shares / supply), likewise for the token.
pub fn redeem_shares(
    shares: u64,
    ada_reserve: u64,
    token_reserve: u64,
    supply: u64,
) -> Result<Redemption, MathError> {
    if shares == 0 || shares > supply {
        return Err(MathError::InvalidAmount);
    }

    let ada_out = (ada_reserve as u128) * (shares as u128) / (supply as u128);
    let token_out = (token_reserve as u128) * (shares as u128) / (supply as u128);

    // shares <= supply, so both results are bounded by their reserves
    Ok(Redemption {
        ada_out: ada_out as u64,
        token_out: token_out as u64,
    })
}
