//! Liquidity provisioning and withdrawal

use crate::action::ActionKind;
use crate::error::{Result, TransitionError};
use crate::state::{PoolState, PoolStatus};
use serde::{Deserialize, Serialize};

/// LP tokens minted for a deposit, with the resulting totals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub lp_minted: u64,
    pub new_ada_reserve: u64,
    pub new_token_reserve: u64,
    pub new_lp_supply: u64,
}

impl Deposit {
    pub fn apply(&self, pool: &PoolState) -> PoolState {
        let mut next = pool.clone();
        next.ada_reserve = self.new_ada_reserve;
        next.token_reserve = self.new_token_reserve;
        next.lp_total_supply = self.new_lp_supply;
        next
    }
}

/// Assets released for burned LP tokens, with the resulting totals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub lp_burned: u64,
    pub ada_out: u64,
    pub token_out: u64,
    pub new_ada_reserve: u64,
    pub new_token_reserve: u64,
    pub new_lp_supply: u64,
}

impl Withdrawal {
    pub fn apply(&self, pool: &PoolState) -> PoolState {
        let mut next = pool.clone();
        next.ada_reserve = self.new_ada_reserve;
        next.token_reserve = self.new_token_reserve;
        next.lp_total_supply = self.new_lp_supply;
        next
    }

    /// Whether the burn retired the whole supply
    pub fn drains_pool(&self) -> bool {
        self.new_lp_supply == 0
    }
}

/// Deposit both assets and mint LP tokens
///
/// An empty pool mints floor(sqrt(ada_amount * token_amount)); a live pool
/// mints the smaller of the two proportional ratios, so a lopsided deposit
/// is paid only for its weaker side.
///
/// # Errors
/// * `InvalidAmount` - either amount is zero, or nothing would be minted
/// * `SlippageExceeded` - fewer than `min_lp_out` tokens minted
/// * `Overflow` - a reserve or the supply would exceed u64
pub fn add_liquidity(
    pool: &PoolState,
    ada_amount: u64,
    token_amount: u64,
    min_lp_out: u64,
) -> Result<Deposit> {
    if ada_amount == 0 || token_amount == 0 {
        return Err(TransitionError::InvalidAmount);
    }

    let lp_minted = if pool.lp_total_supply == 0 {
        amm_math::initial_shares(ada_amount, token_amount)?
    } else {
        amm_math::proportional_shares(
            ada_amount,
            token_amount,
            pool.ada_reserve,
            pool.token_reserve,
            pool.lp_total_supply,
        )?
    };

    if lp_minted == 0 {
        return Err(TransitionError::InvalidAmount);
    }
    if lp_minted < min_lp_out {
        return Err(TransitionError::SlippageExceeded {
            minimum: min_lp_out,
            actual: lp_minted,
        });
    }

    Ok(Deposit {
        lp_minted,
        new_ada_reserve: pool
            .ada_reserve
            .checked_add(ada_amount)
            .ok_or(TransitionError::Overflow)?,
        new_token_reserve: pool
            .token_reserve
            .checked_add(token_amount)
            .ok_or(TransitionError::Overflow)?,
        new_lp_supply: pool
            .lp_total_supply
            .checked_add(lp_minted)
            .ok_or(TransitionError::Overflow)?,
    })
}

/// Seed an empty pool: first deposit plus the trading fee it will charge
///
/// Returns the activated post-state together with the deposit.
pub fn create_pool(
    pool: &PoolState,
    initial_ada: u64,
    initial_token: u64,
    fee_bps: u16,
) -> Result<(PoolState, Deposit)> {
    if pool.lp_total_supply != 0 {
        return Err(TransitionError::InvalidTransition {
            phase: pool.phase(),
            action: ActionKind::CreatePool,
        });
    }

    let deposit = add_liquidity(pool, initial_ada, initial_token, 0)?;
    let mut next = deposit.apply(pool);
    next.fee_bps = fee_bps;
    next.status = PoolStatus::Active;

    Ok((next, deposit))
}

/// Burn LP tokens for a pro-rata share of both reserves
///
/// # Errors
/// * `InvalidAmount` - `lp_amount` is zero, exceeds the supply, or redeems nothing
/// * `SlippageExceeded` - either output is below its minimum
pub fn remove_liquidity(
    pool: &PoolState,
    lp_amount: u64,
    min_ada_out: u64,
    min_token_out: u64,
) -> Result<Withdrawal> {
    let redemption = amm_math::redeem_shares(
        lp_amount,
        pool.ada_reserve,
        pool.token_reserve,
        pool.lp_total_supply,
    )?;

    if redemption.ada_out == 0 && redemption.token_out == 0 {
        return Err(TransitionError::InvalidAmount);
    }
    if redemption.ada_out < min_ada_out {
        return Err(TransitionError::SlippageExceeded {
            minimum: min_ada_out,
            actual: redemption.ada_out,
        });
    }
    if redemption.token_out < min_token_out {
        return Err(TransitionError::SlippageExceeded {
            minimum: min_token_out,
            actual: redemption.token_out,
        });
    }

    Ok(Withdrawal {
        lp_burned: lp_amount,
        ada_out: redemption.ada_out,
        token_out: redemption.token_out,
        new_ada_reserve: pool.ada_reserve - redemption.ada_out,
        new_token_reserve: pool.token_reserve - redemption.token_out,
        new_lp_supply: pool.lp_total_supply - lp_amount,
    })
}
