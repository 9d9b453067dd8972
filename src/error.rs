//! Error types for pool transitions

use crate::action::ActionKind;
use crate::state::PoolPhase;
use amm_math::MathError;
use thiserror::Error;

/// Which post-condition of a transition failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    /// Swap reduced reserve_in * reserve_out
    #[error("constant product decreased from {old_k} to {new_k}")]
    ConstantProductDecreased { old_k: u128, new_k: u128 },

    /// lp_total_supply moved by something other than the minted/burned amount
    #[error("LP supply changed by {actual}, expected {expected}")]
    LpSupplyMismatch { expected: i128, actual: i128 },

    /// Live pool with an empty reserve, or empty pool with leftover reserves
    #[error("reserves ({ada}, {token}) inconsistent with LP supply {lp_supply}")]
    ReservesInconsistent { ada: u64, token: u64, lp_supply: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Zero, out of range, or buys nothing
    #[error("invalid amount")]
    InvalidAmount,

    /// Output below the caller's minimum
    #[error("slippage exceeded: got {actual}, minimum {minimum}")]
    SlippageExceeded { minimum: u64, actual: u64 },

    #[error("deadline {deadline} passed at time {current_time}")]
    DeadlineExceeded { deadline: u64, current_time: u64 },

    /// Only Unpause is accepted while paused
    #[error("pool is paused")]
    PoolPaused,

    /// Identity token count is not exactly 1
    #[error("identity token count is {count}, expected 1")]
    IdentityMismatch { count: u64 },

    /// A configuration field changed outside of pool creation
    #[error("immutable field `{field}` changed")]
    ConfigImmutableViolation { field: &'static str },

    #[error("invariant violated: {0}")]
    InvariantViolation(Violation),

    /// Base-asset reserve below the container minimum balance
    #[error("pool underfunded: {available} available, {required} required")]
    PoolUnderfunded { required: u64, available: u64 },

    /// Admin signer set missing
    #[error("unauthorized")]
    Unauthorized,

    /// Action not legal from the pool's current phase
    #[error("{action} not allowed on {phase} pool")]
    InvalidTransition { phase: PoolPhase, action: ActionKind },

    #[error("fee {total_bps} bps exceeds maximum {max_bps} bps")]
    FeeTooHigh { total_bps: u64, max_bps: u64 },

    /// Arithmetic left the u64 domain
    #[error("arithmetic overflow")]
    Overflow,

    /// Pre-state violates an invariant no valid transition can produce
    #[error("internal invariant broken: {0}")]
    InternalInvariantBroken(&'static str),
}

impl TransitionError {
    /// Bug signal rather than a business-rule rejection
    pub fn is_fatal(&self) -> bool {
        matches!(self, TransitionError::InternalInvariantBroken(_))
    }
}

impl From<MathError> for TransitionError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidAmount | MathError::InsufficientLiquidity => {
                TransitionError::InvalidAmount
            }
            MathError::Overflow => TransitionError::Overflow,
            MathError::InvalidReserves => {
                TransitionError::InternalInvariantBroken("engine reached with an empty reserve")
            }
            MathError::InvalidFee => {
                TransitionError::InternalInvariantBroken("fee at or above 100%")
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, TransitionError>;
