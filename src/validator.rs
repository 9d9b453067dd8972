//! Single entry point for pool transitions
//!
//! The validator never compares against a caller-proposed post-state: it
//! recomputes the canonical one from the pre-state, the action and the
//! context, so any two independent implementations agree bit for bit.

use crate::action::Action;
use crate::config::PoolPolicy;
use crate::context::TransitionContext;
use crate::engine::{self, Deposit, SwapResult, Withdrawal};
use crate::error::{Result, TransitionError};
use crate::invariants::{self, LpDelta};
use crate::state::{PoolState, PoolStatus};
use serde::{Deserialize, Serialize};

/// Side outputs of an accepted transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Created(Deposit),
    Swapped(SwapResult),
    LiquidityAdded(Deposit),
    LiquidityRemoved(Withdrawal),
    Paused,
    Unpaused,
}

/// Canonical post-state plus what the transaction must pay out or mint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostState {
    pub pool: PoolState,
    pub outcome: Outcome,
}

/// Transition validator bound to a fee policy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionValidator {
    policy: PoolPolicy,
}

impl TransitionValidator {
    pub fn new(policy: PoolPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PoolPolicy {
        &self.policy
    }

    /// Derive the canonical post-state of `action` applied to `pre`
    ///
    /// # Errors
    /// Any [`TransitionError`]; nothing is returned for a rejected action.
    /// `InternalInvariantBroken` means the pre-state itself is corrupt and
    /// is logged at error level.
    pub fn validate_transition(
        &self,
        pre: &PoolState,
        action: &Action,
        ctx: &TransitionContext,
    ) -> Result<PostState> {
        let result = self.derive(pre, action, ctx);

        match &result {
            Ok(post) => log::debug!("{} accepted: {:?}", action.kind(), post.outcome),
            Err(err) if err.is_fatal() => {
                log::error!("{} hit a corrupt pre-state: {} ({:?})", action.kind(), err, pre)
            }
            Err(err) => log::debug!("{} rejected: {}", action.kind(), err),
        }

        result
    }

    fn derive(&self, pre: &PoolState, action: &Action, ctx: &TransitionContext) -> Result<PostState> {
        invariants::check_pre_state(pre, &self.policy)?;
        invariants::check_gate(pre, action, ctx)?;

        if let Some(deadline) = action.deadline() {
            if ctx.current_time > deadline {
                return Err(TransitionError::DeadlineExceeded {
                    deadline,
                    current_time: ctx.current_time,
                });
            }
        }

        let (pool, outcome, lp_delta) = match *action {
            Action::CreatePool {
                initial_ada,
                initial_token,
                fee_bps,
            } => {
                let total_bps = fee_bps as u64 + pre.protocol_fee_bps as u64;
                let max_bps = self.policy.fee_ceiling();
                if total_bps > max_bps {
                    return Err(TransitionError::FeeTooHigh { total_bps, max_bps });
                }
                let (pool, deposit) = engine::create_pool(pre, initial_ada, initial_token, fee_bps)?;
                (pool, Outcome::Created(deposit), LpDelta::Minted(deposit.lp_minted))
            }
            Action::Swap {
                amount_in,
                direction,
                min_out,
                ..
            } => {
                let result = engine::swap_exact_in(pre, amount_in, direction, min_out)?;
                (result.apply(pre), Outcome::Swapped(result), LpDelta::Unchanged)
            }
            Action::AddLiquidity {
                ada_amount,
                token_amount,
                min_lp_out,
                ..
            } => {
                let deposit = engine::add_liquidity(pre, ada_amount, token_amount, min_lp_out)?;
                (
                    deposit.apply(pre),
                    Outcome::LiquidityAdded(deposit),
                    LpDelta::Minted(deposit.lp_minted),
                )
            }
            Action::RemoveLiquidity {
                lp_amount,
                min_ada_out,
                min_token_out,
                ..
            } => {
                let withdrawal = engine::remove_liquidity(pre, lp_amount, min_ada_out, min_token_out)?;
                (
                    withdrawal.apply(pre),
                    Outcome::LiquidityRemoved(withdrawal),
                    LpDelta::Burned(withdrawal.lp_burned),
                )
            }
            Action::Pause => (with_status(pre, PoolStatus::Paused), Outcome::Paused, LpDelta::Unchanged),
            Action::Unpause => (with_status(pre, PoolStatus::Active), Outcome::Unpaused, LpDelta::Unchanged),
        };

        invariants::check_post_state(pre, &pool, action, lp_delta)?;
        engine::check_min_reserve(&pool, &ctx.min_reserve_profile)?;

        Ok(PostState { pool, outcome })
    }
}

fn with_status(pool: &PoolState, status: PoolStatus) -> PoolState {
    let mut next = pool.clone();
    next.status = status;
    next
}

/// Validate with the default policy
pub fn validate_transition(
    pre: &PoolState,
    action: &Action,
    ctx: &TransitionContext,
) -> Result<PostState> {
    TransitionValidator::default().validate_transition(pre, action, ctx)
}
