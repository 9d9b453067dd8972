//! Cross-cutting checks around every transition
//!
//! Preconditions gate what may be attempted from a given pre-state;
//! postconditions verify the engine-derived post-state before it is
//! returned. The first failure short-circuits.

use crate::action::{Action, ActionKind};
use crate::config::PoolPolicy;
use crate::context::TransitionContext;
use crate::error::{Result, TransitionError, Violation};
use crate::state::{PoolPhase, PoolState, MAX_ASSET_NAME_LEN};

/// Movement of lp_total_supply reported by the liquidity engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LpDelta {
    Unchanged,
    Minted(u64),
    Burned(u64),
}

impl LpDelta {
    pub fn signed(&self) -> i128 {
        match *self {
            LpDelta::Unchanged => 0,
            LpDelta::Minted(amount) => amount as i128,
            LpDelta::Burned(amount) => -(amount as i128),
        }
    }
}

// ============================================================================
// Preconditions
// ============================================================================

/// Sanity of the decoded pre-state
///
/// A record that fails here cannot have been produced by a valid
/// transition, so every failure except the identity count is fatal.
pub fn check_pre_state(pre: &PoolState, policy: &PoolPolicy) -> Result<()> {
    if pre.identity_token_count != 1 {
        return Err(TransitionError::IdentityMismatch {
            count: pre.identity_token_count,
        });
    }
    if pre.token_id.name.len() > MAX_ASSET_NAME_LEN || pre.lp_token_id.name.len() > MAX_ASSET_NAME_LEN {
        return Err(TransitionError::InternalInvariantBroken("asset name longer than 32 bytes"));
    }
    if pre.total_fee_bps() > policy.fee_ceiling() {
        return Err(TransitionError::InternalInvariantBroken("fee above policy maximum"));
    }

    let empty_reserve = pre.ada_reserve == 0 || pre.token_reserve == 0;
    match pre.phase() {
        PoolPhase::Uninitialized if pre.ada_reserve != 0 || pre.token_reserve != 0 => Err(
            TransitionError::InternalInvariantBroken("reserves present without LP supply"),
        ),
        PoolPhase::Active | PoolPhase::Paused if empty_reserve => Err(
            TransitionError::InternalInvariantBroken("live pool with an empty reserve"),
        ),
        _ => Ok(()),
    }
}

/// Whether `action` is a legal edge out of `phase`
///
/// Uninitialized --CreatePool--> Active
/// Active --{Swap, AddLiquidity, RemoveLiquidity}--> Active
/// Active --Pause--> Paused
/// Paused --Unpause--> Active
pub fn is_allowed(phase: PoolPhase, action: ActionKind) -> bool {
    match phase {
        PoolPhase::Uninitialized => action == ActionKind::CreatePool,
        PoolPhase::Active => action.is_trading() || action == ActionKind::Pause,
        PoolPhase::Paused => action == ActionKind::Unpause,
    }
}

/// Pause gate, lifecycle legality and admin authorization
pub fn check_gate(pre: &PoolState, action: &Action, ctx: &TransitionContext) -> Result<()> {
    let phase = pre.phase();
    let kind = action.kind();

    if phase == PoolPhase::Paused && kind != ActionKind::Unpause {
        return Err(TransitionError::PoolPaused);
    }
    if !is_allowed(phase, kind) {
        return Err(TransitionError::InvalidTransition { phase, action: kind });
    }
    if action.requires_authorization() && !ctx.authorized {
        return Err(TransitionError::Unauthorized);
    }
    Ok(())
}

// ============================================================================
// Postconditions
// ============================================================================

/// Verify an engine-derived post-state against its pre-state
///
/// In order: (a) identity token count, (b) immutable configuration,
/// (c) constant product for swaps, (d) reserve/supply consistency,
/// (e) LP supply delta.
pub fn check_post_state(
    pre: &PoolState,
    post: &PoolState,
    action: &Action,
    lp_delta: LpDelta,
) -> Result<()> {
    // (a)
    for count in [pre.identity_token_count, post.identity_token_count] {
        if count != 1 {
            return Err(TransitionError::IdentityMismatch { count });
        }
    }

    // (b) creation is the only action that sets the trading fee
    check_config_unchanged(pre, post, action.kind() == ActionKind::CreatePool)?;

    // (c)
    if let Action::Swap { .. } = action {
        let (old_k, new_k) = (pre.k(), post.k());
        if new_k < old_k {
            return Err(TransitionError::InvariantViolation(
                Violation::ConstantProductDecreased { old_k, new_k },
            ));
        }
    }

    // (d)
    let live = post.lp_total_supply > 0;
    let consistent = if live {
        post.ada_reserve > 0 && post.token_reserve > 0
    } else {
        post.ada_reserve == 0 && post.token_reserve == 0
    };
    if !consistent {
        return Err(TransitionError::InvariantViolation(
            Violation::ReservesInconsistent {
                ada: post.ada_reserve,
                token: post.token_reserve,
                lp_supply: post.lp_total_supply,
            },
        ));
    }

    // (e)
    let expected = lp_delta.signed();
    let actual = post.lp_total_supply as i128 - pre.lp_total_supply as i128;
    if actual != expected {
        return Err(TransitionError::InvariantViolation(Violation::LpSupplyMismatch {
            expected,
            actual,
        }));
    }

    Ok(())
}

fn check_config_unchanged(pre: &PoolState, post: &PoolState, fee_settable: bool) -> Result<()> {
    let field = if !fee_settable && pre.fee_bps != post.fee_bps {
        "fee_bps"
    } else if pre.protocol_fee_bps != post.protocol_fee_bps {
        "protocol_fee_bps"
    } else if pre.token_id != post.token_id {
        "token_id"
    } else if pre.lp_token_id != post.lp_token_id {
        "lp_token_id"
    } else if pre.admin != post.admin {
        "admin"
    } else {
        return Ok(());
    };
    Err(TransitionError::ConfigImmutableViolation { field })
}
