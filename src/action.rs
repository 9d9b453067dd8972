//! Requested pool transitions

use serde::{Deserialize, Serialize};

/// Which reserve receives the input of a swap
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell base asset, buy the pooled token
    AdaToToken,
    /// Sell the pooled token, buy base asset
    TokenToAda,
}

/// One transition request against a pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Swap {
        amount_in: u64,
        direction: SwapDirection,
        min_out: u64,
        deadline: u64,
    },
    AddLiquidity {
        ada_amount: u64,
        token_amount: u64,
        min_lp_out: u64,
        deadline: u64,
    },
    RemoveLiquidity {
        lp_amount: u64,
        min_ada_out: u64,
        min_token_out: u64,
        deadline: u64,
    },
    CreatePool {
        initial_ada: u64,
        initial_token: u64,
        fee_bps: u16,
    },
    Pause,
    Unpause,
}

/// Payload-free tag of an [`Action`], used in errors and logs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
    CreatePool,
    Pause,
    Unpause,
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ActionKind::Swap => "Swap",
            ActionKind::AddLiquidity => "AddLiquidity",
            ActionKind::RemoveLiquidity => "RemoveLiquidity",
            ActionKind::CreatePool => "CreatePool",
            ActionKind::Pause => "Pause",
            ActionKind::Unpause => "Unpause",
        };
        f.write_str(name)
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Swap { .. } => ActionKind::Swap,
            Action::AddLiquidity { .. } => ActionKind::AddLiquidity,
            Action::RemoveLiquidity { .. } => ActionKind::RemoveLiquidity,
            Action::CreatePool { .. } => ActionKind::CreatePool,
            Action::Pause => ActionKind::Pause,
            Action::Unpause => ActionKind::Unpause,
        }
    }

    /// Deadline carried by trading and liquidity actions
    pub fn deadline(&self) -> Option<u64> {
        match *self {
            Action::Swap { deadline, .. }
            | Action::AddLiquidity { deadline, .. }
            | Action::RemoveLiquidity { deadline, .. } => Some(deadline),
            Action::CreatePool { .. } | Action::Pause | Action::Unpause => None,
        }
    }

    /// Admin actions that need `TransitionContext::authorized`
    pub fn requires_authorization(&self) -> bool {
        matches!(
            self,
            Action::CreatePool { .. } | Action::Pause | Action::Unpause
        )
    }
}

impl ActionKind {
    /// Swap, AddLiquidity and RemoveLiquidity
    pub fn is_trading(&self) -> bool {
        matches!(
            self,
            ActionKind::Swap | ActionKind::AddLiquidity | ActionKind::RemoveLiquidity
        )
    }
}
