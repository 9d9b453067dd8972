//! Deterministic transition engine for a constant-product pool on a
//! UTXO-style ledger
//!
//! The pool lives in one spendable container. Every update is a pure
//! function of (pre-state, action, context), recomputed independently by
//! each validating party:
//! 1. constant product swaps with the fee kept in the pool
//! 2. proportional LP minting and redemption
//! 3. admin pause / unpause
//! 4. a minimum base-asset balance so the container stays spendable
//!
//! Integer arithmetic only; every division floors. No I/O, no clock, no
//! shared state: [`validate_transition`] is safe to call from any number
//! of threads.

#![forbid(unsafe_code)]

pub mod action;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod quote;
pub mod state;
pub mod validator;

// Re-export commonly used types
pub use action::{Action, ActionKind, SwapDirection};
pub use config::{ConfigError, EngineConfig, PoolPolicy, MAX_FEE_BPS};
pub use context::{MinReserveProfile, TransitionContext};
pub use engine::{calculate_min_reserve, Deposit, SwapResult, Withdrawal};
pub use error::{Result, TransitionError, Violation};
pub use quote::{min_out_with_tolerance, quote_remove_liquidity, quote_swap, SwapPreview};
pub use state::{AssetClass, AssetName, Identity, PolicyId, PoolPhase, PoolState, PoolStatus};
pub use validator::{validate_transition, Outcome, PostState, TransitionValidator};
