//! Caller-supplied, read-only inputs to a transition

use serde::{Deserialize, Serialize};

/// Ledger parameters for the container minimum balance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinReserveProfile {
    /// Flat part of the minimum balance
    pub base: u64,

    /// Cost per distinct asset type held
    pub per_asset_cost: u64,

    /// Cost per byte of the encoded state record
    pub per_byte_cost: u64,

    /// Safety margin added on top, in basis points
    pub buffer_bps: u16,
}

impl Default for MinReserveProfile {
    fn default() -> Self {
        Self {
            base: 689_600,
            per_asset_cost: 120_680,
            per_byte_cost: 4_310,
            buffer_bps: 1_000,
        }
    }
}

/// Everything a transition may observe about its transaction
///
/// Time is an explicit input so that every node evaluating the same
/// transaction gets the same answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionContext {
    /// Ledger time at which the transaction is valid
    pub current_time: u64,

    /// Whether the admin signer set is present
    pub authorized: bool,

    pub min_reserve_profile: MinReserveProfile,
}

impl TransitionContext {
    pub fn new(current_time: u64, authorized: bool, min_reserve_profile: MinReserveProfile) -> Self {
        Self {
            current_time,
            authorized,
            min_reserve_profile,
        }
    }
}
