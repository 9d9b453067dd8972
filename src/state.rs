//! Pool state record and the identifiers it carries

use serde::{Deserialize, Serialize};

/// Length of a minting policy hash
pub const POLICY_ID_LEN: usize = 28;

/// Length of a key hash identifying the admin
pub const KEY_HASH_LEN: usize = 28;

/// Maximum length of an asset name
pub const MAX_ASSET_NAME_LEN: usize = 32;

/// Distinct asset types held by the pool container:
/// the base asset, the pooled token and the identity token.
pub const POOL_ASSET_COUNT: u64 = 3;

// Encoded-size estimate of the state record
const RECORD_OVERHEAD_BYTES: u64 = 8;
const UINT_FIELD_BYTES: u64 = 9;
const UINT_FIELD_COUNT: u64 = 4;
const BYTES_HEADER_LEN: u64 = 2;
const ASSET_CLASS_OVERHEAD_BYTES: u64 = 1;

/// Hash of the minting policy of an asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub [u8; POLICY_ID_LEN]);

/// Asset name under a policy (0 to 32 bytes)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetName(pub Vec<u8>);

impl AssetName {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for AssetName {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// (policy, name) pair identifying a native asset
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetClass {
    pub policy: PolicyId,
    pub name: AssetName,
}

impl AssetClass {
    pub fn new(policy: PolicyId, name: impl Into<AssetName>) -> Self {
        Self {
            policy,
            name: name.into(),
        }
    }

    fn encoded_len(&self) -> u64 {
        ASSET_CLASS_OVERHEAD_BYTES
            + BYTES_HEADER_LEN
            + POLICY_ID_LEN as u64
            + BYTES_HEADER_LEN
            + self.name.len() as u64
    }
}

/// Key hash of the party allowed to pause, unpause and create the pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(pub [u8; KEY_HASH_LEN]);

/// Admin-controlled trading switch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolStatus {
    #[default]
    Active,
    Paused,
}

/// Lifecycle phase derived from the record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolPhase {
    /// No LP supply: the container exists but holds no liquidity
    Uninitialized,
    Active,
    Paused,
}

impl core::fmt::Display for PoolPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PoolPhase::Uninitialized => write!(f, "uninitialized"),
            PoolPhase::Active => write!(f, "active"),
            PoolPhase::Paused => write!(f, "paused"),
        }
    }
}

/// Decoded pool record
///
/// One record lives in exactly one spendable container at a time. Reserves
/// and `lp_total_supply` change with trading; `token_id`, `lp_token_id`,
/// `admin` and both fee fields are fixed once the pool exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Base-asset reserve (lovelace)
    pub ada_reserve: u64,

    /// Pooled token reserve
    pub token_reserve: u64,

    /// Outstanding LP tokens
    pub lp_total_supply: u64,

    /// Trading fee retained by liquidity providers
    pub fee_bps: u16,

    /// Protocol cut, charged on top of `fee_bps`
    pub protocol_fee_bps: u16,

    pub status: PoolStatus,

    /// Identity tokens held by the container; exactly 1 while the pool exists
    pub identity_token_count: u64,

    pub token_id: AssetClass,
    pub lp_token_id: AssetClass,
    pub admin: Identity,
}

impl PoolState {
    /// Fresh container holding only its identity token
    pub fn uninitialized(
        token_id: AssetClass,
        lp_token_id: AssetClass,
        admin: Identity,
        protocol_fee_bps: u16,
    ) -> Self {
        Self {
            ada_reserve: 0,
            token_reserve: 0,
            lp_total_supply: 0,
            fee_bps: 0,
            protocol_fee_bps,
            status: PoolStatus::Active,
            identity_token_count: 1,
            token_id,
            lp_token_id,
            admin,
        }
    }

    pub fn phase(&self) -> PoolPhase {
        if self.lp_total_supply == 0 {
            return PoolPhase::Uninitialized;
        }
        match self.status {
            PoolStatus::Active => PoolPhase::Active,
            PoolStatus::Paused => PoolPhase::Paused,
        }
    }

    /// Fee charged on swap input: fee_bps + protocol_fee_bps
    pub fn total_fee_bps(&self) -> u64 {
        self.fee_bps as u64 + self.protocol_fee_bps as u64
    }

    /// Constant product k = ada_reserve * token_reserve
    pub fn k(&self) -> u128 {
        (self.ada_reserve as u128) * (self.token_reserve as u128)
    }

    /// Distinct asset types the container holds
    pub fn asset_count(&self) -> u64 {
        POOL_ASSET_COUNT
    }

    /// Deterministic size estimate of the encoded record
    pub fn state_size_bytes(&self) -> u64 {
        RECORD_OVERHEAD_BYTES
            + UINT_FIELD_COUNT * UINT_FIELD_BYTES
            + self.token_id.encoded_len()
            + self.lp_token_id.encoded_len()
            + BYTES_HEADER_LEN
            + KEY_HASH_LEN as u64
    }
}
