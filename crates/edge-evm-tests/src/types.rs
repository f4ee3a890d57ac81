//! Type definitions for the VM fixture JSON format

use crate::host::Account;
use bytes::Bytes;
use edge_evm::Forks;
use edge_primitives::{Address, H256, U256};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};

/// Hex-encoded bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexBytes(pub Bytes);

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        if s.is_empty() {
            return Ok(HexBytes(Bytes::new()));
        }
        hex::decode(s)
            .map(|bytes| HexBytes(Bytes::from(bytes)))
            .map_err(serde::de::Error::custom)
    }
}

/// Hex-encoded U256, leading zeros optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HexU256(pub U256);

impl<'de> Deserialize<'de> for HexU256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        if s.is_empty() {
            return Ok(HexU256(U256::zero()));
        }
        U256::from_str_radix(s, 16)
            .map(HexU256)
            .map_err(|e| serde::de::Error::custom(format!("invalid u256 {s}: {e:?}")))
    }
}

/// Hex-encoded u64
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HexU64(pub u64);

impl<'de> Deserialize<'de> for HexU64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        if s.is_empty() {
            return Ok(HexU64(0));
        }
        u64::from_str_radix(s, 16)
            .map(HexU64)
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// VM Fixture Types
// =============================================================================

/// VM fixture file structure (test name -> test case)
pub type VmTestFile = BTreeMap<String, VmTestCase>;

/// Single VM test case
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmTestCase {
    /// Environment info
    pub env: VmEnv,
    /// Execution parameters
    pub exec: VmExec,
    /// Fork schedule, resolved at the current block; every fork active if absent
    #[serde(default)]
    pub forks: Option<Forks>,
    /// Hashes served to BLOCKHASH, by block number
    #[serde(default)]
    pub block_hashes: HashMap<HexU64, H256>,
    /// Expected gas remaining (None if the frame should fail)
    pub gas: Option<HexU64>,
    /// Expected hash of the RLP-encoded logs
    pub logs: Option<H256>,
    /// Expected output
    pub out: Option<HexBytes>,
    /// Pre-execution state
    #[serde(default)]
    pub pre: HashMap<Address, AccountState>,
    /// Post-execution state (None if the frame should fail)
    pub post: Option<HashMap<Address, AccountState>>,
}

/// VM test environment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmEnv {
    /// Current coinbase
    pub current_coinbase: Address,
    /// Current difficulty
    pub current_difficulty: HexU256,
    /// Current gas limit
    pub current_gas_limit: HexU64,
    /// Current block number
    pub current_number: HexU64,
    /// Current timestamp
    pub current_timestamp: HexU64,
    /// Current base fee (optional, EIP-1559)
    pub current_base_fee: Option<HexU256>,
    /// Chain id (optional, defaults to 1)
    pub chain_id: Option<HexU64>,
}

/// VM test execution parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmExec {
    /// Address of the executing account
    pub address: Address,
    /// Caller address
    pub caller: Address,
    /// Code to execute
    pub code: HexBytes,
    /// Input data
    pub data: HexBytes,
    /// Gas provided
    pub gas: HexU64,
    /// Gas price
    pub gas_price: HexU256,
    /// Origin address
    pub origin: Address,
    /// Value transferred
    pub value: HexU256,
}

/// Account state
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountState {
    /// Balance
    pub balance: HexU256,
    /// Code
    pub code: HexBytes,
    /// Nonce
    pub nonce: HexU64,
    /// Storage
    pub storage: HashMap<HexU256, HexU256>,
}

impl AccountState {
    /// Convert into a host account, dropping zero-valued slots
    pub fn to_account(&self) -> Account {
        Account {
            balance: self.balance.0,
            nonce: self.nonce.0,
            code: self.code.0.clone(),
            storage: self
                .storage
                .iter()
                .filter(|(_, value)| !value.0.is_zero())
                .map(|(key, value)| (key.0, value.0))
                .collect(),
        }
    }
}
