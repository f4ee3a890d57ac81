use super::{Host, Log, StorageStatus};
use crate::context::{CallContext, Environment};
use crate::error::ExecutionResult;
use bytes::Bytes;
use edge_crypto::{keccak256, KECCAK_EMPTY};
use edge_primitives::{Address, H256, U256};
use std::collections::HashMap;

/// A [`Host`] backed by plain maps.
///
/// Nested calls are not executed: `callx` records the context it was
/// given and answers with the preset `call_result`.
#[derive(Clone, Debug, Default)]
pub struct DummyHost {
    /// Environment returned to the frame
    pub env: Environment,
    /// Balances
    pub balances: HashMap<Address, U256>,
    /// Nonces
    pub nonces: HashMap<Address, u64>,
    /// Code
    pub codes: HashMap<Address, Bytes>,
    /// Storage
    pub storage: HashMap<(Address, U256), U256>,
    /// Hashes served to BLOCKHASH
    pub block_hashes: HashMap<u64, H256>,
    /// Logs emitted
    pub logs: Vec<Log>,
    /// `(address, beneficiary)` pairs passed to SELFDESTRUCT
    pub selfdestructs: Vec<(Address, Address)>,
    /// Contexts received by `callx`, oldest first
    pub calls: Vec<CallContext>,
    /// Result returned by every `callx`
    pub call_result: ExecutionResult,
}

impl DummyHost {
    /// Create a new dummy host with the given environment
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            ..Default::default()
        }
    }
}

impl Host for DummyHost {
    fn account_exists(&self, address: &Address) -> bool {
        self.balances.contains_key(address)
            || self.nonces.contains_key(address)
            || self.codes.contains_key(address)
    }

    fn empty(&self, address: &Address) -> bool {
        self.balance(address).is_zero()
            && self.nonce(address) == 0
            && self.code_size(address) == 0
    }

    fn balance(&self, address: &Address) -> U256 {
        self.balances.get(address).copied().unwrap_or_default()
    }

    fn nonce(&self, address: &Address) -> u64 {
        self.nonces.get(address).copied().unwrap_or_default()
    }

    fn increment_nonce(&mut self, address: &Address) {
        *self.nonces.entry(*address).or_default() += 1;
    }

    fn code(&self, address: &Address) -> Bytes {
        self.codes.get(address).cloned().unwrap_or_default()
    }

    fn code_hash(&self, address: &Address) -> H256 {
        if !self.account_exists(address) {
            return H256::ZERO;
        }
        match self.codes.get(address) {
            Some(code) => keccak256(code),
            None => KECCAK_EMPTY,
        }
    }

    fn storage(&self, address: &Address, key: &U256) -> U256 {
        self.storage.get(&(*address, *key)).copied().unwrap_or_default()
    }

    fn set_storage(&mut self, address: &Address, key: U256, value: U256) -> StorageStatus {
        let current = self.storage(address, &key);
        self.storage.insert((*address, key), value);
        if current == value {
            StorageStatus::Unchanged
        } else if current.is_zero() {
            StorageStatus::Added
        } else if value.is_zero() {
            StorageStatus::Deleted
        } else {
            StorageStatus::Modified
        }
    }

    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) {
        self.selfdestructs.push((*address, *beneficiary));
    }

    fn block_hash(&self, number: u64) -> H256 {
        self.block_hashes.get(&number).copied().unwrap_or_default()
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn emit_log(&mut self, log: Log) {
        self.logs.push(log);
    }

    fn callx(&mut self, context: CallContext) -> ExecutionResult {
        self.calls.push(context);
        self.call_result.clone()
    }
}
