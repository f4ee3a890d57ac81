//! In-memory reference host
//!
//! [`InMemoryHost`] keeps every account in a map and runs nested frames
//! itself: [`Host::callx`] snapshots state, moves value, executes the callee
//! (or init code) through [`edge_evm::execute`] and rolls the snapshot back
//! when the nested frame reverts or fails.

use bytes::Bytes;
use edge_crypto::keccak256;
use edge_evm::gas::cost;
use edge_evm::{
    execute, CallContext, CallKind, Code, Environment, EvmError, ExecutionResult, ForksInTime,
    Host, Log, StorageStatus,
};
use edge_primitives::{Address, H256, U256};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Account state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Balance in wei
    pub balance: U256,
    /// Nonce
    pub nonce: u64,
    /// Code
    pub code: Bytes,
    /// Non-zero storage slots
    pub storage: HashMap<U256, U256>,
}

impl Account {
    /// EIP-161 emptiness: no code, zero nonce, zero balance
    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.nonce == 0 && self.balance.is_zero()
    }
}

/// State captured at a snapshot
#[derive(Debug, Clone)]
struct Checkpoint {
    accounts: HashMap<Address, Account>,
    logs: usize,
    selfdestructs: usize,
}

/// A [`Host`] over in-memory accounts that executes nested frames
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    env: Environment,
    forks: ForksInTime,
    accounts: HashMap<Address, Account>,
    /// Slot values as first seen in this transaction
    original_storage: HashMap<(Address, U256), U256>,
    block_hashes: HashMap<u64, H256>,
    logs: Vec<Log>,
    selfdestructs: Vec<Address>,
    snapshots: Vec<Checkpoint>,
}

impl InMemoryHost {
    /// Create an empty host
    pub fn new(env: Environment, forks: ForksInTime) -> Self {
        Self {
            env,
            forks,
            accounts: HashMap::new(),
            original_storage: HashMap::new(),
            block_hashes: HashMap::new(),
            logs: Vec::new(),
            selfdestructs: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// Fork flags every nested frame runs under
    pub fn forks(&self) -> &ForksInTime {
        &self.forks
    }

    /// Insert or replace an account
    pub fn insert_account(&mut self, address: Address, account: Account) {
        self.accounts.insert(address, account);
    }

    /// Get an account
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// All accounts
    pub fn accounts(&self) -> &HashMap<Address, Account> {
        &self.accounts
    }

    /// Serve `hash` for BLOCKHASH of `number`
    pub fn set_block_hash(&mut self, number: u64, hash: H256) {
        self.block_hashes.insert(number, hash);
    }

    /// Logs emitted and not rolled back
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Accounts scheduled for removal, in order of destruction
    pub fn selfdestructs(&self) -> &[Address] {
        &self.selfdestructs
    }

    /// Apply end-of-transaction effects: remove self-destructed accounts
    /// and, from EIP-158, accounts left empty
    pub fn finalize(&mut self) {
        for address in std::mem::take(&mut self.selfdestructs) {
            self.accounts.remove(&address);
        }
        if self.forks.eip158 {
            self.accounts.retain(|_, account| !account.is_empty());
        }
        self.original_storage.clear();
        self.snapshots.clear();
    }

    /// Take a snapshot of the current state and return its id
    pub fn snapshot(&mut self) -> usize {
        self.snapshots.push(Checkpoint {
            accounts: self.accounts.clone(),
            logs: self.logs.len(),
            selfdestructs: self.selfdestructs.len(),
        });
        self.snapshots.len() - 1
    }

    /// Restore the state captured by snapshot `id`, discarding later ones
    pub fn revert_to_snapshot(&mut self, id: usize) {
        if let Some(checkpoint) = self.snapshots.drain(id..).next() {
            self.accounts = checkpoint.accounts;
            self.logs.truncate(checkpoint.logs);
            self.selfdestructs.truncate(checkpoint.selfdestructs);
        }
    }

    /// Keep the current state and drop snapshot `id` and later ones
    pub fn commit_snapshot(&mut self, id: usize) {
        self.snapshots.truncate(id);
    }

    /// Move `value` from `from` to `to`, creating `to` if needed
    fn transfer(&mut self, from: &Address, to: &Address, value: U256) -> bool {
        if value.is_zero() {
            return true;
        }
        let Some(sender) = self.accounts.get_mut(from) else {
            return false;
        };
        if sender.balance < value {
            return false;
        }
        sender.balance -= value;
        let recipient = self.accounts.entry(*to).or_default();
        recipient.balance = recipient.balance.saturating_add(value);
        true
    }

    fn run_call(&mut self, context: CallContext) -> ExecutionResult {
        let gas = context.gas;
        let snapshot = self.snapshot();

        if context.kind == CallKind::Call {
            if !self.forks.eip158 {
                self.accounts.entry(context.address).or_default();
            }
            if !self.transfer(&context.caller, &context.address, context.value) {
                self.revert_to_snapshot(snapshot);
                return ExecutionResult::failure(EvmError::InsufficientBalance, gas, 0);
            }
        }

        let code = self.code(&context.code_address);
        if code.is_empty() {
            self.commit_snapshot(snapshot);
            return ExecutionResult::success(Bytes::new(), gas, 0);
        }

        let forks = self.forks;
        let result = execute(Code::new(code), context, forks, self);
        if result.failed() {
            self.revert_to_snapshot(snapshot);
        } else {
            self.commit_snapshot(snapshot);
        }
        result
    }

    fn run_create(&mut self, context: CallContext) -> ExecutionResult {
        let gas = context.gas;
        let address = context.address;

        let collision = self
            .accounts
            .get(&address)
            .is_some_and(|account| account.nonce != 0 || !account.code.is_empty());
        if collision {
            debug!(%address, "create collision");
            return ExecutionResult::failure(EvmError::ContractAddressCollision, 0, gas);
        }

        let snapshot = self.snapshot();
        let nonce = if self.forks.eip158 { 1 } else { 0 };
        let account = self.accounts.entry(address).or_default();
        account.nonce = nonce;
        account.storage.clear();

        if !self.transfer(&context.caller, &address, context.value) {
            self.revert_to_snapshot(snapshot);
            return ExecutionResult::failure(EvmError::InsufficientBalance, gas, 0);
        }

        let forks = self.forks;
        let init_code = Code::new(context.input.clone());
        let result = execute(init_code, context, forks, self);
        if result.failed() {
            self.revert_to_snapshot(snapshot);
            return result;
        }

        let code = result.output;
        if forks.eip158 && code.len() > cost::MAX_CODE_SIZE {
            self.revert_to_snapshot(snapshot);
            return ExecutionResult::failure(EvmError::MaxCodeSizeExceeded, 0, gas);
        }

        let deposit = cost::CODE_DEPOSIT * code.len() as u64;
        let Some(gas_left) = result.gas_left.checked_sub(deposit) else {
            if forks.homestead {
                self.revert_to_snapshot(snapshot);
                return ExecutionResult::failure(EvmError::CodeStoreOutOfGas, 0, gas);
            }
            // Frontier keeps the account and its init-time state, without code
            self.commit_snapshot(snapshot);
            return ExecutionResult {
                output: Bytes::new(),
                gas_left: result.gas_left,
                gas_used: result.gas_used,
                error: Some(EvmError::CodeStoreOutOfGas),
            };
        };

        if let Some(account) = self.accounts.get_mut(&address) {
            account.code = code.clone();
        }
        self.commit_snapshot(snapshot);
        ExecutionResult::success(code, gas_left, gas - gas_left)
    }
}

impl Host for InMemoryHost {
    fn account_exists(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    fn empty(&self, address: &Address) -> bool {
        self.accounts.get(address).map_or(true, Account::is_empty)
    }

    fn balance(&self, address: &Address) -> U256 {
        self.accounts
            .get(address)
            .map(|account| account.balance)
            .unwrap_or_default()
    }

    fn nonce(&self, address: &Address) -> u64 {
        self.accounts.get(address).map_or(0, |account| account.nonce)
    }

    fn increment_nonce(&mut self, address: &Address) {
        let account = self.accounts.entry(*address).or_default();
        account.nonce = account.nonce.wrapping_add(1);
    }

    fn code(&self, address: &Address) -> Bytes {
        self.accounts
            .get(address)
            .map(|account| account.code.clone())
            .unwrap_or_default()
    }

    fn code_hash(&self, address: &Address) -> H256 {
        match self.accounts.get(address) {
            Some(account) => keccak256(&account.code),
            None => H256::ZERO,
        }
    }

    fn storage(&self, address: &Address, key: &U256) -> U256 {
        self.accounts
            .get(address)
            .and_then(|account| account.storage.get(key).copied())
            .unwrap_or_default()
    }

    fn set_storage(&mut self, address: &Address, key: U256, value: U256) -> StorageStatus {
        let current = self.storage(address, &key);
        let original = *self.original_storage.entry((*address, key)).or_insert(current);

        let account = self.accounts.entry(*address).or_default();
        if value.is_zero() {
            account.storage.remove(&key);
        } else {
            account.storage.insert(key, value);
        }

        if current == value {
            StorageStatus::Unchanged
        } else if original != current {
            StorageStatus::ModifiedAgain
        } else if original.is_zero() {
            StorageStatus::Added
        } else if value.is_zero() {
            StorageStatus::Deleted
        } else {
            StorageStatus::Modified
        }
    }

    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) {
        let balance = self.balance(address);
        if let Some(account) = self.accounts.get_mut(address) {
            account.balance = U256::zero();
        }
        if address != beneficiary {
            let recipient = self.accounts.entry(*beneficiary).or_default();
            recipient.balance = recipient.balance.saturating_add(balance);
        }
        if !self.selfdestructs.contains(address) {
            self.selfdestructs.push(*address);
        }
    }

    fn block_hash(&self, number: u64) -> H256 {
        self.block_hashes.get(&number).copied().unwrap_or_default()
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn emit_log(&mut self, log: Log) {
        trace!(address = %log.address, topics = log.topics.len(), "log");
        self.logs.push(log);
    }

    fn callx(&mut self, context: CallContext) -> ExecutionResult {
        if context.depth > cost::MAX_CALL_DEPTH {
            return ExecutionResult::failure(EvmError::CallDepthExceeded, context.gas, 0);
        }
        trace!(kind = ?context.kind, address = %context.address, gas = context.gas, "callx");
        if context.kind.is_create() {
            self.run_create(context)
        } else {
            self.run_call(context)
        }
    }
}
