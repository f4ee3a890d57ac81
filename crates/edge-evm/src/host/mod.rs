//! Host interface
//!
//! The engine never owns account state. Everything outside the running
//! frame (balances, code, storage, logs, nested execution) is reached
//! through [`Host`].

mod dummy;

pub use dummy::DummyHost;

use crate::context::{CallContext, Environment};
use crate::error::ExecutionResult;
use bytes::Bytes;
use edge_primitives::{Address, H256, U256};

/// Effect of an SSTORE on its slot, relative to the value at the start of
/// the transaction (original) and right before the write (current)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageStatus {
    /// New value equals the current value
    Unchanged,
    /// Original equals current, both non-zero, new value differs
    Modified,
    /// Slot was already written in this transaction
    ModifiedAgain,
    /// Original equals current and is zero; new value is non-zero
    Added,
    /// Original equals current and is non-zero; new value is zero
    Deleted,
}

/// Log entry emitted by LOG opcodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Log {
    /// Contract address that emitted the log
    pub address: Address,
    /// Log topics (0-4)
    pub topics: Vec<H256>,
    /// Log data
    pub data: Bytes,
}

/// State and execution services the engine calls out to
pub trait Host {
    /// Whether the account exists in state
    fn account_exists(&self, address: &Address) -> bool;

    /// Whether the account is empty (EIP-161: no code, zero nonce, zero balance)
    fn empty(&self, address: &Address) -> bool;

    /// Account balance
    fn balance(&self, address: &Address) -> U256;

    /// Account nonce
    fn nonce(&self, address: &Address) -> u64;

    /// Bump the account nonce by one
    fn increment_nonce(&mut self, address: &Address);

    /// Account code
    fn code(&self, address: &Address) -> Bytes;

    /// Account code size
    fn code_size(&self, address: &Address) -> usize {
        self.code(address).len()
    }

    /// Account code hash, zero for a non-existent account
    fn code_hash(&self, address: &Address) -> H256;

    /// Current value of a storage slot
    fn storage(&self, address: &Address, key: &U256) -> U256;

    /// Write a storage slot and classify the write for gas metering
    fn set_storage(&mut self, address: &Address, key: U256, value: U256) -> StorageStatus;

    /// Schedule `address` for removal, crediting its balance to `beneficiary`
    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address);

    /// Hash of block `number`
    fn block_hash(&self, number: u64) -> H256;

    /// Block and transaction environment
    fn environment(&self) -> &Environment;

    /// Record a log
    fn emit_log(&mut self, log: Log);

    /// Run a nested frame described by `context`.
    ///
    /// For create kinds the host deploys the frame's output as code at
    /// `context.address`. The host owns value transfer, snapshots and
    /// rollback of the nested frame.
    fn callx(&mut self, context: CallContext) -> ExecutionResult;
}
