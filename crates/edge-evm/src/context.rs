//! Execution context for EVM

use bytes::Bytes;
use edge_primitives::{Address, H256, U256};

/// How a frame was entered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// CALL
    Call,
    /// CALLCODE
    CallCode,
    /// DELEGATECALL
    DelegateCall,
    /// STATICCALL
    StaticCall,
    /// CREATE
    Create,
    /// CREATE2
    Create2,
}

impl CallKind {
    /// Whether the frame deploys a contract
    pub fn is_create(self) -> bool {
        matches!(self, CallKind::Create | CallKind::Create2)
    }
}

/// Call context information
///
/// For create kinds, `input` carries the init code and `address` is the
/// address being deployed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Entry kind
    pub kind: CallKind,
    /// Account whose storage and balance the frame acts on
    pub address: Address,
    /// Account whose code runs; differs from `address` for CALLCODE and DELEGATECALL
    pub code_address: Address,
    /// Caller address
    pub caller: Address,
    /// Call value in wei
    pub value: U256,
    /// Call data (init code for creates)
    pub input: Bytes,
    /// Gas limit
    pub gas: u64,
    /// Whether this is a static call (no state modifications)
    pub is_static: bool,
    /// Call depth (0 for the outermost frame)
    pub depth: usize,
    /// CREATE2 salt
    pub salt: H256,
}

impl CallContext {
    /// Create a new call context
    pub fn new(address: Address, caller: Address, value: U256, input: Bytes, gas: u64) -> Self {
        Self {
            kind: CallKind::Call,
            address,
            code_address: address,
            caller,
            value,
            input,
            gas,
            is_static: false,
            depth: 0,
            salt: H256::ZERO,
        }
    }

    /// Create a static call context
    pub fn new_static(address: Address, caller: Address, input: Bytes, gas: u64) -> Self {
        Self {
            kind: CallKind::StaticCall,
            is_static: true,
            ..Self::new(address, caller, U256::zero(), input, gas)
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new(Address::ZERO, Address::ZERO, U256::zero(), Bytes::new(), 0)
    }
}

/// Block environment information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockContext {
    /// Block number
    pub number: u64,
    /// Block timestamp
    pub timestamp: u64,
    /// Block gas limit
    pub gas_limit: u64,
    /// Block coinbase (miner/validator)
    pub coinbase: Address,
    /// Block difficulty
    pub difficulty: U256,
    /// Chain ID
    pub chain_id: u64,
    /// Base fee (EIP-1559)
    pub base_fee: U256,
}

impl Default for BlockContext {
    fn default() -> Self {
        Self {
            number: 0,
            timestamp: 0,
            gas_limit: 30_000_000,
            coinbase: Address::ZERO,
            difficulty: U256::zero(),
            chain_id: 1,
            base_fee: U256::zero(),
        }
    }
}

/// Transaction environment information
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxContext {
    /// Transaction origin (original sender)
    pub origin: Address,
    /// Gas price
    pub gas_price: U256,
}

/// Block and transaction environment, shared by every frame of a transaction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    /// Block context
    pub block: BlockContext,
    /// Transaction context
    pub tx: TxContext,
}

impl Environment {
    /// Create new environment
    pub fn new(block: BlockContext, tx: TxContext) -> Self {
        Self { block, tx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_context_new() {
        let address = Address::from_bytes([0x11; 20]);
        let caller = Address::from_bytes([0x22; 20]);
        let ctx = CallContext::new(
            address,
            caller,
            U256::from(1000),
            Bytes::from_static(&[1, 2, 3]),
            100000,
        );

        assert_eq!(ctx.kind, CallKind::Call);
        assert_eq!(ctx.address, address);
        assert_eq!(ctx.code_address, address);
        assert_eq!(ctx.caller, caller);
        assert_eq!(ctx.value, U256::from(1000));
        assert_eq!(ctx.input.as_ref(), &[1, 2, 3]);
        assert_eq!(ctx.gas, 100000);
        assert!(!ctx.is_static);
        assert_eq!(ctx.depth, 0);
    }

    #[test]
    fn test_call_context_new_static() {
        let ctx = CallContext::new_static(
            Address::from_bytes([0x11; 20]),
            Address::from_bytes([0x22; 20]),
            Bytes::new(),
            100000,
        );

        assert_eq!(ctx.kind, CallKind::StaticCall);
        assert!(ctx.is_static);
        assert!(ctx.value.is_zero());
    }

    #[test]
    fn test_call_kind_is_create() {
        assert!(CallKind::Create.is_create());
        assert!(CallKind::Create2.is_create());
        assert!(!CallKind::Call.is_create());
        assert!(!CallKind::DelegateCall.is_create());
    }

    #[test]
    fn test_block_context_default() {
        let block = BlockContext::default();
        assert_eq!(block.gas_limit, 30_000_000);
        assert_eq!(block.chain_id, 1);
        assert!(block.base_fee.is_zero());
    }
}
