//! EVM error types

use bytes::Bytes;
use thiserror::Error;

/// Terminal error classification of a frame
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvmError {
    /// Out of gas
    #[error("out of gas")]
    OutOfGas,

    /// Stack underflow
    #[error("stack underflow")]
    StackUnderflow,

    /// Stack overflow
    #[error("stack overflow (max 1024)")]
    StackOverflow,

    /// Invalid jump destination
    #[error("invalid jump destination")]
    InvalidJump,

    /// Unknown opcode, or one disabled by the active forks
    #[error("opcode not found: 0x{0:02x}")]
    OpcodeNotFound(u8),

    /// State modification attempted inside a static call
    #[error("write protection")]
    WriteProtection,

    /// Return data out of bounds
    #[error("return data out of bounds")]
    ReturnDataOutOfBounds,

    /// Execution reverted
    #[error("execution reverted")]
    Revert,

    /// Not enough gas left to pay for the deployed code
    #[error("contract creation code storage out of gas")]
    CodeStoreOutOfGas,

    /// Max code size exceeded (EIP-170)
    #[error("max code size exceeded (limit: 24576 bytes)")]
    MaxCodeSizeExceeded,

    /// Contract creation collision
    #[error("contract address collision")]
    ContractAddressCollision,

    /// Call depth exceeded
    #[error("max call depth exceeded")]
    CallDepthExceeded,

    /// Insufficient balance for transfer
    #[error("insufficient balance for transfer")]
    InsufficientBalance,
}

/// Result type for EVM operations
pub type EvmResult<T> = Result<T, EvmError>;

/// Outcome of one invocation, reported to its invoker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Return data (or revert data)
    pub output: Bytes,
    /// Gas handed back to the invoker
    pub gas_left: u64,
    /// Gas consumed by the invocation
    pub gas_used: u64,
    /// Terminal error, `None` on success
    pub error: Option<EvmError>,
}

impl ExecutionResult {
    /// Create a successful result
    pub fn success(output: Bytes, gas_left: u64, gas_used: u64) -> Self {
        Self {
            output,
            gas_left,
            gas_used,
            error: None,
        }
    }

    /// Create a revert result; unused gas is returned
    pub fn revert(output: Bytes, gas_left: u64, gas_used: u64) -> Self {
        Self {
            output,
            gas_left,
            gas_used,
            error: Some(EvmError::Revert),
        }
    }

    /// Create a failed result
    pub fn failure(error: EvmError, gas_left: u64, gas_used: u64) -> Self {
        Self {
            output: Bytes::new(),
            gas_left,
            gas_used,
            error: Some(error),
        }
    }

    /// Whether the invocation finished without error
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Whether the invocation ended in any error, revert included
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the invocation ended in an explicit revert
    pub fn reverted(&self) -> bool {
        self.error == Some(EvmError::Revert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", EvmError::OutOfGas), "out of gas");
        assert_eq!(format!("{}", EvmError::StackUnderflow), "stack underflow");
        assert_eq!(format!("{}", EvmError::StackOverflow), "stack overflow (max 1024)");
        assert_eq!(format!("{}", EvmError::InvalidJump), "invalid jump destination");
        assert_eq!(format!("{}", EvmError::OpcodeNotFound(0xFE)), "opcode not found: 0xfe");
        assert_eq!(format!("{}", EvmError::WriteProtection), "write protection");
        assert_eq!(format!("{}", EvmError::ReturnDataOutOfBounds), "return data out of bounds");
        assert_eq!(format!("{}", EvmError::Revert), "execution reverted");
        assert_eq!(
            format!("{}", EvmError::CodeStoreOutOfGas),
            "contract creation code storage out of gas"
        );
        assert_eq!(format!("{}", EvmError::CallDepthExceeded), "max call depth exceeded");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(EvmError::OutOfGas, EvmError::OutOfGas);
        assert_ne!(EvmError::OutOfGas, EvmError::StackUnderflow);
        assert_eq!(EvmError::OpcodeNotFound(0x0c), EvmError::OpcodeNotFound(0x0c));
        assert_ne!(EvmError::OpcodeNotFound(0x0c), EvmError::OpcodeNotFound(0x0d));
    }

    #[test]
    fn test_execution_result_success() {
        let result = ExecutionResult::success(Bytes::from_static(&[1, 2, 3]), 900, 100);
        assert!(result.succeeded());
        assert!(!result.failed());
        assert!(!result.reverted());
        assert_eq!(result.gas_left, 900);
        assert_eq!(result.gas_used, 100);
        assert_eq!(result.output.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn test_execution_result_revert() {
        let result = ExecutionResult::revert(Bytes::from_static(&[7]), 10, 20);
        assert!(result.failed());
        assert!(result.reverted());
        assert_eq!(result.gas_left, 10);
        assert_eq!(result.output.as_ref(), &[7]);
    }

    #[test]
    fn test_execution_result_failure() {
        let result = ExecutionResult::failure(EvmError::OutOfGas, 0, 500);
        assert!(result.failed());
        assert!(!result.reverted());
        assert!(result.output.is_empty());
        assert_eq!(result.error, Some(EvmError::OutOfGas));
    }

    #[test]
    fn test_execution_result_default_is_success() {
        let result = ExecutionResult::default();
        assert!(result.succeeded());
        assert_eq!(result.gas_left, 0);
    }
}
