//! Memory operations and SHA3

use crate::error::EvmResult;
use crate::frame::Frame;
use crate::gas;
use edge_crypto::keccak256;
use primitive_types::U256;

pub(crate) fn mload(frame: &mut Frame<'_>) -> EvmResult<()> {
    let offset = frame.pop()?;
    let (offset, _) = frame.expand_memory(offset, U256::from(32))?;
    let value = frame.memory.load(offset);
    frame.push(value)
}

pub(crate) fn mstore(frame: &mut Frame<'_>) -> EvmResult<()> {
    let offset = frame.pop()?;
    let value = frame.pop()?;
    let (offset, _) = frame.expand_memory(offset, U256::from(32))?;
    frame.memory.store(offset, value);
    Ok(())
}

pub(crate) fn mstore8(frame: &mut Frame<'_>) -> EvmResult<()> {
    let offset = frame.pop()?;
    let value = frame.pop()?;
    let (offset, _) = frame.expand_memory(offset, U256::one())?;
    frame.memory.store8(offset, value.byte(0));
    Ok(())
}

pub(crate) fn msize(frame: &mut Frame<'_>) -> EvmResult<()> {
    let size = frame.memory.len();
    frame.push(U256::from(size))
}

/// SHA3: Keccak-256 of a memory range, 6 gas per word on top of the base
pub(crate) fn sha3(frame: &mut Frame<'_>) -> EvmResult<()> {
    let offset = frame.pop()?;
    let size = frame.pop()?;
    let (offset, size) = frame.expand_memory(offset, size)?;
    frame.use_gas(gas::sha3_gas(size as u64))?;

    let hash = keccak256(frame.memory.slice(offset, size));
    frame.push(hash.to_word())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvmError;
    use crate::host::DummyHost;
    use crate::instructions::test_utils::{frame_with_stack, top};

    #[test]
    fn test_mstore_mload() {
        let mut host = DummyHost::default();
        let mut frame = frame_with_stack(&mut host, 100, &[0x42, 0]);
        mstore(&mut frame).unwrap();
        assert_eq!(frame.memory().len(), 32);
        assert_eq!(frame.gas(), 97);

        frame.push(U256::zero()).unwrap();
        mload(&mut frame).unwrap();
        assert_eq!(top(&frame), U256::from(0x42));
        assert_eq!(frame.gas(), 97);
    }

    #[test]
    fn test_mstore8_low_byte() {
        let mut host = DummyHost::default();
        let mut frame = frame_with_stack(&mut host, 100, &[0x1234, 1]);
        mstore8(&mut frame).unwrap();
        assert_eq!(frame.memory().data()[1], 0x34);
        assert_eq!(frame.memory().len(), 32);
    }

    #[test]
    fn test_msize_rounds_to_words() {
        let mut host = DummyHost::default();
        let mut frame = frame_with_stack(&mut host, 100, &[0, 33]);
        mload(&mut frame).unwrap();
        msize(&mut frame).unwrap();
        assert_eq!(top(&frame), U256::from(96));
    }

    #[test]
    fn test_mload_huge_offset_out_of_gas() {
        let mut host = DummyHost::default();
        let mut frame = frame_with_stack(&mut host, 1_000_000, &[]);
        frame.push(U256::MAX).unwrap();
        assert_eq!(mload(&mut frame), Err(EvmError::OutOfGas));
    }

    #[test]
    fn test_sha3_word_gas() {
        let mut host = DummyHost::default();
        // 33 bytes at 0: two words of memory and two words of hashing
        let mut frame = frame_with_stack(&mut host, 100, &[33, 0]);
        sha3(&mut frame).unwrap();
        assert_eq!(top(&frame), keccak256(&[0u8; 33]).to_word());
        assert_eq!(frame.gas(), 100 - 6 - 12);
    }
}
