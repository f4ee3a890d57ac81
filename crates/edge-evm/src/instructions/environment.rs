//! Call, transaction and block environment queries, plus the copy
//! operations over call data, code and return data

use crate::error::{EvmError, EvmResult};
use crate::frame::Frame;
use crate::gas;
use crate::word;
use primitive_types::U256;

pub(crate) fn address(frame: &mut Frame<'_>) -> EvmResult<()> {
    let address = frame.context.address.to_word();
    frame.push(address)
}

pub(crate) fn origin(frame: &mut Frame<'_>) -> EvmResult<()> {
    let origin = frame.host.environment().tx.origin.to_word();
    frame.push(origin)
}

pub(crate) fn caller(frame: &mut Frame<'_>) -> EvmResult<()> {
    let caller = frame.context.caller.to_word();
    frame.push(caller)
}

pub(crate) fn callvalue(frame: &mut Frame<'_>) -> EvmResult<()> {
    let value = frame.context.value;
    frame.push(value)
}

/// CALLDATALOAD: 32 bytes of input at the offset, zero-padded past the end
pub(crate) fn calldataload(frame: &mut Frame<'_>) -> EvmResult<()> {
    let offset = frame.pop()?;
    let offset = word::saturating_usize(&offset);

    let mut buf = [0u8; 32];
    let input = &frame.context.input;
    if offset < input.len() {
        let available = (input.len() - offset).min(32);
        buf[..available].copy_from_slice(&input[offset..offset + available]);
    }
    frame.push(U256::from_big_endian(&buf))
}

pub(crate) fn calldatasize(frame: &mut Frame<'_>) -> EvmResult<()> {
    let size = frame.context.input.len();
    frame.push(U256::from(size))
}

/// Shared body of CALLDATACOPY and CODECOPY: memory expansion, copy gas,
/// then a zero-padded copy from `source`
fn copy_to_memory(frame: &mut Frame<'_>, source: &[u8]) -> EvmResult<()> {
    let mem_offset = frame.pop()?;
    let data_offset = frame.pop()?;
    let length = frame.pop()?;

    let (mem_offset, length) = frame.expand_memory(mem_offset, length)?;
    frame.use_gas(gas::copy_gas(length as u64))?;

    let data_offset = word::saturating_usize(&data_offset);
    frame.memory.copy_padded(mem_offset, source, data_offset, length);
    Ok(())
}

pub(crate) fn calldatacopy(frame: &mut Frame<'_>) -> EvmResult<()> {
    let input = frame.context.input.clone();
    copy_to_memory(frame, &input)
}

pub(crate) fn codesize(frame: &mut Frame<'_>) -> EvmResult<()> {
    let size = frame.code.len();
    frame.push(U256::from(size))
}

pub(crate) fn codecopy(frame: &mut Frame<'_>) -> EvmResult<()> {
    let code = frame.code.bytes().clone();
    copy_to_memory(frame, &code)
}

pub(crate) fn gasprice(frame: &mut Frame<'_>) -> EvmResult<()> {
    let price = frame.host.environment().tx.gas_price;
    frame.push(price)
}

pub(crate) fn returndatasize(frame: &mut Frame<'_>) -> EvmResult<()> {
    let size = frame.return_data.len();
    frame.push(U256::from(size))
}

/// RETURNDATACOPY. Unlike the other copies, reading past the end of the
/// return data is an error rather than zero padding.
pub(crate) fn returndatacopy(frame: &mut Frame<'_>) -> EvmResult<()> {
    let mem_offset = frame.pop()?;
    let data_offset = frame.pop()?;
    let length = frame.pop()?;

    if [mem_offset, data_offset, length].iter().any(word::is_negative) {
        return Err(EvmError::OutOfGas);
    }

    let (mem_offset, size) = frame.expand_memory(mem_offset, length)?;
    frame.use_gas(gas::copy_gas(size as u64))?;

    let end = data_offset
        .checked_add(length)
        .and_then(|end| word::to_usize(&end))
        .ok_or(EvmError::ReturnDataOutOfBounds)?;
    if end > frame.return_data.len() {
        return Err(EvmError::ReturnDataOutOfBounds);
    }
    if size == 0 {
        return Ok(());
    }

    let start = end - size;
    frame.memory.store_slice(mem_offset, &frame.return_data[start..end]);
    Ok(())
}

pub(crate) fn coinbase(frame: &mut Frame<'_>) -> EvmResult<()> {
    let coinbase = frame.host.environment().block.coinbase.to_word();
    frame.push(coinbase)
}

pub(crate) fn timestamp(frame: &mut Frame<'_>) -> EvmResult<()> {
    let timestamp = frame.host.environment().block.timestamp;
    frame.push(U256::from(timestamp))
}

pub(crate) fn number(frame: &mut Frame<'_>) -> EvmResult<()> {
    let number = frame.host.environment().block.number;
    frame.push(U256::from(number))
}

pub(crate) fn difficulty(frame: &mut Frame<'_>) -> EvmResult<()> {
    let difficulty = frame.host.environment().block.difficulty;
    frame.push(difficulty)
}

pub(crate) fn gaslimit(frame: &mut Frame<'_>) -> EvmResult<()> {
    let gas_limit = frame.host.environment().block.gas_limit;
    frame.push(U256::from(gas_limit))
}

pub(crate) fn chainid(frame: &mut Frame<'_>) -> EvmResult<()> {
    let chain_id = frame.host.environment().block.chain_id;
    frame.push(U256::from(chain_id))
}

pub(crate) fn basefee(frame: &mut Frame<'_>) -> EvmResult<()> {
    let base_fee = frame.host.environment().block.base_fee;
    frame.push(base_fee)
}
