//! Control flow: STOP, JUMP, JUMPI, PC, GAS, JUMPDEST, RETURN and REVERT

use crate::error::{EvmError, EvmResult};
use crate::frame::{Frame, Status};
use crate::word;
use bytes::Bytes;
use primitive_types::U256;

pub(crate) fn stop(frame: &mut Frame<'_>) -> EvmResult<()> {
    frame.halt(Status::Stopped);
    Ok(())
}

fn jump_to(frame: &mut Frame<'_>, dest: U256) -> EvmResult<()> {
    let dest = word::to_usize(&dest).ok_or(EvmError::InvalidJump)?;
    if !frame.code.is_valid_jump(dest) {
        return Err(EvmError::InvalidJump);
    }
    frame.jump_to(dest);
    Ok(())
}

pub(crate) fn jump(frame: &mut Frame<'_>) -> EvmResult<()> {
    let dest = frame.pop()?;
    jump_to(frame, dest)
}

pub(crate) fn jumpi(frame: &mut Frame<'_>) -> EvmResult<()> {
    let dest = frame.pop()?;
    let condition = frame.pop()?;
    if condition.is_zero() {
        return Ok(());
    }
    jump_to(frame, dest)
}

pub(crate) fn pc(frame: &mut Frame<'_>) -> EvmResult<()> {
    let pc = frame.pc;
    frame.push(U256::from(pc))
}

pub(crate) fn gas(frame: &mut Frame<'_>) -> EvmResult<()> {
    let gas = frame.gas;
    frame.push(U256::from(gas))
}

pub(crate) fn jumpdest(_frame: &mut Frame<'_>) -> EvmResult<()> {
    Ok(())
}

/// Copy the output range out of memory
fn take_output(frame: &mut Frame<'_>) -> EvmResult<Bytes> {
    let offset = frame.pop()?;
    let size = frame.pop()?;
    let (offset, size) = frame.expand_memory(offset, size)?;
    Ok(Bytes::copy_from_slice(frame.memory.slice(offset, size)))
}

pub(crate) fn ret(frame: &mut Frame<'_>) -> EvmResult<()> {
    frame.output = take_output(frame)?;
    frame.halt(Status::Stopped);
    Ok(())
}

pub(crate) fn revert(frame: &mut Frame<'_>) -> EvmResult<()> {
    frame.output = take_output(frame)?;
    frame.halt(Status::Reverted);
    Ok(())
}
