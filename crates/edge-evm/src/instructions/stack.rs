//! POP, PUSH1-PUSH32, DUP1-DUP16 and SWAP1-SWAP16

use crate::error::EvmResult;
use crate::frame::Frame;
use crate::opcode::push_size;
use primitive_types::U256;

pub(crate) fn pop(frame: &mut Frame<'_>) -> EvmResult<()> {
    frame.pop()?;
    Ok(())
}

/// PUSHn: read `n` immediate bytes, zero-padding on the right when the
/// code ends early, and step over them
pub(crate) fn push(frame: &mut Frame<'_>) -> EvmResult<()> {
    let size = push_size(frame.current_byte());
    let start = frame.pc + 1;

    let mut buf = [0u8; 32];
    let code = frame.code.as_slice();
    let available = code.len().saturating_sub(start).min(size);
    if available > 0 {
        buf[32 - size..32 - size + available].copy_from_slice(&code[start..start + available]);
    }

    frame.push(U256::from_big_endian(&buf))?;
    frame.pc += size;
    Ok(())
}

pub(crate) fn dup(frame: &mut Frame<'_>) -> EvmResult<()> {
    let depth = (frame.current_byte() - 0x7F) as usize;
    frame.stack.dup(depth)
}

pub(crate) fn swap(frame: &mut Frame<'_>) -> EvmResult<()> {
    let depth = (frame.current_byte() - 0x8F) as usize;
    frame.stack.swap(depth)
}
