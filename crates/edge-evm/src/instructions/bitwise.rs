//! Comparison and bitwise logic operations (0x10-0x1D)

use super::arithmetic::binary;
use crate::error::EvmResult;
use crate::frame::Frame;
use crate::word;

pub(crate) fn lt(frame: &mut Frame<'_>) -> EvmResult<()> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    frame.push_bool(a < b)
}

pub(crate) fn gt(frame: &mut Frame<'_>) -> EvmResult<()> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    frame.push_bool(a > b)
}

pub(crate) fn slt(frame: &mut Frame<'_>) -> EvmResult<()> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    frame.push_bool(word::slt(&a, &b))
}

pub(crate) fn sgt(frame: &mut Frame<'_>) -> EvmResult<()> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    frame.push_bool(word::sgt(&a, &b))
}

pub(crate) fn eq(frame: &mut Frame<'_>) -> EvmResult<()> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    frame.push_bool(a == b)
}

pub(crate) fn iszero(frame: &mut Frame<'_>) -> EvmResult<()> {
    let a = frame.pop()?;
    frame.push_bool(a.is_zero())
}

pub(crate) fn and(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, |a, b| a & b)
}

pub(crate) fn or(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, |a, b| a | b)
}

pub(crate) fn xor(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, |a, b| a ^ b)
}

pub(crate) fn not(frame: &mut Frame<'_>) -> EvmResult<()> {
    let a = frame.pop()?;
    frame.push(!a)
}

pub(crate) fn byte(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::byte)
}

pub(crate) fn shl(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::shl)
}

pub(crate) fn shr(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::shr)
}

pub(crate) fn sar(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::sar)
}
