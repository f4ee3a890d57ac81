//! Stop and arithmetic operations (0x01-0x0B)

use crate::error::EvmResult;
use crate::frame::Frame;
use crate::gas;
use crate::word;
use primitive_types::U256;

/// Pop `a` (top) and `b`, push `op(a, b)`
#[inline]
pub(crate) fn binary(frame: &mut Frame<'_>, op: fn(U256, U256) -> U256) -> EvmResult<()> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    frame.push(op(a, b))
}

/// Pop `a` (top), `b` and `n`, push `op(a, b, n)`
#[inline]
fn ternary(frame: &mut Frame<'_>, op: fn(U256, U256, U256) -> U256) -> EvmResult<()> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    let n = frame.pop()?;
    frame.push(op(a, b, n))
}

pub(crate) fn add(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::add)
}

pub(crate) fn mul(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::mul)
}

pub(crate) fn sub(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::sub)
}

pub(crate) fn div(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::div)
}

pub(crate) fn sdiv(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::sdiv)
}

pub(crate) fn rem(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::rem)
}

pub(crate) fn smod(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::smod)
}

pub(crate) fn addmod(frame: &mut Frame<'_>) -> EvmResult<()> {
    ternary(frame, word::addmod)
}

pub(crate) fn mulmod(frame: &mut Frame<'_>) -> EvmResult<()> {
    ternary(frame, word::mulmod)
}

/// EXP, charging per significant byte of the exponent
pub(crate) fn exp(frame: &mut Frame<'_>) -> EvmResult<()> {
    let base = frame.pop()?;
    let exponent = frame.pop()?;
    frame.use_gas(gas::exp_gas(word::byte_len(&exponent), &frame.forks))?;
    frame.push(word::exp(base, exponent))
}

pub(crate) fn signextend(frame: &mut Frame<'_>) -> EvmResult<()> {
    binary(frame, word::signextend)
}
