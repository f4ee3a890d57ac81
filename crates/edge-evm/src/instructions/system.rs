//! Create and call families
//!
//! Both families hand a derived [`CallContext`] to [`Host::callx`] and
//! translate the nested outcome into a stack value. A failing nested frame
//! is never fatal for the caller: it pushes zero and takes back whatever gas
//! the nested frame left over.
//!
//! [`Host::callx`]: crate::host::Host::callx

use crate::context::{CallContext, CallKind};
use crate::error::{EvmError, EvmResult};
use crate::frame::Frame;
use crate::gas::{self, cost};
use crate::word;
use bytes::Bytes;
use edge_crypto::{create2_address, create_address};
use edge_primitives::{Address, H256};
use primitive_types::U256;
use tracing::debug;

pub(crate) fn create(frame: &mut Frame<'_>) -> EvmResult<()> {
    create_inner(frame, CallKind::Create)
}

pub(crate) fn create2(frame: &mut Frame<'_>) -> EvmResult<()> {
    create_inner(frame, CallKind::Create2)
}

fn create_inner(frame: &mut Frame<'_>, kind: CallKind) -> EvmResult<()> {
    frame.require_non_static()?;
    frame.return_data = Bytes::new();

    let value = frame.pop()?;
    let offset = frame.pop()?;
    let length = frame.pop()?;
    let salt = if kind == CallKind::Create2 {
        H256::from_word(frame.pop()?)
    } else {
        H256::ZERO
    };

    let (offset, length) = frame.expand_memory(offset, length)?;
    if kind == CallKind::Create2 {
        frame.use_gas(gas::sha3_gas(length as u64))?;
    }

    let creator = frame.context.address;
    if !value.is_zero() && frame.host.balance(&creator) < value {
        return frame.push(U256::zero());
    }

    let forwarded = if frame.forks.eip150 || kind == CallKind::Create2 {
        gas::all_but_one_64th(frame.gas)
    } else {
        frame.gas
    };
    frame.use_gas(forwarded)?;

    if frame.context.depth >= cost::MAX_CALL_DEPTH {
        frame.return_gas(forwarded);
        return frame.push(U256::zero());
    }

    let init_code = Bytes::copy_from_slice(frame.memory.slice(offset, length));
    let address = match kind {
        CallKind::Create2 => create2_address(&creator, &salt, &init_code),
        _ => create_address(&creator, frame.host.nonce(&creator)),
    };
    frame.host.increment_nonce(&creator);

    let context = CallContext {
        kind,
        address,
        code_address: address,
        caller: creator,
        value,
        input: init_code,
        gas: forwarded,
        is_static: false,
        depth: frame.context.depth + 1,
        salt,
    };
    let result = frame.host.callx(context);

    let deployed = match &result.error {
        None => true,
        Some(EvmError::CodeStoreOutOfGas) => kind == CallKind::Create && !frame.forks.homestead,
        Some(_) => false,
    };
    if let Some(err) = &result.error {
        debug!(%address, error = %err, gas_left = result.gas_left, "create failed");
    }

    frame.push(if deployed { address.to_word() } else { U256::zero() })?;
    frame.return_gas(result.gas_left);
    if result.reverted() {
        frame.return_data = result.output;
    }
    Ok(())
}

pub(crate) fn call(frame: &mut Frame<'_>) -> EvmResult<()> {
    call_inner(frame, CallKind::Call)
}

pub(crate) fn callcode(frame: &mut Frame<'_>) -> EvmResult<()> {
    call_inner(frame, CallKind::CallCode)
}

pub(crate) fn delegatecall(frame: &mut Frame<'_>) -> EvmResult<()> {
    call_inner(frame, CallKind::DelegateCall)
}

pub(crate) fn staticcall(frame: &mut Frame<'_>) -> EvmResult<()> {
    call_inner(frame, CallKind::StaticCall)
}

fn call_inner(frame: &mut Frame<'_>, kind: CallKind) -> EvmResult<()> {
    frame.return_data = Bytes::new();

    let requested = frame.pop()?;
    let target = Address::from_word(frame.pop()?);
    let value = match kind {
        CallKind::Call | CallKind::CallCode => frame.pop()?,
        _ => U256::zero(),
    };
    let in_offset = frame.pop()?;
    let in_size = frame.pop()?;
    let ret_offset = frame.pop()?;
    let ret_size = frame.pop()?;

    let transfers_value = !value.is_zero();
    if kind == CallKind::Call && transfers_value {
        frame.require_non_static()?;
    }

    let (in_offset, in_size) = frame.expand_memory(in_offset, in_size)?;
    let (ret_offset, ret_size) = frame.expand_memory(ret_offset, ret_size)?;
    let input = Bytes::copy_from_slice(frame.memory.slice(in_offset, in_size));

    let mut surcharge = 0;
    if kind == CallKind::Call {
        let new_account = if frame.forks.eip158 {
            transfers_value && frame.host.empty(&target)
        } else {
            !frame.host.account_exists(&target)
        };
        if new_account {
            surcharge += cost::CALL_NEW_ACCOUNT;
        }
    }
    if transfers_value {
        surcharge += cost::CALL_VALUE;
    }

    let mut forwarded = if frame.forks.eip150 {
        let available = frame.gas.checked_sub(surcharge).ok_or(EvmError::OutOfGas)?;
        let cap = gas::all_but_one_64th(available);
        word::to_u64(&requested).map_or(cap, |requested| requested.min(cap))
    } else {
        word::to_u64(&requested).ok_or(EvmError::OutOfGas)?
    };
    let total = surcharge.checked_add(forwarded).ok_or(EvmError::OutOfGas)?;
    frame.use_gas(total)?;
    if transfers_value {
        forwarded += cost::CALL_STIPEND;
    }

    let parent = &frame.context;
    let context = CallContext {
        kind,
        address: match kind {
            CallKind::CallCode | CallKind::DelegateCall => parent.address,
            _ => target,
        },
        code_address: target,
        caller: match kind {
            CallKind::DelegateCall => parent.caller,
            _ => parent.address,
        },
        value: match kind {
            CallKind::DelegateCall => parent.value,
            _ => value,
        },
        input,
        gas: forwarded,
        is_static: kind == CallKind::StaticCall || parent.is_static,
        depth: parent.depth + 1,
        salt: H256::ZERO,
    };

    let insufficient_balance =
        transfers_value && frame.host.balance(&frame.context.address) < value;
    if insufficient_balance || frame.context.depth >= cost::MAX_CALL_DEPTH {
        debug!(%target, depth = frame.context.depth, "call rejected");
        frame.return_gas(forwarded);
        return frame.push(U256::zero());
    }

    let result = frame.host.callx(context);
    if let Some(err) = &result.error {
        debug!(%target, error = %err, gas_left = result.gas_left, "call failed");
    }

    frame.push_bool(result.succeeded())?;
    if result.succeeded() || result.reverted() {
        let size = ret_size.min(result.output.len());
        frame.memory.store_slice(ret_offset, &result.output[..size]);
    }
    frame.return_gas(result.gas_left);
    frame.return_data = result.output;
    Ok(())
}
