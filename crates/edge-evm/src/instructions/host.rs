//! Instructions that read or write account state through the [`Host`]
//!
//! [`Host`]: crate::host::Host

use crate::error::{EvmError, EvmResult};
use crate::frame::{Frame, Status};
use crate::gas::{self, cost};
use crate::host::{Log, StorageStatus};
use crate::word;
use bytes::Bytes;
use edge_primitives::{Address, H256};
use primitive_types::U256;

pub(crate) fn balance(frame: &mut Frame<'_>) -> EvmResult<()> {
    let address = Address::from_word(frame.pop()?);
    let balance = frame.host.balance(&address);
    frame.push(balance)
}

pub(crate) fn selfbalance(frame: &mut Frame<'_>) -> EvmResult<()> {
    let balance = frame.host.balance(&frame.context.address);
    frame.push(balance)
}

pub(crate) fn extcodesize(frame: &mut Frame<'_>) -> EvmResult<()> {
    let address = Address::from_word(frame.pop()?);
    let size = frame.host.code_size(&address);
    frame.push(U256::from(size))
}

pub(crate) fn extcodecopy(frame: &mut Frame<'_>) -> EvmResult<()> {
    let address = Address::from_word(frame.pop()?);
    let mem_offset = frame.pop()?;
    let code_offset = frame.pop()?;
    let length = frame.pop()?;

    let (mem_offset, length) = frame.expand_memory(mem_offset, length)?;
    frame.use_gas(gas::copy_gas(length as u64))?;
    if length == 0 {
        return Ok(());
    }

    let code = frame.host.code(&address);
    let code_offset = word::saturating_usize(&code_offset);
    frame.memory.copy_padded(mem_offset, &code, code_offset, length);
    Ok(())
}

/// EXTCODEHASH: zero for an empty account
pub(crate) fn extcodehash(frame: &mut Frame<'_>) -> EvmResult<()> {
    let address = Address::from_word(frame.pop()?);
    let hash = if frame.host.empty(&address) {
        U256::zero()
    } else {
        frame.host.code_hash(&address).to_word()
    };
    frame.push(hash)
}

/// BLOCKHASH: only the 256 most recent complete blocks are visible
pub(crate) fn blockhash(frame: &mut Frame<'_>) -> EvmResult<()> {
    let number = frame.pop()?;
    let current = frame.host.environment().block.number;

    let hash = match word::to_u64(&number) {
        Some(n) if n < current && n >= current.saturating_sub(cost::BLOCKHASH_WINDOW) => {
            frame.host.block_hash(n).to_word()
        }
        _ => U256::zero(),
    };
    frame.push(hash)
}

pub(crate) fn sload(frame: &mut Frame<'_>) -> EvmResult<()> {
    let key = frame.pop()?;
    let value = frame.host.storage(&frame.context.address, &key);
    frame.push(value)
}

/// SSTORE, metered either by the legacy set/reset rule or by the
/// net-metering table keyed on the host's [`StorageStatus`]
pub(crate) fn sstore(frame: &mut Frame<'_>) -> EvmResult<()> {
    frame.require_non_static()?;
    if frame.forks.istanbul && frame.gas <= cost::SSTORE_SENTRY {
        return Err(EvmError::OutOfGas);
    }

    let key = frame.pop()?;
    let value = frame.pop()?;
    let address = frame.context.address;

    let gas = if frame.forks.legacy_sstore_metering() {
        let current = frame.host.storage(&address, &key);
        frame.host.set_storage(&address, key, value);
        if current.is_zero() && !value.is_zero() {
            cost::SSTORE_SET
        } else {
            cost::SSTORE_RESET
        }
    } else {
        match frame.host.set_storage(&address, key, value) {
            StorageStatus::Unchanged | StorageStatus::ModifiedAgain => {
                if frame.forks.istanbul {
                    cost::SSTORE_DIRTY_ISTANBUL
                } else {
                    cost::SSTORE_DIRTY
                }
            }
            StorageStatus::Modified | StorageStatus::Deleted => cost::SSTORE_RESET,
            StorageStatus::Added => cost::SSTORE_SET,
        }
    };
    frame.use_gas(gas)
}

/// LOG0-LOG4
pub(crate) fn log(frame: &mut Frame<'_>) -> EvmResult<()> {
    frame.require_non_static()?;
    let topics = (frame.current_byte() - 0xA0) as usize;

    let offset = frame.pop()?;
    let size = frame.pop()?;
    let topics = (0..topics)
        .map(|_| frame.pop().map(H256::from_word))
        .collect::<EvmResult<Vec<_>>>()?;

    let (offset, size) = frame.expand_memory(offset, size)?;
    frame.use_gas(gas::log_data_gas(size as u64))?;

    let log = Log {
        address: frame.context.address,
        topics,
        data: Bytes::copy_from_slice(frame.memory.slice(offset, size)),
    };
    frame.host.emit_log(log);
    Ok(())
}

/// SELFDESTRUCT, with the new-account surcharge from EIP-150 onwards
pub(crate) fn selfdestruct(frame: &mut Frame<'_>) -> EvmResult<()> {
    frame.require_non_static()?;
    let beneficiary = Address::from_word(frame.pop()?);
    let address = frame.context.address;

    if frame.forks.eip150 {
        let new_account = if frame.forks.eip158 {
            frame.host.empty(&beneficiary) && !frame.host.balance(&address).is_zero()
        } else {
            !frame.host.account_exists(&beneficiary)
        };
        if new_account {
            frame.use_gas(cost::SELFDESTRUCT_NEW_ACCOUNT)?;
        }
    }

    frame.host.selfdestruct(&address, &beneficiary);
    frame.halt(Status::Stopped);
    Ok(())
}
