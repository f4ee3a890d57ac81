//! Execution frame
//!
//! A [`Frame`] is the mutable state of one invocation: operand stack,
//! memory, program counter and gas, plus the call context and a handle to
//! the [`Host`]. It is created per call, driven by [`Frame::run`] and
//! discarded once its [`ExecutionResult`] has been handed to the invoker.

use crate::analysis::Code;
use crate::context::CallContext;
use crate::error::{EvmError, EvmResult, ExecutionResult};
use crate::forks::ForksInTime;
use crate::gas::{self, cost};
use crate::host::Host;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::word;
use bytes::Bytes;
use primitive_types::U256;
use std::fmt;

/// Halt state of a frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Still executing
    Running,
    /// Halted normally (STOP, RETURN, SELFDESTRUCT or end of code)
    Stopped,
    /// Halted by REVERT
    Reverted,
    /// Halted by a fatal error
    Errored(EvmError),
}

impl Status {
    /// Whether the frame can still execute instructions
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }
}

/// One interpreter invocation
pub struct Frame<'a> {
    pub(crate) stack: Stack,
    pub(crate) memory: Memory,
    pub(crate) code: Code,
    pub(crate) pc: usize,
    pub(crate) gas: u64,
    /// Memory expansion cost paid so far
    pub(crate) last_gas_cost: u64,
    /// Gas charged so far, before sub-call refunds
    pub(crate) consumed_gas: u64,
    pub(crate) context: CallContext,
    pub(crate) forks: ForksInTime,
    pub(crate) host: &'a mut dyn Host,
    pub(crate) return_data: Bytes,
    pub(crate) output: Bytes,
    pub(crate) status: Status,
    /// Set by handlers that move the program counter themselves
    pub(crate) jumped: bool,
}

impl<'a> Frame<'a> {
    /// Create a frame that will run `code` with `context.gas` gas
    pub fn new(
        code: Code,
        context: CallContext,
        forks: ForksInTime,
        host: &'a mut dyn Host,
    ) -> Self {
        Self {
            stack: Stack::new(),
            memory: Memory::new(),
            code,
            pc: 0,
            gas: context.gas,
            last_gas_cost: 0,
            consumed_gas: 0,
            context,
            forks,
            host,
            return_data: Bytes::new(),
            output: Bytes::new(),
            status: Status::Running,
            jumped: false,
        }
    }

    /// Operand stack
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Program counter
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Gas remaining
    pub fn gas(&self) -> u64 {
        self.gas
    }

    /// Gas charged so far, before sub-call refunds
    pub fn consumed_gas(&self) -> u64 {
        self.consumed_gas
    }

    /// Memory expansion cost paid so far
    pub fn last_gas_cost(&self) -> u64 {
        self.last_gas_cost
    }

    /// Call context
    pub fn context(&self) -> &CallContext {
        &self.context
    }

    /// Active fork flags
    pub fn forks(&self) -> &ForksInTime {
        &self.forks
    }

    /// Output of the most recent completed sub-call
    pub fn return_data(&self) -> &Bytes {
        &self.return_data
    }

    /// Data returned to the invoker on halt
    pub fn output(&self) -> &Bytes {
        &self.output
    }

    /// Halt state
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Outcome as reported to the invoker.
    ///
    /// A fatal error forfeits all remaining gas; a revert returns it.
    pub fn result(&self) -> ExecutionResult {
        let limit = self.context.gas;
        match &self.status {
            Status::Running | Status::Stopped => {
                ExecutionResult::success(self.output.clone(), self.gas, limit - self.gas)
            }
            Status::Reverted => {
                ExecutionResult::revert(self.output.clone(), self.gas, limit - self.gas)
            }
            Status::Errored(err) => ExecutionResult::failure(err.clone(), 0, limit),
        }
    }

    /// Raw byte at the program counter
    pub(crate) fn current_byte(&self) -> u8 {
        self.code.get(self.pc).unwrap_or_default()
    }

    /// Halt with `status`
    pub(crate) fn halt(&mut self, status: Status) {
        self.status = status;
    }

    /// Move the program counter; the dispatch loop will not advance it
    pub(crate) fn jump_to(&mut self, pc: usize) {
        self.pc = pc;
        self.jumped = true;
    }

    /// Deduct gas, failing with out-of-gas when not enough remains
    pub(crate) fn use_gas(&mut self, amount: u64) -> EvmResult<()> {
        if self.gas < amount {
            return Err(EvmError::OutOfGas);
        }
        self.gas -= amount;
        self.consumed_gas = self.consumed_gas.saturating_add(amount);
        Ok(())
    }

    /// Hand back gas left over by a sub-call; it no longer counts as consumed
    pub(crate) fn return_gas(&mut self, amount: u64) {
        self.gas = self.gas.saturating_add(amount);
        self.consumed_gas = self.consumed_gas.saturating_sub(amount);
    }

    pub(crate) fn pop(&mut self) -> EvmResult<U256> {
        self.stack.pop()
    }

    pub(crate) fn push(&mut self, value: U256) -> EvmResult<()> {
        self.stack.push(value)
    }

    pub(crate) fn push_bool(&mut self, value: bool) -> EvmResult<()> {
        self.stack.push(word::from_bool(value))
    }

    /// Charge for and perform the memory expansion needed to access
    /// `size` bytes at `offset`, returning both as `usize`.
    ///
    /// A zero `size` touches nothing and yields `(0, 0)`. Offsets or sizes
    /// beyond the addressable range are an out-of-gas condition.
    pub(crate) fn expand_memory(&mut self, offset: U256, size: U256) -> EvmResult<(usize, usize)> {
        if size.is_zero() {
            return Ok((0, 0));
        }
        let offset = word::to_u64(&offset).ok_or(EvmError::OutOfGas)?;
        let size = word::to_u64(&size).ok_or(EvmError::OutOfGas)?;
        if offset > cost::MAX_MEMORY_OFFSET || size > cost::MAX_MEMORY_OFFSET {
            return Err(EvmError::OutOfGas);
        }

        let end = offset + size;
        if (self.memory.len() as u64) < end {
            let words = gas::words(end);
            let new_cost = gas::memory_cost(words);
            self.use_gas(new_cost - self.last_gas_cost)?;
            self.last_gas_cost = new_cost;
            let end = usize::try_from(end).map_err(|_| EvmError::OutOfGas)?;
            self.memory.resize(end);
        }

        let offset = usize::try_from(offset).map_err(|_| EvmError::OutOfGas)?;
        let size = usize::try_from(size).map_err(|_| EvmError::OutOfGas)?;
        Ok((offset, size))
    }

    /// Fail with write protection inside a static context
    pub(crate) fn require_non_static(&self) -> EvmResult<()> {
        if self.context.is_static {
            return Err(EvmError::WriteProtection);
        }
        Ok(())
    }
}

impl fmt::Debug for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("pc", &self.pc)
            .field("gas", &self.gas)
            .field("stack", &self.stack.len())
            .field("memory", &self.memory.len())
            .field("depth", &self.context.depth)
            .field("status", &self.status)
            .finish()
    }
}
