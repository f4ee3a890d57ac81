//! EVM bytecode interpreter
//!
//! Instructions are dispatched through a 256-entry table indexed by the
//! opcode byte. Each entry carries the handler together with the stack
//! items it pops and pushes, so bounds are checked once, up front, for
//! every instruction.

use crate::analysis::Code;
use crate::context::CallContext;
use crate::error::{EvmError, EvmResult, ExecutionResult};
use crate::forks::ForksInTime;
use crate::frame::{Frame, Status};
use crate::gas;
use crate::host::Host;
use crate::instructions::{arithmetic, bitwise, control, environment, host, memory, stack, system};
use crate::opcode::Opcode;
use tracing::{debug, trace};

/// Instruction handler
pub type Handler = fn(&mut Frame<'_>) -> EvmResult<()>;

/// Dispatch table entry
#[derive(Clone, Copy)]
pub struct Instruction {
    /// Handler
    pub handler: Handler,
    /// Stack items consumed
    pub pops: usize,
    /// Stack items produced
    pub pushes: usize,
}

impl Instruction {
    const fn new(handler: Handler, pops: usize, pushes: usize) -> Option<Self> {
        Some(Self {
            handler,
            pops,
            pushes,
        })
    }
}

/// Instruction table indexed by opcode byte; `None` marks an undefined opcode
pub static INSTRUCTIONS: [Option<Instruction>; 256] = build_table();

const fn build_table() -> [Option<Instruction>; 256] {
    let mut table: [Option<Instruction>; 256] = [None; 256];

    table[0x00] = Instruction::new(control::stop, 0, 0);
    table[0x01] = Instruction::new(arithmetic::add, 2, 1);
    table[0x02] = Instruction::new(arithmetic::mul, 2, 1);
    table[0x03] = Instruction::new(arithmetic::sub, 2, 1);
    table[0x04] = Instruction::new(arithmetic::div, 2, 1);
    table[0x05] = Instruction::new(arithmetic::sdiv, 2, 1);
    table[0x06] = Instruction::new(arithmetic::rem, 2, 1);
    table[0x07] = Instruction::new(arithmetic::smod, 2, 1);
    table[0x08] = Instruction::new(arithmetic::addmod, 3, 1);
    table[0x09] = Instruction::new(arithmetic::mulmod, 3, 1);
    table[0x0A] = Instruction::new(arithmetic::exp, 2, 1);
    table[0x0B] = Instruction::new(arithmetic::signextend, 2, 1);

    table[0x10] = Instruction::new(bitwise::lt, 2, 1);
    table[0x11] = Instruction::new(bitwise::gt, 2, 1);
    table[0x12] = Instruction::new(bitwise::slt, 2, 1);
    table[0x13] = Instruction::new(bitwise::sgt, 2, 1);
    table[0x14] = Instruction::new(bitwise::eq, 2, 1);
    table[0x15] = Instruction::new(bitwise::iszero, 1, 1);
    table[0x16] = Instruction::new(bitwise::and, 2, 1);
    table[0x17] = Instruction::new(bitwise::or, 2, 1);
    table[0x18] = Instruction::new(bitwise::xor, 2, 1);
    table[0x19] = Instruction::new(bitwise::not, 1, 1);
    table[0x1A] = Instruction::new(bitwise::byte, 2, 1);
    table[0x1B] = Instruction::new(bitwise::shl, 2, 1);
    table[0x1C] = Instruction::new(bitwise::shr, 2, 1);
    table[0x1D] = Instruction::new(bitwise::sar, 2, 1);

    table[0x20] = Instruction::new(memory::sha3, 2, 1);

    table[0x30] = Instruction::new(environment::address, 0, 1);
    table[0x31] = Instruction::new(host::balance, 1, 1);
    table[0x32] = Instruction::new(environment::origin, 0, 1);
    table[0x33] = Instruction::new(environment::caller, 0, 1);
    table[0x34] = Instruction::new(environment::callvalue, 0, 1);
    table[0x35] = Instruction::new(environment::calldataload, 1, 1);
    table[0x36] = Instruction::new(environment::calldatasize, 0, 1);
    table[0x37] = Instruction::new(environment::calldatacopy, 3, 0);
    table[0x38] = Instruction::new(environment::codesize, 0, 1);
    table[0x39] = Instruction::new(environment::codecopy, 3, 0);
    table[0x3A] = Instruction::new(environment::gasprice, 0, 1);
    table[0x3B] = Instruction::new(host::extcodesize, 1, 1);
    table[0x3C] = Instruction::new(host::extcodecopy, 4, 0);
    table[0x3D] = Instruction::new(environment::returndatasize, 0, 1);
    table[0x3E] = Instruction::new(environment::returndatacopy, 3, 0);
    table[0x3F] = Instruction::new(host::extcodehash, 1, 1);

    table[0x40] = Instruction::new(host::blockhash, 1, 1);
    table[0x41] = Instruction::new(environment::coinbase, 0, 1);
    table[0x42] = Instruction::new(environment::timestamp, 0, 1);
    table[0x43] = Instruction::new(environment::number, 0, 1);
    table[0x44] = Instruction::new(environment::difficulty, 0, 1);
    table[0x45] = Instruction::new(environment::gaslimit, 0, 1);
    table[0x46] = Instruction::new(environment::chainid, 0, 1);
    table[0x47] = Instruction::new(host::selfbalance, 0, 1);
    table[0x48] = Instruction::new(environment::basefee, 0, 1);

    table[0x50] = Instruction::new(stack::pop, 1, 0);
    table[0x51] = Instruction::new(memory::mload, 1, 1);
    table[0x52] = Instruction::new(memory::mstore, 2, 0);
    table[0x53] = Instruction::new(memory::mstore8, 2, 0);
    table[0x54] = Instruction::new(host::sload, 1, 1);
    table[0x55] = Instruction::new(host::sstore, 2, 0);
    table[0x56] = Instruction::new(control::jump, 1, 0);
    table[0x57] = Instruction::new(control::jumpi, 2, 0);
    table[0x58] = Instruction::new(control::pc, 0, 1);
    table[0x59] = Instruction::new(memory::msize, 0, 1);
    table[0x5A] = Instruction::new(control::gas, 0, 1);
    table[0x5B] = Instruction::new(control::jumpdest, 0, 0);

    let mut i = 0;
    while i < 32 {
        table[0x60 + i] = Instruction::new(stack::push, 0, 1);
        i += 1;
    }

    let mut i = 0;
    while i < 16 {
        table[0x80 + i] = Instruction::new(stack::dup, i + 1, i + 2);
        table[0x90 + i] = Instruction::new(stack::swap, i + 2, i + 2);
        i += 1;
    }

    let mut i = 0;
    while i < 5 {
        table[0xA0 + i] = Instruction::new(host::log, i + 2, 0);
        i += 1;
    }

    table[0xF0] = Instruction::new(system::create, 3, 1);
    table[0xF1] = Instruction::new(system::call, 7, 1);
    table[0xF2] = Instruction::new(system::callcode, 7, 1);
    table[0xF3] = Instruction::new(control::ret, 2, 0);
    table[0xF4] = Instruction::new(system::delegatecall, 6, 1);
    table[0xF5] = Instruction::new(system::create2, 4, 1);
    table[0xFA] = Instruction::new(system::staticcall, 6, 1);
    table[0xFD] = Instruction::new(control::revert, 2, 0);
    table[0xFF] = Instruction::new(host::selfdestruct, 1, 0);

    table
}

impl Frame<'_> {
    /// Execute until the frame halts and report the outcome.
    ///
    /// Running a halted frame changes nothing and reports the same result.
    pub fn run(&mut self) -> ExecutionResult {
        while self.status.is_running() {
            if let Err(err) = self.step() {
                debug!(pc = self.pc, error = %err, "frame failed");
                self.halt(Status::Errored(err));
            }
        }
        trace!(status = ?self.status, gas_left = self.gas, "frame halted");
        self.result()
    }

    /// Execute one instruction
    fn step(&mut self) -> EvmResult<()> {
        let Some(byte) = self.code.get(self.pc) else {
            self.halt(Status::Stopped);
            return Ok(());
        };

        let (opcode, instruction) = match (Opcode::from_byte(byte), INSTRUCTIONS[byte as usize]) {
            (Some(opcode), Some(instruction)) if opcode.is_enabled(&self.forks) => {
                (opcode, instruction)
            }
            _ => return Err(EvmError::OpcodeNotFound(byte)),
        };

        trace!(pc = self.pc, op = %opcode, gas = self.gas, stack = self.stack.len(), "step");

        self.use_gas(gas::static_gas(opcode, &self.forks))?;
        self.stack.require(instruction.pops, instruction.pushes)?;

        self.jumped = false;
        (instruction.handler)(self)?;

        if self.status.is_running() && !self.jumped {
            self.pc += 1;
        }
        Ok(())
    }
}

/// Run `code` in a fresh frame and return its outcome
pub fn execute(
    code: Code,
    context: CallContext,
    forks: ForksInTime,
    host: &mut dyn Host,
) -> ExecutionResult {
    debug!(
        address = %context.address,
        depth = context.depth,
        gas = context.gas,
        code_len = code.len(),
        "execute"
    );
    let mut frame = Frame::new(code, context, forks, host);
    frame.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DummyHost;
    use primitive_types::U256;

    fn context(gas: u64) -> CallContext {
        CallContext {
            gas,
            ..Default::default()
        }
    }

    fn run_code(code: &[u8], gas: u64) -> ExecutionResult {
        let mut host = DummyHost::default();
        execute(Code::new(code.to_vec()), context(gas), ForksInTime::all_enabled(), &mut host)
    }

    /// Run and return the final stack, bottom first
    fn run_stack(code: &[u8], gas: u64) -> (ExecutionResult, Vec<U256>) {
        let mut host = DummyHost::default();
        let mut frame = Frame::new(
            Code::new(code.to_vec()),
            context(gas),
            ForksInTime::all_enabled(),
            &mut host,
        );
        let result = frame.run();
        (result, frame.stack().as_slice().to_vec())
    }

    #[test]
    fn test_table_covers_defined_opcodes() {
        for byte in 0..=255u8 {
            assert_eq!(
                Opcode::from_byte(byte).is_some(),
                INSTRUCTIONS[byte as usize].is_some(),
                "table mismatch at {:#04x}",
                byte
            );
        }
    }

    #[test]
    fn test_simple_add() {
        // PUSH1 2, PUSH1 3, ADD, STOP
        let (result, stack) = run_stack(&[0x60, 0x02, 0x60, 0x03, 0x01, 0x00], 1000);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::from(5)]);
        assert_eq!(result.gas_used, 9);
        assert_eq!(result.gas_left, 991);
    }

    #[test]
    fn test_empty_code() {
        let result = run_code(&[], 1000);
        assert!(result.succeeded());
        assert_eq!(result.gas_left, 1000);
    }

    #[test]
    fn test_end_of_code_stops() {
        // PUSH1 1 with no STOP
        let (result, stack) = run_stack(&[0x60, 0x01], 1000);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::one()]);
    }

    #[test]
    fn test_return() {
        // MSTORE 0x42 at 0, RETURN(0, 32)
        let code = [0x60, 0x42, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0xF3];
        let result = run_code(&code, 10000);
        assert!(result.succeeded());
        assert_eq!(result.output.len(), 32);
        assert_eq!(result.output[31], 0x42);
    }

    #[test]
    fn test_revert_keeps_gas() {
        // PUSH1 0, PUSH1 0, REVERT
        let result = run_code(&[0x60, 0x00, 0x60, 0x00, 0xFD], 10000);
        assert!(result.reverted());
        assert_eq!(result.gas_left, 10000 - 6);
    }

    #[test]
    fn test_out_of_gas_forfeits_gas() {
        let result = run_code(&[0x60, 0x01], 1);
        assert_eq!(result.error, Some(EvmError::OutOfGas));
        assert_eq!(result.gas_left, 0);
        assert_eq!(result.gas_used, 1);
    }

    #[test]
    fn test_undefined_opcode() {
        let result = run_code(&[0x0C], 1000);
        assert_eq!(result.error, Some(EvmError::OpcodeNotFound(0x0C)));
        let result = run_code(&[0xFE], 1000);
        assert_eq!(result.error, Some(EvmError::OpcodeNotFound(0xFE)));
    }

    #[test]
    fn test_stack_underflow() {
        let result = run_code(&[0x01], 1000);
        assert_eq!(result.error, Some(EvmError::StackUnderflow));
    }

    #[test]
    fn test_invalid_jump() {
        // PUSH1 10, JUMP (no JUMPDEST at 10)
        let result = run_code(&[0x60, 0x0A, 0x56], 1000);
        assert_eq!(result.error, Some(EvmError::InvalidJump));
    }

    #[test]
    fn test_jump_into_push_data() {
        // PUSH1 3, JUMP, PUSH1 0x5B
        let result = run_code(&[0x60, 0x03, 0x56, 0x60, 0x5B], 1000);
        assert_eq!(result.error, Some(EvmError::InvalidJump));

        // PUSH1 4, JUMP, PUSH1 0x5B  (offset 4 is the immediate)
        let result = run_code(&[0x60, 0x04, 0x56, 0x60, 0x5B], 1000);
        assert_eq!(result.error, Some(EvmError::InvalidJump));
    }

    #[test]
    fn test_jump_to_jumpdest() {
        // PUSH1 4, JUMP, INVALID, JUMPDEST, PUSH1 1, STOP
        let (result, stack) = run_stack(&[0x60, 0x04, 0x56, 0xFE, 0x5B, 0x60, 0x01, 0x00], 1000);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::one()]);
    }

    #[test]
    fn test_jumpi() {
        // PUSH1 0, PUSH1 7, JUMPI, PUSH1 1, STOP, JUMPDEST
        let (result, stack) = run_stack(&[0x60, 0x00, 0x60, 0x07, 0x57, 0x60, 0x01, 0x00], 1000);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::one()]);

        // Taken branch: PUSH1 1, PUSH1 8, JUMPI, PUSH1 1, STOP, JUMPDEST, PUSH1 2
        let code = [0x60, 0x01, 0x60, 0x08, 0x57, 0x60, 0x01, 0x00, 0x5B, 0x60, 0x02];
        let (result, stack) = run_stack(&code, 1000);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::from(2)]);
    }

    #[test]
    fn test_mstore_beyond_memory_expands() {
        // PUSH1 1, PUSH2 0x0400, MSTORE
        let mut host = DummyHost::default();
        let mut frame = Frame::new(
            Code::new(vec![0x60, 0x01, 0x61, 0x04, 0x00, 0x52]),
            context(1000),
            ForksInTime::all_enabled(),
            &mut host,
        );
        let result = frame.run();
        assert!(result.succeeded());
        assert_eq!(frame.memory().len(), 1056);
        // 3 + 3 + 3 static, 101 expansion
        assert_eq!(frame.gas(), 1000 - 110);
    }

    #[test]
    fn test_disabled_opcode_charges_nothing() {
        let forks = ForksInTime {
            constantinople: false,
            petersburg: false,
            istanbul: false,
            london: false,
            ..ForksInTime::all_enabled()
        };
        let mut host = DummyHost::default();
        let mut frame = Frame::new(Code::new(vec![0xF5]), context(1000), forks, &mut host);
        frame.stack = vec![U256::zero(); 4].into();

        let result = frame.run();
        assert_eq!(result.error, Some(EvmError::OpcodeNotFound(0xF5)));
        assert_eq!(frame.gas(), 1000);
        assert_eq!(frame.stack().len(), 4);
        assert!(frame.memory().is_empty());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_run_is_idempotent_after_halt() {
        let mut host = DummyHost::default();
        let mut frame = Frame::new(
            Code::new(vec![0x60, 0x01, 0x00]),
            context(100),
            ForksInTime::all_enabled(),
            &mut host,
        );
        let first = frame.run();
        let pc = frame.pc();
        let second = frame.run();
        assert_eq!(first, second);
        assert_eq!(frame.pc(), pc);
        assert_eq!(frame.stack().len(), 1);
    }

    // ==================== Extended Interpreter Tests ====================

    #[test]
    fn test_push32() {
        let mut code = vec![0x7F];
        code.extend_from_slice(&[0xFF; 32]);
        let (result, stack) = run_stack(&code, 100);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::MAX]);
    }

    #[test]
    fn test_truncated_push_pads_right() {
        // PUSH2 with a single immediate byte
        let (result, stack) = run_stack(&[0x61, 0x01], 100);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::from(0x0100)]);
    }

    #[test]
    fn test_dup_and_swap() {
        // PUSH1 1, PUSH1 2, DUP2, SWAP2
        let (result, stack) = run_stack(&[0x60, 0x01, 0x60, 0x02, 0x81, 0x91], 100);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::from(1), U256::from(2), U256::from(1)]);

        // SWAP1 on a single item
        let result = run_code(&[0x60, 0x01, 0x90], 100);
        assert_eq!(result.error, Some(EvmError::StackUnderflow));
    }

    #[test]
    fn test_stack_overflow() {
        let code: Vec<u8> = std::iter::repeat([0x60, 0x01]).take(1025).flatten().collect();
        let result = run_code(&code, 100_000);
        assert_eq!(result.error, Some(EvmError::StackOverflow));

        let code: Vec<u8> = std::iter::repeat([0x60, 0x01]).take(1024).flatten().collect();
        assert!(run_code(&code, 100_000).succeeded());
    }

    #[test]
    fn test_pc_and_gas() {
        // JUMPDEST, PC, GAS
        let (result, stack) = run_stack(&[0x5B, 0x58, 0x5A], 100);
        assert!(result.succeeded());
        assert_eq!(stack, vec![U256::one(), U256::from(100 - 1 - 2 - 2)]);
    }

    #[test]
    fn test_sha3() {
        // SHA3 of zero bytes
        let (result, stack) = run_stack(&[0x60, 0x00, 0x60, 0x00, 0x20], 100);
        assert!(result.succeeded());
        assert_eq!(stack[0], edge_crypto::KECCAK_EMPTY.to_word());
        assert_eq!(result.gas_used, 36);
    }
}
