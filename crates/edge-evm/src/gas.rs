//! Gas cost calculations

use crate::forks::ForksInTime;
use crate::opcode::Opcode;

/// Gas costs for EVM operations
pub mod cost {
    /// Zero gas
    pub const ZERO: u64 = 0;
    /// Base gas
    pub const BASE: u64 = 2;
    /// Very low gas
    pub const VERYLOW: u64 = 3;
    /// Low gas
    pub const LOW: u64 = 5;
    /// Mid gas
    pub const MID: u64 = 8;
    /// High gas
    pub const HIGH: u64 = 10;
    /// Ext gas
    pub const EXT: u64 = 20;

    /// Jump dest gas
    pub const JUMPDEST: u64 = 1;
    /// Exp gas
    pub const EXP: u64 = 10;
    /// Exp byte gas (EIP-160)
    pub const EXP_BYTE: u64 = 50;
    /// Exp byte gas before EIP-160
    pub const EXP_BYTE_FRONTIER: u64 = 10;
    /// SHA3 base gas
    pub const SHA3: u64 = 30;
    /// SHA3 word gas
    pub const SHA3_WORD: u64 = 6;
    /// Blockhash gas
    pub const BLOCKHASH: u64 = 20;

    /// Balance gas (EIP-1884)
    pub const BALANCE_ISTANBUL: u64 = 700;
    /// Balance gas (EIP-150)
    pub const BALANCE_EIP150: u64 = 400;
    /// Ext code size/copy gas (EIP-150)
    pub const EXTCODE_EIP150: u64 = 700;
    /// Ext code hash gas (EIP-1884)
    pub const EXTCODEHASH_ISTANBUL: u64 = 700;
    /// Ext code hash gas (EIP-1052)
    pub const EXTCODEHASH: u64 = 400;

    /// Sload gas (EIP-1884)
    pub const SLOAD_ISTANBUL: u64 = 800;
    /// Sload gas (EIP-150)
    pub const SLOAD_EIP150: u64 = 200;
    /// Sload gas (frontier)
    pub const SLOAD_FRONTIER: u64 = 50;
    /// Sstore: zero to non-zero
    pub const SSTORE_SET: u64 = 20000;
    /// Sstore: any other write that changes the slot
    pub const SSTORE_RESET: u64 = 5000;
    /// Sstore no-op or dirty write (EIP-2200)
    pub const SSTORE_DIRTY_ISTANBUL: u64 = 800;
    /// Sstore no-op or dirty write (EIP-1283)
    pub const SSTORE_DIRTY: u64 = 200;
    /// SSTORE fails when no more than the call stipend remains (EIP-2200)
    pub const SSTORE_SENTRY: u64 = 2300;

    /// Log gas
    pub const LOG: u64 = 375;
    /// Log topic gas
    pub const LOG_TOPIC: u64 = 375;
    /// Log data gas (per byte)
    pub const LOG_DATA: u64 = 8;

    /// Create gas
    pub const CREATE: u64 = 32000;
    /// Create2 gas
    pub const CREATE2: u64 = 32000;
    /// Call gas (EIP-150)
    pub const CALL_EIP150: u64 = 700;
    /// Call gas (frontier)
    pub const CALL_FRONTIER: u64 = 40;
    /// Call value transfer gas
    pub const CALL_VALUE: u64 = 9000;
    /// Call new account gas
    pub const CALL_NEW_ACCOUNT: u64 = 25000;
    /// Call stipend
    pub const CALL_STIPEND: u64 = 2300;

    /// Memory gas per word
    pub const MEMORY: u64 = 3;
    /// Copy gas per word
    pub const COPY: u64 = 3;
    /// Code deposit gas per byte
    pub const CODE_DEPOSIT: u64 = 200;

    /// Selfdestruct gas (EIP-150)
    pub const SELFDESTRUCT: u64 = 5000;
    /// Selfdestruct new account gas
    pub const SELFDESTRUCT_NEW_ACCOUNT: u64 = 25000;

    /// Max call depth
    pub const MAX_CALL_DEPTH: usize = 1024;
    /// Max stack size
    pub const MAX_STACK_SIZE: usize = 1024;
    /// Max code size (EIP-170)
    pub const MAX_CODE_SIZE: usize = 24576;
    /// Largest memory offset or length accepted before the access counts as out of gas
    pub const MAX_MEMORY_OFFSET: u64 = 0xff_ffff_ffe0;
    /// Number of recent blocks BLOCKHASH can see
    pub const BLOCKHASH_WINDOW: u64 = 256;
}

/// Get static gas cost for an opcode under the given forks
pub fn static_gas(opcode: Opcode, forks: &ForksInTime) -> u64 {
    match opcode {
        // Zero cost
        Opcode::STOP | Opcode::RETURN | Opcode::REVERT | Opcode::SSTORE => cost::ZERO,

        // Base cost (2)
        Opcode::ADDRESS | Opcode::ORIGIN | Opcode::CALLER | Opcode::CALLVALUE |
        Opcode::CALLDATASIZE | Opcode::CODESIZE | Opcode::GASPRICE |
        Opcode::COINBASE | Opcode::TIMESTAMP | Opcode::NUMBER |
        Opcode::DIFFICULTY | Opcode::GASLIMIT | Opcode::CHAINID |
        Opcode::RETURNDATASIZE | Opcode::POP | Opcode::PC |
        Opcode::MSIZE | Opcode::GAS | Opcode::BASEFEE => cost::BASE,

        // Very low cost (3)
        Opcode::ADD | Opcode::SUB | Opcode::NOT | Opcode::LT | Opcode::GT |
        Opcode::SLT | Opcode::SGT | Opcode::EQ | Opcode::ISZERO |
        Opcode::AND | Opcode::OR | Opcode::XOR | Opcode::BYTE |
        Opcode::SHL | Opcode::SHR | Opcode::SAR |
        Opcode::CALLDATALOAD | Opcode::MLOAD | Opcode::MSTORE | Opcode::MSTORE8 |
        Opcode::CALLDATACOPY | Opcode::CODECOPY | Opcode::RETURNDATACOPY => cost::VERYLOW,
        op if op.is_push() || op.dup_depth() > 0 || op.swap_depth() > 0 => cost::VERYLOW,

        // Low cost (5)
        Opcode::MUL | Opcode::DIV | Opcode::SDIV | Opcode::MOD |
        Opcode::SMOD | Opcode::SIGNEXTEND | Opcode::SELFBALANCE => cost::LOW,

        // Mid cost (8)
        Opcode::ADDMOD | Opcode::MULMOD | Opcode::JUMP => cost::MID,

        // High cost (10)
        Opcode::JUMPI => cost::HIGH,

        // Jump destination
        Opcode::JUMPDEST => cost::JUMPDEST,

        Opcode::EXP => cost::EXP,
        Opcode::SHA3 => cost::SHA3,
        Opcode::BLOCKHASH => cost::BLOCKHASH,

        // Repriced by EIP-150 and EIP-1884
        Opcode::BALANCE => {
            if forks.istanbul {
                cost::BALANCE_ISTANBUL
            } else if forks.eip150 {
                cost::BALANCE_EIP150
            } else {
                cost::EXT
            }
        }
        Opcode::EXTCODESIZE | Opcode::EXTCODECOPY => {
            if forks.eip150 {
                cost::EXTCODE_EIP150
            } else {
                cost::EXT
            }
        }
        Opcode::EXTCODEHASH => {
            if forks.istanbul {
                cost::EXTCODEHASH_ISTANBUL
            } else {
                cost::EXTCODEHASH
            }
        }
        Opcode::SLOAD => {
            if forks.istanbul {
                cost::SLOAD_ISTANBUL
            } else if forks.eip150 {
                cost::SLOAD_EIP150
            } else {
                cost::SLOAD_FRONTIER
            }
        }
        Opcode::CALL | Opcode::CALLCODE | Opcode::DELEGATECALL | Opcode::STATICCALL => {
            if forks.eip150 {
                cost::CALL_EIP150
            } else {
                cost::CALL_FRONTIER
            }
        }
        Opcode::SELFDESTRUCT => {
            if forks.eip150 {
                cost::SELFDESTRUCT
            } else {
                cost::ZERO
            }
        }

        Opcode::LOG0 | Opcode::LOG1 | Opcode::LOG2 | Opcode::LOG3 | Opcode::LOG4 => {
            cost::LOG + cost::LOG_TOPIC * opcode.log_topics() as u64
        }
        Opcode::CREATE => cost::CREATE,
        Opcode::CREATE2 => cost::CREATE2,

        _ => cost::ZERO,
    }
}

/// Cumulative cost of a memory of `words` words: `3w + w²/512`
pub fn memory_cost(words: u64) -> u64 {
    cost::MEMORY
        .saturating_mul(words)
        .saturating_add(words.saturating_mul(words) / 512)
}

/// Number of 32-byte words needed for `length` bytes
pub fn words(length: u64) -> u64 {
    length.div_ceil(32)
}

/// Calculate copy cost (for CALLDATACOPY, CODECOPY, etc.)
pub fn copy_gas(length: u64) -> u64 {
    cost::COPY.saturating_mul(words(length))
}

/// Dynamic part of EXP: a fixed amount per significant exponent byte
pub fn exp_gas(exponent_bytes: u64, forks: &ForksInTime) -> u64 {
    let per_byte = if forks.eip158 {
        cost::EXP_BYTE
    } else {
        cost::EXP_BYTE_FRONTIER
    };
    per_byte * exponent_bytes
}

/// Dynamic part of SHA3 (and CREATE2 init code hashing)
pub fn sha3_gas(length: u64) -> u64 {
    cost::SHA3_WORD.saturating_mul(words(length))
}

/// Dynamic part of LOG: per data byte
pub fn log_data_gas(data_size: u64) -> u64 {
    cost::LOG_DATA.saturating_mul(data_size)
}

/// Gas available to a sub-call after keeping back 1/64 (EIP-150)
pub fn all_but_one_64th(gas: u64) -> u64 {
    gas - gas / 64
}
