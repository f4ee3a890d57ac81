//! Jump destination analysis

use crate::opcode::{push_size, Opcode};
use bitvec::{bitvec, order::Lsb0, vec::BitVec};
use bytes::Bytes;
use std::sync::Arc;

/// Bitmap of valid `JUMPDEST` positions, one bit per code byte.
///
/// Cheap to clone; the bitmap is shared behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JumpTable(Arc<BitVec<u8>>);

impl JumpTable {
    /// Scan `code` once, skipping push immediates, marking every remaining
    /// `JUMPDEST` byte
    pub fn analyze(code: &[u8]) -> Self {
        let mut jumps: BitVec<u8> = bitvec![u8, Lsb0; 0; code.len()];

        let mut i = 0;
        while i < code.len() {
            let byte = code[i];
            if byte == Opcode::JUMPDEST.byte() {
                jumps.set(i, true);
            }
            i += 1 + push_size(byte);
        }

        JumpTable(Arc::new(jumps))
    }

    /// Whether `pc` is a valid jump target
    pub fn is_valid(&self, pc: usize) -> bool {
        self.0.get(pc).is_some_and(|bit| *bit)
    }

    /// Number of code bytes covered
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table covers no code
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable bytecode paired with its jump table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Code {
    bytes: Bytes,
    jump_table: JumpTable,
}

impl Code {
    /// Analyze `bytes` and wrap them
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let jump_table = JumpTable::analyze(&bytes);
        Self { bytes, jump_table }
    }

    /// Raw bytecode
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Raw bytecode as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte at `pc`, or `None` past the end
    pub fn get(&self, pc: usize) -> Option<u8> {
        self.bytes.get(pc).copied()
    }

    /// Code length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the code is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether `pc` is a valid jump target
    pub fn is_valid_jump(&self, pc: usize) -> bool {
        self.jump_table.is_valid(pc)
    }

    /// The jump table
    pub fn jump_table(&self) -> &JumpTable {
        &self.jump_table
    }
}
