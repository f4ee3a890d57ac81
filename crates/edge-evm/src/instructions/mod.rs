//! Instruction handlers
//!
//! Each handler runs after the dispatch loop has charged the static gas and
//! checked stack bounds. Handlers charge their own dynamic gas (memory
//! expansion, copy costs, per-byte surcharges) before touching state.

pub mod arithmetic;
pub mod bitwise;
pub mod control;
pub mod environment;
pub mod host;
pub mod memory;
pub mod stack;
pub mod system;
