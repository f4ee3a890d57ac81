//! # edge-evm
//!
//! EVM execution engine for Edge.
//!
//! This crate provides:
//! - 256-bit word arithmetic, the operand stack and word-granular memory
//! - The gas schedule, parameterised by [`ForksInTime`]
//! - Jump destination analysis
//! - The execution [`Frame`] and its table-driven dispatch loop
//! - The [`Host`] trait through which frames reach account state and
//!   trigger nested calls
//!
//! ```ignore
//! let code = Code::new(bytecode);
//! let mut frame = Frame::new(code, context, ForksInTime::all_enabled(), &mut host);
//! let result = frame.run();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod context;
pub mod error;
pub mod forks;
pub mod frame;
pub mod gas;
pub mod host;
pub mod instructions;
pub mod interpreter;
pub mod memory;
pub mod opcode;
pub mod stack;
pub mod word;

pub use analysis::{Code, JumpTable};
pub use context::{BlockContext, CallContext, CallKind, Environment, TxContext};
pub use error::{EvmError, EvmResult, ExecutionResult};
pub use forks::{Forks, ForksInTime};
pub use frame::{Frame, Status};
pub use host::{Host, Log, StorageStatus};
pub use interpreter::execute;
pub use memory::Memory;
pub use opcode::Opcode;
pub use stack::Stack;

pub use edge_primitives::{Address, H256, U256};
