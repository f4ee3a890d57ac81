//! # edge-evm-tests
//!
//! Reference host and fixture runner for the Edge EVM.
//!
//! This crate provides:
//! - [`InMemoryHost`], a [`Host`](edge_evm::Host) over in-memory accounts
//!   that executes nested calls and creates, with snapshot rollback
//! - JSON parsing for VM fixtures (pre-state, code, call context, fork
//!   schedule and expected post-state)
//! - A VM fixture runner and result aggregation
//!
//! ## Fixture format
//!
//! A fixture file maps test names to cases. Each case runs its `exec.code`
//! at `exec.address` against the `pre` accounts. A case with `gas` and
//! `post` expects success with exactly that much gas remaining and the
//! given post-state; a case with neither expects the frame to fail.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod host;
mod runner;
mod types;

pub use error::{TestError, TestResult};
pub use host::{Account, InMemoryHost};
pub use runner::{TestRunner, TestStats};
pub use types::*;
pub use vm_test::{logs_hash, VmTestResults, VmTestRunner};
