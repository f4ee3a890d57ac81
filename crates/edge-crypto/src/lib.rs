//! # edge-crypto
//!
//! Cryptographic helpers used by the execution engine.
//!
//! - Keccak-256 hashing
//! - `CREATE` / `CREATE2` contract address derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;
mod address;

pub use hash::{keccak256, KECCAK_EMPTY};
pub use address::{create2_address, create_address};
