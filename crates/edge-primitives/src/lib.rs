//! # edge-primitives
//!
//! Primitive types shared by the Edge execution engine.
//!
//! Addresses and hashes are fixed-size byte wrappers; stack words are
//! [`U256`] values from `primitive-types`. Conversions between the two
//! views follow the EVM convention: an address occupies the low 20 bytes
//! of a big-endian word.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{Hash, HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Block height type
pub type BlockNumber = u64;

/// Account nonce type
pub type Nonce = u64;

/// Gas type
pub type Gas = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_basic() {
        let a = U256::from(100u64);
        let b = U256::from(200u64);
        assert_eq!(a + b, U256::from(300u64));
    }

    #[test]
    fn test_address_hash_word_agree() {
        let addr = Address::from_bytes([0x11; 20]);
        let word = addr.to_word();
        assert_eq!(H256::from_word(word).as_bytes()[12..], [0x11; 20]);
        assert_eq!(Address::from_word(word), addr);
    }
}
