//! Contract address derivation

use crate::hash::keccak256;
use edge_primitives::{Address, H256};
use rlp::RlpStream;

/// Address of a contract deployed with `CREATE`: `keccak256(rlp([sender, nonce]))[12..]`
pub fn create_address(sender: &Address, nonce: u64) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(sender);
    if nonce == 0 {
        stream.append_empty_data();
    } else {
        stream.append(&nonce);
    }
    let hash = keccak256(&stream.out());
    tail_address(&hash)
}

/// Address of a contract deployed with `CREATE2`:
/// `keccak256(0xff ++ sender ++ salt ++ keccak256(init_code))[12..]`
pub fn create2_address(sender: &Address, salt: &H256, init_code: &[u8]) -> Address {
    let code_hash = keccak256(init_code);
    let mut buf = [0u8; 1 + 20 + 32 + 32];
    buf[0] = 0xff;
    buf[1..21].copy_from_slice(sender.as_bytes());
    buf[21..53].copy_from_slice(salt.as_bytes());
    buf[53..].copy_from_slice(code_hash.as_bytes());
    tail_address(&keccak256(&buf))
}

fn tail_address(hash: &H256) -> Address {
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(bytes)
}
