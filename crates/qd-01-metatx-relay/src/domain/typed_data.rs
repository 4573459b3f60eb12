//! # Typed-Data Hashing (EIP-712)
//!
//! ```text
//! digest = keccak256(0x19 0x01 ++ domainSeparator ++ hashStruct(request))
//! ```
//!
//! Every field is encoded as a 32-byte word; dynamic `bytes` and `string`
//! fields are replaced by their keccak256 hash.

use super::entities::{ForwardRequest, ForwarderDomain};
use shared_types::{address_word, keccak256, u256_word, Hash, U256};

/// EIP-712 domain type string.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Forward request type string.
pub const FORWARD_REQUEST_TYPE: &str = "ForwardRequest(address from,address to,uint256 value,uint256 gas,uint256 nonce,uint256 deadline,bytes data)";

impl ForwarderDomain {
    /// Domain separator binding signatures to this relay and chain.
    #[must_use]
    pub fn separator(&self) -> Hash {
        let mut encoded = Vec::with_capacity(32 * 5);
        encoded.extend_from_slice(keccak256(EIP712_DOMAIN_TYPE.as_bytes()).as_bytes());
        encoded.extend_from_slice(keccak256(self.name.as_bytes()).as_bytes());
        encoded.extend_from_slice(keccak256(self.version.as_bytes()).as_bytes());
        encoded.extend_from_slice(&u256_word(U256::from(self.chain_id)));
        encoded.extend_from_slice(&address_word(self.verifying_contract));
        keccak256(&encoded)
    }
}

/// `hashStruct(request)`.
#[must_use]
pub fn struct_hash(request: &ForwardRequest) -> Hash {
    let mut encoded = Vec::with_capacity(32 * 8);
    encoded.extend_from_slice(keccak256(FORWARD_REQUEST_TYPE.as_bytes()).as_bytes());
    encoded.extend_from_slice(&address_word(request.from));
    encoded.extend_from_slice(&address_word(request.to));
    encoded.extend_from_slice(&u256_word(request.value));
    encoded.extend_from_slice(&u256_word(U256::from(request.gas)));
    encoded.extend_from_slice(&u256_word(request.nonce));
    encoded.extend_from_slice(&u256_word(U256::from(request.deadline)));
    encoded.extend_from_slice(keccak256(request.data.as_slice()).as_bytes());
    keccak256(&encoded)
}

/// The digest a signer signs for `request` under `domain_separator`.
#[must_use]
pub fn typed_data_digest(domain_separator: &Hash, request: &ForwardRequest) -> Hash {
    let mut encoded = Vec::with_capacity(2 + 32 + 32);
    encoded.extend_from_slice(&[0x19, 0x01]);
    encoded.extend_from_slice(domain_separator.as_bytes());
    encoded.extend_from_slice(struct_hash(request).as_bytes());
    keccak256(&encoded)
}
