//! Address derivation for contracts deployed through the deterministic deployment proxy.
//!
//! The proxy forwards the salt and code hash from its calldata to `CREATE2`, so the
//! resulting address is fixed by EIP-1014:
//!
//! `keccak256(0xff ‖ proxy ‖ salt ‖ code_hash)[12..]`
//!
//! None of the functions here query the chain; the derived address can be computed
//! before the proxy is ever invoked.

use alloy_primitives::{keccak256, Address};

use crate::{
    constants::{CREATE2_PREFIX, CREATE2_PREIMAGE_LENGTH, NUM_BYTES_ADDRESS, NUM_BYTES_WORD},
    types::{CodeHash, ProxyCalldata, Salt},
};

/// Hash a contract's bytecode with keccak256.
///
/// The same digest must be used in the calldata and in [`derive_deployment_address`],
/// otherwise the prediction diverges from where the proxy actually deploys.
pub fn compute_code_hash(bytecode: &[u8]) -> CodeHash {
    CodeHash::of(bytecode)
}

/// Build the calldata for the deployment proxy
pub fn build_calldata(salt: Salt, code_hash: CodeHash) -> ProxyCalldata {
    ProxyCalldata::new(salt, code_hash)
}

/// Derive the address at which the proxy will deploy a contract with the given
/// code hash and salt
pub fn derive_deployment_address(proxy: Address, salt: Salt, code_hash: CodeHash) -> Address {
    let mut preimage = [0_u8; CREATE2_PREIMAGE_LENGTH];
    preimage[0] = CREATE2_PREFIX;
    preimage[1..1 + NUM_BYTES_ADDRESS].copy_from_slice(proxy.as_slice());
    preimage[1 + NUM_BYTES_ADDRESS..1 + NUM_BYTES_ADDRESS + NUM_BYTES_WORD]
        .copy_from_slice(salt.as_bytes());
    preimage[1 + NUM_BYTES_ADDRESS + NUM_BYTES_WORD..].copy_from_slice(code_hash.as_bytes());

    let digest = keccak256(preimage);
    Address::from_slice(&digest[NUM_BYTES_WORD - NUM_BYTES_ADDRESS..])
}
