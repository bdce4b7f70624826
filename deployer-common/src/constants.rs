//! Constants that parameterize the proxy calldata layout and address derivation

/// The byte prepended to the CREATE2 preimage, as specified in EIP-1014:
/// https://eips.ethereum.org/EIPS/eip-1014#specification
pub const CREATE2_PREFIX: u8 = 0xff;

/// The number of bytes in an EVM word
pub const NUM_BYTES_WORD: usize = 32;

/// The number of bytes in a deployment salt
pub const NUM_BYTES_SALT: usize = NUM_BYTES_WORD;

/// The number of bytes in a keccak256 code hash
pub const NUM_BYTES_CODE_HASH: usize = NUM_BYTES_WORD;

/// The number of bytes of calldata sent to the deployment proxy.
///
/// Concretely, this is the salt followed by the code hash, with no ABI encoding
pub const NUM_BYTES_CALLDATA: usize = NUM_BYTES_SALT + NUM_BYTES_CODE_HASH;

/// The number of bytes it takes to represent an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

/// The length of the CREATE2 preimage: prefix, deployer, salt, code hash
pub const CREATE2_PREIMAGE_LENGTH: usize =
    1 + NUM_BYTES_ADDRESS + NUM_BYTES_SALT + NUM_BYTES_CODE_HASH;
