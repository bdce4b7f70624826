//! Type definitions for the proxy calldata and the deployment record

use core::fmt::{self, Display, Formatter};

use alloy_primitives::{Address, Bytes, TxHash, B256};
use serde::{Deserialize, Serialize};

use crate::constants::{NUM_BYTES_CALLDATA, NUM_BYTES_SALT};

/// A one-time value mixed into the CREATE2 derivation.
///
/// A fresh salt must be drawn for every deployment; replaying a salt against the
/// same proxy and code hash targets an address that is already occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salt(pub B256);

impl Salt {
    /// Draw a salt from the operating system's CSPRNG
    pub fn random() -> Self {
        Salt(B256::random())
    }

    /// The raw bytes of the salt
    pub fn as_bytes(&self) -> &[u8; NUM_BYTES_SALT] {
        &self.0 .0
    }
}

impl From<[u8; NUM_BYTES_SALT]> for Salt {
    fn from(bytes: [u8; NUM_BYTES_SALT]) -> Self {
        Salt(B256::from(bytes))
    }
}

impl Display for Salt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// The keccak256 digest of a contract's bytecode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeHash(pub B256);

impl CodeHash {
    /// Hash the given bytecode
    pub fn of(bytecode: &[u8]) -> Self {
        CodeHash(alloy_primitives::keccak256(bytecode))
    }

    /// The raw bytes of the hash
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

impl Display for CodeHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Error returned when raw calldata is not exactly [`NUM_BYTES_CALLDATA`] long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalldataLengthError(pub usize);

impl Display for CalldataLengthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "proxy calldata must be {NUM_BYTES_CALLDATA} bytes, got {}",
            self.0
        )
    }
}

impl std::error::Error for CalldataLengthError {}

/// The payload sent to the deployment proxy: `salt ‖ code_hash`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ProxyCalldata([u8; NUM_BYTES_CALLDATA]);

impl ProxyCalldata {
    /// Lay out the salt and code hash back to back
    pub fn new(salt: Salt, code_hash: CodeHash) -> Self {
        let mut buf = [0_u8; NUM_BYTES_CALLDATA];
        buf[..NUM_BYTES_SALT].copy_from_slice(salt.as_bytes());
        buf[NUM_BYTES_SALT..].copy_from_slice(code_hash.as_bytes());
        ProxyCalldata(buf)
    }

    /// Parse calldata previously produced by [`ProxyCalldata::new`]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CalldataLengthError> {
        let buf: [u8; NUM_BYTES_CALLDATA] = bytes
            .try_into()
            .map_err(|_| CalldataLengthError(bytes.len()))?;
        Ok(ProxyCalldata(buf))
    }

    /// The salt half of the calldata
    pub fn salt(&self) -> Salt {
        Salt(B256::from_slice(&self.0[..NUM_BYTES_SALT]))
    }

    /// The code hash half of the calldata
    pub fn code_hash(&self) -> CodeHash {
        CodeHash(B256::from_slice(&self.0[NUM_BYTES_SALT..]))
    }

    /// The raw calldata bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ProxyCalldata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ProxyCalldata({})", Bytes::copy_from_slice(&self.0))
    }
}

impl From<ProxyCalldata> for Bytes {
    fn from(calldata: ProxyCalldata) -> Self {
        Bytes::copy_from_slice(&calldata.0)
    }
}

/// The proxy half of a deployment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyDeployment {
    /// The address at which the proxy was deployed
    pub address: Address,
    /// The proxy creation code
    pub bytecode: Bytes,
}

/// The target half of a deployment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDeployment {
    /// The address derived for the target contract
    pub address: Address,
    /// The target creation code whose hash was sent to the proxy
    pub bytecode: Bytes,
    /// The salt used for this deployment
    pub salt: Salt,
}

/// Everything needed to audit a completed deterministic deployment.
///
/// Written once per run to a file scoped by network name; never read back by
/// the scripts themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The deployment proxy
    pub proxy: ProxyDeployment,
    /// The contract deployed through the proxy
    pub target: TargetDeployment,
    /// The calldata sent to the proxy
    pub calldata: Bytes,
    /// The account that signed both transactions
    pub deployer: Address,
    /// The hash of the proxy invocation transaction
    pub transaction: TxHash,
}
