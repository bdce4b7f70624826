//! Types and pure helpers shared by the deterministic deployment scripts.
//!
//! Nothing in this crate touches the network or the filesystem: it defines the
//! calldata layout expected by the deployment proxy, and the CREATE2 address
//! derivation used to predict where the proxy will place a contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod constants;
pub mod create2;
pub mod types;

pub use create2::{build_calldata, compute_code_hash, derive_deployment_address};
