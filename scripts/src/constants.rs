//! Constants used in the deployment scripts

use std::time::Duration;

/// The default path to the `resolc` compiler binary
pub const DEFAULT_RESOLC_PATH: &str = "~/.cargo/bin/resolc-0.3.0";

/// The default path to the `solc` binary handed to `resolc`.
///
/// This is where Homebrew installs `solc` on macOS
pub const DEFAULT_SOLC_PATH: &str = "/opt/homebrew/bin/solc";

/// The default Yul source of the deployment proxy, relative to the project root
pub const DEFAULT_INPUT_FILE: &str = "contracts/deterministic-deployment-proxy.yul";

/// The default directory for compiler and deployment outputs, relative to the project root
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// The default name of the proxy bytecode artifact
pub const DEFAULT_OUTPUT_FILE: &str = "bytecode.txt";

/// Environment variable overriding the `resolc` path
pub const RESOLC_PATH_ENV_VAR: &str = "RESOLC_PATH";

/// Environment variable overriding the `solc` path
pub const SOLC_PATH_ENV_VAR: &str = "SOLC_PATH";

/// Environment variable overriding the Yul input file
pub const INPUT_FILE_ENV_VAR: &str = "YUL_INPUT_FILE";

/// Environment variable overriding the output directory
pub const OUTPUT_DIR_ENV_VAR: &str = "YUL_OUTPUT_DIR";

/// Environment variable overriding the output file name
pub const OUTPUT_FILE_ENV_VAR: &str = "YUL_OUTPUT_FILE";

/// Environment variable holding the user's home directory, used to expand `~/`
pub const HOME_ENV_VAR: &str = "HOME";

/// The flag pointing `resolc` at a `solc` binary
pub const SOLC_FLAG: &str = "--solc";

/// The flag selecting Yul as the `resolc` input language
pub const YUL_FLAG: &str = "--yul";

/// The flag asking `resolc` to emit binary bytecode
pub const BIN_FLAG: &str = "--bin";

/// The token in the compiler's stdout after which the bytecode is printed
pub const BYTECODE_MARKER: &str = "bytecode:";

/// The prefix of the deployment record file name, followed by the network name
pub const DEPLOYMENT_RECORD_PREFIX: &str = "deployment-";

/// The extension of the deployment record file
pub const DEPLOYMENT_RECORD_EXTENSION: &str = "json";

/// The key under which compiler artifacts (Hardhat & Foundry) store creation code
pub const ARTIFACT_BYTECODE_KEY: &str = "bytecode";

/// The key under which Foundry nests the hex string inside the bytecode object
pub const ARTIFACT_BYTECODE_OBJECT_KEY: &str = "object";

/// The default RPC URL, that of a local Hardhat / Anvil node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default time to wait for a transaction to be included
pub const DEFAULT_TX_TIMEOUT: Duration = Duration::from_secs(120);

/// The default number of confirmations to wait for on each transaction
pub const DEFAULT_NUM_CONFIRMATIONS: u64 = 1;
