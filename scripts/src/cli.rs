//! Definitions of CLI arguments and commands for the deployment scripts

use std::{path::PathBuf, time::Duration};

use alloy::primitives::{Address, B256};
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{compile_yul, deploy, predict_address},
    config::CompilerConfigOverrides,
    constants::{DEFAULT_NUM_CONFIRMATIONS, DEFAULT_RPC_URL, DEFAULT_TX_TIMEOUT},
    errors::ScriptError,
};

/// Compile the deterministic deployment proxy and deploy contracts through it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Compile the Yul proxy with `resolc` and write its bytecode
    CompileYul(CompileYulArgs),
    /// Deploy the proxy, then deploy a contract through it
    Deploy(DeployArgs),
    /// Compute the address the proxy would deploy a contract at, without touching the chain
    PredictAddress(PredictAddressArgs),
}

impl Command {
    /// Run the command
    pub async fn run(self) -> Result<(), ScriptError> {
        match self {
            Command::CompileYul(args) => compile_yul(args),
            Command::Deploy(args) => deploy(args).await,
            Command::PredictAddress(args) => predict_address(args),
        }
    }
}

/// Compile the deterministic deployment proxy.
///
/// Any option left unset falls back to its environment variable (`RESOLC_PATH`,
/// `SOLC_PATH`, `YUL_INPUT_FILE`, `YUL_OUTPUT_DIR`, `YUL_OUTPUT_FILE`), then to a
/// hardcoded default.
#[derive(Args)]
pub struct CompileYulArgs {
    /// Yul source file, relative to the project root
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Name of the bytecode file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output directory, relative to the project root
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Path to the `resolc` compiler
    #[arg(long)]
    pub resolc_path: Option<PathBuf>,

    /// Path to the `solc` compiler
    #[arg(long)]
    pub solc_path: Option<PathBuf>,

    /// Project root that relative paths are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl CompileYulArgs {
    /// The compiler config fields set on the command line
    pub fn overrides(&self) -> CompilerConfigOverrides {
        CompilerConfigOverrides {
            resolc_path: self.resolc_path.clone(),
            solc_path: self.solc_path.clone(),
            input_file: self.input.clone(),
            output_dir: self.output_dir.clone(),
            output_file: self.output.clone(),
        }
    }
}

/// Deploy the proxy and deploy a contract through it at a CREATE2 address
#[derive(Args)]
pub struct DeployArgs {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer. When unset, the first account managed by the
    /// node is used
    #[arg(short, long, env = "PKEY")]
    pub priv_key: Option<String>,

    /// Compilation artifact of the contract to deploy (Hardhat or Foundry JSON, or raw hex)
    #[arg(short, long)]
    pub target: PathBuf,

    /// Proxy bytecode file. Defaults to the output of `compile-yul`
    #[arg(long)]
    pub proxy_bytecode: Option<PathBuf>,

    /// Directory to write the deployment record to. Defaults to the `compile-yul`
    /// output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Name used for the deployment record. Defaults to the name of the connected chain
    #[arg(short, long)]
    pub network: Option<String>,

    /// Seconds to wait for each transaction to be included
    #[arg(
        long,
        default_value_t = DEFAULT_TX_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tx_timeout: u64,

    /// Confirmations to wait for on each transaction
    #[arg(long, default_value_t = DEFAULT_NUM_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Skip deploying the target directly before the proxy call. Chains that
    /// instantiate contracts by code hash (such as pallet-revive chains) need the code
    /// uploaded first, so only skip this on chains that deploy from the hash's preimage
    #[arg(long)]
    pub skip_target_upload: bool,

    /// Fail when no code is found at the derived address, instead of only warning
    #[arg(long)]
    pub strict_verification: bool,

    /// Project root that relative paths are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl DeployArgs {
    /// The transaction inclusion timeout
    pub fn tx_timeout(&self) -> Duration {
        Duration::from_secs(self.tx_timeout)
    }

    /// Whether the target is deployed directly before the proxy call
    pub fn upload_target(&self) -> bool {
        !self.skip_target_upload
    }
}

/// Predict the address of a contract deployed through an existing proxy
#[derive(Args)]
pub struct PredictAddressArgs {
    /// Address of the deployed proxy
    #[arg(short, long)]
    pub proxy: Address,

    /// The 32-byte salt, in hex
    #[arg(short, long)]
    pub salt: B256,

    /// Compilation artifact of the contract (Hardhat or Foundry JSON, or raw hex)
    #[arg(short, long)]
    pub target: PathBuf,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use alloy::primitives::address;
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn test_compile_args() {
        let cli = Cli::try_parse_from([
            "scripts",
            "compile-yul",
            "--input",
            "contracts/proxy.yul",
            "--solc-path",
            "/usr/bin/solc",
        ])
        .unwrap();

        let Command::CompileYul(args) = cli.command else {
            panic!("expected compile-yul");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.input_file, Some(PathBuf::from("contracts/proxy.yul")));
        assert_eq!(overrides.solc_path, Some(PathBuf::from("/usr/bin/solc")));
        assert_eq!(overrides.resolc_path, None);
        assert_eq!(overrides.output_dir, None);
        assert_eq!(overrides.output_file, None);
    }

    #[test]
    fn test_deploy_args_defaults() {
        let cli = Cli::try_parse_from([
            "scripts",
            "deploy",
            "--rpc-url",
            "http://localhost:8545",
            "--target",
            "artifacts/Storage.json",
        ])
        .unwrap();

        let Command::Deploy(args) = cli.command else {
            panic!("expected deploy");
        };
        assert_eq!(args.tx_timeout().as_secs(), 120);
        assert_eq!(args.confirmations, 1);
        assert!(args.upload_target());
        assert!(!args.strict_verification);
        assert_eq!(args.network, None);
    }

    #[test]
    fn test_deploy_skip_target_upload() {
        let cli = Cli::try_parse_from([
            "scripts",
            "deploy",
            "--target",
            "Storage.json",
            "--skip-target-upload",
        ])
        .unwrap();

        let Command::Deploy(args) = cli.command else {
            panic!("expected deploy");
        };
        assert!(!args.upload_target());
    }

    #[test]
    fn test_deploy_rejects_zero_timeout() {
        assert!(Cli::try_parse_from([
            "scripts",
            "deploy",
            "--target",
            "Storage.json",
            "--tx-timeout",
            "0",
        ])
        .is_err());
    }

    #[test]
    fn test_predict_args() {
        let cli = Cli::try_parse_from([
            "scripts",
            "predict-address",
            "--proxy",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "--salt",
            "0x0101010101010101010101010101010101010101010101010101010101010101",
            "--target",
            "Storage.bin",
        ])
        .unwrap();

        let Command::PredictAddress(args) = cli.command else {
            panic!("expected predict-address");
        };
        assert_eq!(args.proxy, address!("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert_eq!(args.salt.0, [0x01; 32]);
    }
}
