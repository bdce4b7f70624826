//! The chain-facing collaborator of the deployment orchestrator.
//!
//! [`DeploymentClient`] is the only surface through which the orchestrator touches the
//! network; [`RpcClient`] implements it over an alloy HTTP provider.

use std::{fmt::Display, future::IntoFuture, str::FromStr, time::Duration};

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_chains::Chain;
use tokio::time::timeout;
use tracing::info;

use crate::errors::ScriptError;

/// The chain operations required to run a deterministic deployment
#[allow(async_fn_in_trait)]
pub trait DeploymentClient {
    /// The signing identities available to this client, in a stable order
    async fn signers(&self) -> Result<Vec<Address>, ScriptError>;

    /// Submit a contract-creation transaction from `from` and wait for its inclusion,
    /// returning the address of the created contract
    async fn deploy_contract(&self, from: Address, bytecode: Bytes)
        -> Result<Address, ScriptError>;

    /// Submit a zero-value transaction carrying `calldata` to `to` and wait for its
    /// inclusion, returning the transaction hash
    async fn send_calldata(
        &self,
        from: Address,
        to: Address,
        calldata: Bytes,
    ) -> Result<TxHash, ScriptError>;

    /// The code currently deployed at `address`
    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError>;

    /// The name of the network this client is connected to
    async fn network_name(&self) -> Result<String, ScriptError>;
}

/// A [`DeploymentClient`] backed by a JSON-RPC node
pub struct RpcClient {
    /// The underlying provider, with a wallet filler when a private key was given
    provider: DynProvider,
    /// The address of the local signer, if any; otherwise the node's accounts are used
    local_signer: Option<Address>,
    /// How long to wait for each transaction to be included
    tx_timeout: Duration,
    /// How many confirmations to wait for on each transaction
    confirmations: u64,
}

impl RpcClient {
    /// Submit `tx` and wait for a successful receipt
    async fn send(&self, tx: TransactionRequest) -> Result<TransactionReceipt, ScriptError> {
        let pending_tx = bounded(
            self.tx_timeout,
            "submitting transaction",
            self.provider.send_transaction(tx),
            ScriptError::TransactionFailed,
        )
        .await?;
        let tx_hash = *pending_tx.tx_hash();
        info!(%tx_hash, "waiting for tx to be mined");

        let receipt = bounded(
            self.tx_timeout,
            &format!("waiting for {tx_hash:#x}"),
            pending_tx
                .with_required_confirmations(self.confirmations)
                .get_receipt(),
            ScriptError::TransactionFailed,
        )
        .await?;

        let receipt = ensure_success(receipt)?;
        info!(%tx_hash, gas_used = receipt.gas_used, "tx mined");
        Ok(receipt)
    }
}

impl DeploymentClient for RpcClient {
    async fn signers(&self) -> Result<Vec<Address>, ScriptError> {
        match self.local_signer {
            Some(address) => Ok(vec![address]),
            None => {
                bounded(
                    self.tx_timeout,
                    "fetching node accounts",
                    self.provider.get_accounts(),
                    ScriptError::ClientInitialization,
                )
                .await
            }
        }
    }

    async fn deploy_contract(
        &self,
        from: Address,
        bytecode: Bytes,
    ) -> Result<Address, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(bytecode);
        let receipt = self.send(tx).await?;
        created_contract(&receipt)
    }

    async fn send_calldata(
        &self,
        from: Address,
        to: Address,
        calldata: Bytes,
    ) -> Result<TxHash, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(calldata)
            .with_value(U256::ZERO);
        let receipt = self.send(tx).await?;
        Ok(receipt.transaction_hash)
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError> {
        bounded(
            self.tx_timeout,
            &format!("fetching code at {address}"),
            self.provider.get_code_at(address),
            ScriptError::ContractInteraction,
        )
        .await
    }

    async fn network_name(&self) -> Result<String, ScriptError> {
        let chain_id = bounded(
            self.tx_timeout,
            "fetching chain id",
            self.provider.get_chain_id(),
            ScriptError::ContractInteraction,
        )
        .await?;
        Ok(network_name_for_chain(chain_id))
    }
}

/// Await `fut` for at most `limit`, mapping both its error and an elapsed deadline
/// through `to_error`
async fn bounded<T, E: Display>(
    limit: Duration,
    action: &str,
    fut: impl IntoFuture<Output = Result<T, E>>,
    to_error: fn(String) -> ScriptError,
) -> Result<T, ScriptError> {
    match timeout(limit, fut.into_future()).await {
        Ok(res) => res.map_err(|e| to_error(format!("{action}: {e}"))),
        Err(_) => Err(to_error(format!("{action}: timed out after {limit:?}"))),
    }
}

/// Reject the receipt of a reverted transaction
fn ensure_success(receipt: TransactionReceipt) -> Result<TransactionReceipt, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::TransactionFailed(format!(
            "{:#x} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(receipt)
}

/// The address of the contract created by a deployment transaction
fn created_contract(receipt: &TransactionReceipt) -> Result<Address, ScriptError> {
    receipt.contract_address.ok_or_else(|| {
        ScriptError::TransactionFailed(format!(
            "{:#x} created no contract",
            receipt.transaction_hash
        ))
    })
}

/// The canonical name of a chain, falling back to its numeric ID
pub fn network_name_for_chain(chain_id: u64) -> String {
    Chain::from_id(chain_id).to_string()
}

/// Sets up the client used for deployment.
///
/// With a private key, transactions are signed locally by that key. Without one, the
/// node is expected to manage its own accounts, as a local Hardhat or Anvil node does.
pub fn setup_client(
    rpc_url: &str,
    priv_key: Option<&str>,
    tx_timeout: Duration,
    confirmations: u64,
) -> Result<RpcClient, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::Configuration(e.to_string()))?;

    let (provider, local_signer) = match priv_key {
        Some(priv_key) => {
            let signer = PrivateKeySigner::from_str(priv_key)
                .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
            let address = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .on_http(url)
                .erased();
            (provider, Some(address))
        }
        None => (ProviderBuilder::new().on_http(url).erased(), None),
    };

    Ok(RpcClient {
        provider,
        local_signer,
        tx_timeout,
        confirmations,
    })
}
