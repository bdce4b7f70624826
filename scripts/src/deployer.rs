//! The two-stage deterministic deployment.
//!
//! First the proxy is deployed with an ordinary contract-creation transaction. Then the
//! proxy is called with `salt ‖ code_hash`, and deploys the target at the CREATE2
//! address derived from its own address, the salt, and the code hash. That address is
//! computed locally and checked against the chain afterwards.

use std::path::PathBuf;

use alloy::primitives::{Address, Bytes};
use deployer_common::{
    build_calldata, compute_code_hash, derive_deployment_address,
    types::{DeploymentRecord, ProxyDeployment, Salt, TargetDeployment},
};
use tracing::{info, warn};

use crate::{
    artifacts::{read_proxy_bytecode, read_target_bytecode, write_deployment_record},
    client::DeploymentClient,
    errors::ScriptError,
};

/// The inputs of a single deployment run
#[derive(Debug, Clone)]
pub struct DeploymentParams {
    /// The proxy bytecode written by the compilation pipeline
    pub proxy_bytecode_path: PathBuf,
    /// The compilation artifact of the contract to deploy through the proxy
    pub target_artifact_path: PathBuf,
    /// The directory the deployment record is written to
    pub output_dir: PathBuf,
    /// Overrides the network name reported by the client
    pub network: Option<String>,
    /// Deploy the target directly before deploying it through the proxy, for chains
    /// that require code to be uploaded before it can be instantiated by hash
    pub upload_target: bool,
    /// Fail the run when no code is found at the derived address
    pub strict_verification: bool,
}

/// The result of a completed deployment run
#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    /// The record written to disk
    pub record: DeploymentRecord,
    /// Whether code was found at the derived address
    pub verified: bool,
    /// Where the record was written
    pub record_path: PathBuf,
}

/// Run a deterministic deployment with a freshly generated salt
pub async fn deploy_deterministic(
    client: &impl DeploymentClient,
    params: &DeploymentParams,
) -> Result<DeploymentOutcome, ScriptError> {
    deploy_with_salt(client, params, Salt::random()).await
}

/// Run a deterministic deployment with the given salt
pub(crate) async fn deploy_with_salt(
    client: &impl DeploymentClient,
    params: &DeploymentParams,
    salt: Salt,
) -> Result<DeploymentOutcome, ScriptError> {
    // Both artifacts are read up front so that a missing one fails the run before
    // any transaction is sent
    let proxy_bytecode = read_proxy_bytecode(&params.proxy_bytecode_path)?;
    let target_bytecode = read_target_bytecode(&params.target_artifact_path)?;
    info!(
        proxy_bytecode_len = proxy_bytecode.len(),
        target_bytecode_len = target_bytecode.len(),
        "loaded bytecode"
    );

    let deployer = select_deployer(client).await?;
    info!(%deployer, "deploying with account");

    let proxy_address = client
        .deploy_contract(deployer, proxy_bytecode.clone())
        .await?;
    info!(%proxy_address, "proxy deployed");

    if params.upload_target {
        let uploaded = client
            .deploy_contract(deployer, target_bytecode.clone())
            .await?;
        info!(%uploaded, "target code uploaded");
    }

    let code_hash = compute_code_hash(&target_bytecode);
    info!(%code_hash, "computed target code hash");
    info!(%salt, "using salt");

    let calldata = Bytes::from(build_calldata(salt, code_hash));

    info!("deploying target through proxy");
    let transaction = client
        .send_calldata(deployer, proxy_address, calldata.clone())
        .await?;
    info!(%transaction, "proxy invoked");

    let target_address = derive_deployment_address(proxy_address, salt, code_hash);
    info!(%target_address, "target deployed");

    let verified = verify_deployment(client, target_address).await;
    if !verified {
        let mismatch = ScriptError::VerificationMismatch(format!(
            "no code at derived address {target_address}"
        ));
        if params.strict_verification {
            return Err(mismatch);
        }
        warn!("{mismatch}");
    }

    let record = DeploymentRecord {
        proxy: ProxyDeployment {
            address: proxy_address,
            bytecode: proxy_bytecode,
        },
        target: TargetDeployment {
            address: target_address,
            bytecode: target_bytecode,
            salt,
        },
        calldata,
        deployer,
        transaction,
    };

    let network = match &params.network {
        Some(network) => network.clone(),
        None => client.network_name().await?,
    };
    let record_path = write_deployment_record(&params.output_dir, &network, &record)?;

    Ok(DeploymentOutcome {
        record,
        verified,
        record_path,
    })
}

/// Pick the single account that signs every transaction in the run
async fn select_deployer(client: &impl DeploymentClient) -> Result<Address, ScriptError> {
    client.signers().await?.first().copied().ok_or_else(|| {
        ScriptError::ClientInitialization("no signing accounts available".to_string())
    })
}

/// Check whether code exists at `address`. A failed read is logged and counts as
/// unverified
async fn verify_deployment(client: &impl DeploymentClient, address: Address) -> bool {
    let code = match client.code_at(address).await {
        Ok(code) => code,
        Err(e) => {
            warn!(%address, "could not read deployed code: {e}");
            return false;
        }
    };
    info!(code_len = code.len(), "deployed contract code length");

    let verified = !code.is_empty();
    info!(verified, "deployment successful");
    verified
}
