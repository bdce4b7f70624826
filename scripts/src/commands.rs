//! Implementations of the various deployment scripts

use deployer_common::{build_calldata, compute_code_hash, derive_deployment_address, types::Salt};
use tracing::info;

use crate::{
    artifacts::read_target_bytecode,
    cli::{CompileYulArgs, DeployArgs, PredictAddressArgs},
    client::setup_client,
    compiler,
    config::CompilerConfig,
    deployer::{deploy_deterministic, DeploymentParams},
    errors::ScriptError,
};

/// Compile the Yul proxy and write its bytecode
pub fn compile_yul(args: CompileYulArgs) -> Result<(), ScriptError> {
    let config = CompilerConfig::resolve_defaults().merge(args.overrides());

    info!("compiling Yul contract");
    compiler::compile_yul(&config, &args.root)?;
    info!(
        path = %config.output_path(&args.root).display(),
        "compilation successful"
    );

    Ok(())
}

/// Deploy the proxy, then deploy the target through it
pub async fn deploy(args: DeployArgs) -> Result<(), ScriptError> {
    // The proxy bytecode and the record default to the compilation pipeline's outputs
    let compiler_config = CompilerConfig::resolve_defaults();
    let params = DeploymentParams {
        proxy_bytecode_path: args
            .proxy_bytecode
            .clone()
            .map(|path| args.root.join(path))
            .unwrap_or_else(|| compiler_config.output_path(&args.root)),
        target_artifact_path: args.root.join(&args.target),
        output_dir: args
            .output_dir
            .clone()
            .map(|dir| args.root.join(dir))
            .unwrap_or_else(|| compiler_config.output_dir_path(&args.root)),
        network: args.network.clone(),
        upload_target: args.upload_target(),
        strict_verification: args.strict_verification,
    };

    let client = setup_client(
        &args.rpc_url,
        args.priv_key.as_deref(),
        args.tx_timeout(),
        args.confirmations,
    )?;

    let outcome = deploy_deterministic(&client, &params).await?;
    info!(
        target = %outcome.record.target.address,
        verified = outcome.verified,
        record = %outcome.record_path.display(),
        "deployment complete"
    );

    Ok(())
}

/// Print the code hash, calldata, and derived address for a target and salt
pub fn predict_address(args: PredictAddressArgs) -> Result<(), ScriptError> {
    let bytecode = read_target_bytecode(&args.target)?;
    let salt = Salt(args.salt);
    let code_hash = compute_code_hash(&bytecode);
    let calldata = build_calldata(salt, code_hash);
    let address = derive_deployment_address(args.proxy, salt, code_hash);

    println!("code hash: {code_hash}");
    println!("calldata:  0x{}", hex::encode(calldata.as_slice()));
    println!("address:   {address}");

    Ok(())
}
