//! Reading compilation artifacts and writing deployment records

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use alloy::primitives::Bytes;
use deployer_common::types::DeploymentRecord;
use serde_json::Value;
use tracing::info;

use crate::{
    compiler::ensure_directory_exists,
    constants::{
        ARTIFACT_BYTECODE_KEY, ARTIFACT_BYTECODE_OBJECT_KEY, DEPLOYMENT_RECORD_EXTENSION,
        DEPLOYMENT_RECORD_PREFIX,
    },
    errors::ScriptError,
};

/// Read a file, mapping its absence to [`ScriptError::ArtifactMissing`]
fn read_artifact(path: &Path) -> Result<String, ScriptError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScriptError::ArtifactMissing(path.display().to_string()),
        _ => ScriptError::ReadFile(format!("{}: {e}", path.display())),
    })
}

/// Decode a hex string, with or without a `0x` prefix
fn decode_hex(hex_str: &str, path: &Path) -> Result<Bytes, ScriptError> {
    let trimmed = hex_str.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))?;

    if bytes.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{}: bytecode is empty",
            path.display()
        )));
    }

    Ok(bytes.into())
}

/// Read the proxy bytecode written by the compilation pipeline
pub fn read_proxy_bytecode(path: &Path) -> Result<Bytes, ScriptError> {
    let contents = read_artifact(path)?;
    decode_hex(&contents, path)
}

/// Read the creation code of the contract to deploy through the proxy.
///
/// Accepts a Hardhat artifact (`"bytecode": "0x…"`), a Foundry artifact
/// (`"bytecode": { "object": "0x…" }`), or a file holding only the hex string.
pub fn read_target_bytecode(path: &Path) -> Result<Bytes, ScriptError> {
    let contents = read_artifact(path)?;
    if !contents.trim_start().starts_with('{') {
        return decode_hex(&contents, path);
    }

    let artifact: Value = serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))?;

    let bytecode = match &artifact[ARTIFACT_BYTECODE_KEY] {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj
            .get(ARTIFACT_BYTECODE_OBJECT_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ScriptError::ArtifactParsing(format!(
                    "{}: `{ARTIFACT_BYTECODE_KEY}` has no `{ARTIFACT_BYTECODE_OBJECT_KEY}` string",
                    path.display()
                ))
            })?,
        _ => {
            return Err(ScriptError::ArtifactParsing(format!(
                "{}: no `{ARTIFACT_BYTECODE_KEY}` field",
                path.display()
            )))
        }
    };

    decode_hex(bytecode, path)
}

/// The path of the deployment record for `network` within `output_dir`
pub fn deployment_record_path(output_dir: &Path, network: &str) -> PathBuf {
    output_dir.join(format!(
        "{DEPLOYMENT_RECORD_PREFIX}{network}.{DEPLOYMENT_RECORD_EXTENSION}"
    ))
}

/// Write the deployment record for `network`, replacing any earlier record
pub fn write_deployment_record(
    output_dir: &Path,
    network: &str,
    record: &DeploymentRecord,
) -> Result<PathBuf, ScriptError> {
    ensure_directory_exists(output_dir)?;

    let path = deployment_record_path(output_dir, network);
    let json =
        serde_json::to_string_pretty(record).map_err(|e| ScriptError::Serde(e.to_string()))?;
    fs::write(&path, json)
        .map_err(|e| ScriptError::WriteFile(format!("{}: {e}", path.display())))?;

    info!(path = %path.display(), "deployment record saved");
    Ok(path)
}
