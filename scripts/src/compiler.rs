//! Compilation of the Yul deployment proxy via `resolc`

use std::{
    fmt::{self, Display, Formatter},
    fs,
    io::ErrorKind,
    path::Path,
    process::Command,
};

use tracing::{debug, info};

use crate::{
    config::CompilerConfig,
    constants::{BIN_FLAG, BYTECODE_MARKER, SOLC_FLAG, YUL_FLAG},
    errors::ScriptError,
};

/// Reasons the compiler's stdout did not yield usable bytecode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BytecodeParseError {
    /// The `bytecode:` marker does not appear in the output
    MarkerMissing,
    /// The marker is present but nothing follows it
    EmptyBytecode,
    /// The text following the marker is not hex
    InvalidHex(String),
}

impl Display for BytecodeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BytecodeParseError::MarkerMissing => {
                write!(f, "compiler output contains no `{BYTECODE_MARKER}` marker")
            }
            BytecodeParseError::EmptyBytecode => {
                write!(f, "no bytecode follows the `{BYTECODE_MARKER}` marker")
            }
            BytecodeParseError::InvalidHex(s) => write!(f, "bytecode is not valid hex: {}", s),
        }
    }
}

/// Extract the bytecode from the compiler's stdout.
///
/// The bytecode is the first whitespace-delimited token after the `bytecode:` marker,
/// with an optional `0x` prefix removed.
pub fn parse_bytecode(stdout: &str) -> Result<String, BytecodeParseError> {
    let (_, rest) = stdout
        .split_once(BYTECODE_MARKER)
        .ok_or(BytecodeParseError::MarkerMissing)?;

    let token = rest
        .split_whitespace()
        .next()
        .ok_or(BytecodeParseError::EmptyBytecode)?;
    let bytecode = token.strip_prefix("0x").unwrap_or(token);
    if bytecode.is_empty() {
        return Err(BytecodeParseError::EmptyBytecode);
    }

    hex::decode(bytecode).map_err(|e| BytecodeParseError::InvalidHex(e.to_string()))?;
    Ok(bytecode.to_string())
}

/// Create `dir` (and its parents) unless it already exists
pub fn ensure_directory_exists(dir: &Path) -> Result<(), ScriptError> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(ScriptError::WriteFile(format!(
            "could not create {}: {e}",
            dir.display()
        ))),
    }
}

/// Build the `resolc` invocation for the given config
fn compiler_command(config: &CompilerConfig, root: &Path) -> Command {
    let mut cmd = Command::new(&config.resolc_path);
    cmd.arg(SOLC_FLAG);
    cmd.arg(&config.solc_path);
    cmd.arg(YUL_FLAG);
    cmd.arg(config.input_path(root));
    cmd.arg(BIN_FLAG);
    cmd
}

/// Compiles the Yul proxy and writes its bytecode to the configured output file,
/// returning the bytecode.
///
/// Relative paths in `config` are resolved against `root`. Nothing is written unless
/// the compiler exits successfully and its output contains bytecode.
pub fn compile_yul(config: &CompilerConfig, root: &Path) -> Result<String, ScriptError> {
    let mut cmd = compiler_command(config, root);
    debug!(?cmd, "invoking compiler");

    let output = cmd.output().map_err(|e| {
        ScriptError::ContractCompilation(format!(
            "could not launch {}: {e}",
            config.resolc_path.display()
        ))
    })?;

    if !output.status.success() {
        return Err(ScriptError::ContractCompilation(format!(
            "{} exited with {}: {}",
            config.resolc_path.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let bytecode =
        parse_bytecode(&stdout).map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;

    let output_dir = config.output_dir_path(root);
    ensure_directory_exists(&output_dir)?;

    let output_path = config.output_path(root);
    fs::write(&output_path, &bytecode).map_err(|e| {
        ScriptError::WriteFile(format!("could not write {}: {e}", output_path.display()))
    })?;

    info!(
        path = %output_path.display(),
        num_bytes = bytecode.len() / 2,
        "wrote proxy bytecode"
    );
    Ok(bytecode)
}
