//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug)]
pub enum ScriptError {
    /// A path or flag could not be resolved into a usable configuration
    Configuration(String),
    /// Error invoking the compiler or parsing its output
    ContractCompilation(String),
    /// An artifact expected from an earlier stage does not exist
    ArtifactMissing(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client or selecting a signer
    ClientInitialization(String),
    /// A submitted transaction reverted, was dropped, or timed out
    TransactionFailed(String),
    /// Error reading chain state
    ContractInteraction(String),
    /// No code was found at the derived deployment address
    VerificationMismatch(String),
    /// Error reading a file
    ReadFile(String),
    /// Error writing a file
    WriteFile(String),
    /// Error de/serializing the deployment record
    Serde(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Configuration(s) => write!(f, "invalid configuration: {}", s),
            ScriptError::ContractCompilation(s) => write!(f, "error compiling contract: {}", s),
            ScriptError::ArtifactMissing(s) => write!(f, "artifact missing: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::TransactionFailed(s) => write!(f, "transaction failed: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::VerificationMismatch(s) => write!(f, "verification mismatch: {}", s),
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::Serde(s) => write!(f, "error de/serializing: {}", s),
        }
    }
}

impl Error for ScriptError {}
