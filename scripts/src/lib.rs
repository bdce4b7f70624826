//! Scripts for compiling the deterministic deployment proxy and deploying contracts
//! through it.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod client;
mod commands;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod deployer;
pub mod errors;
