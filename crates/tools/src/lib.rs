//! PluToken Tools Library
//!
//! Provides validated build and deployment configuration for the PluToken
//! smart contracts.

pub mod config;
pub mod env;
pub mod secret;

pub use config::{
    ConfigError, ContractAddress, GasReporterConfig, Network, NetworkConfig, OptimizerConfig,
    RootConfig, SolcConfig,
};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use secret::PrivateKey;
