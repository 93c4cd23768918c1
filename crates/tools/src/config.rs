//! Typed build and deployment configuration for the PluToken contracts.
//!
//! This module defines the configuration consumed by the external build
//! framework: solc version and optimizer settings, the Infura-backed network
//! endpoints with their signing accounts, and gas reporter parameters.
//! Values are resolved in priority order:
//!
//! 1. Environment variables (required secrets, optional overrides)
//! 2. Static defaults matching the checked-in build configuration
//! 3. Error if a required variable is missing or malformed
//!
//! # Examples
//!
//! ```rust,no_run
//! use plutoken_tools::config::RootConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RootConfig::load()?;
//! println!("solc: {}", config.solidity.version);
//! println!("mainnet: {}", config.networks["mainnet"].url);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::env::{EnvSource, ProcessEnv};
use crate::secret::PrivateKey;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid {field}: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Environment variable holding the Infura project identifier.
pub const INFURA_PROJECT_ID: &str = "INFURA_PROJECT_ID";
/// Environment variable holding the deployer signing key.
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
/// Environment variable holding the deployed token contract address.
pub const PLUTOKEN_CONTRACT_ADDRESS: &str = "PLUTOKEN_CONTRACT_ADDRESS";

const SOLC_VERSION: &str = "SOLC_VERSION";
const OPTIMIZER_RUNS: &str = "OPTIMIZER_RUNS";
const GAS_REPORTER_ENABLED: &str = "GAS_REPORTER_ENABLED";
const GAS_REPORTER_CURRENCY: &str = "GAS_REPORTER_CURRENCY";
const GAS_REPORTER_GAS_PRICE: &str = "GAS_REPORTER_GAS_PRICE";

const DEFAULT_SOLC_VERSION: &str = "0.8.20";
const DEFAULT_OPTIMIZER_RUNS: u32 = 200;
const DEFAULT_GAS_CURRENCY: &str = "USD";
const DEFAULT_GAS_PRICE: f64 = 50.0;

/// Solc releases the external toolchain can fetch and run.
const SUPPORTED_SOLC: &[&str] = &[
    "0.8.17", "0.8.18", "0.8.19", "0.8.20", "0.8.21", "0.8.22", "0.8.23", "0.8.24",
];

/// Deployment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Ethereum mainnet - production
    Mainnet,
    /// Rinkeby testnet - for testing before mainnet
    Rinkeby,
}

impl Network {
    /// Every network the toolchain deploys to.
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Rinkeby];

    /// Get network as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Rinkeby => "rinkeby",
        }
    }

    /// Parse network from string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "rinkeby" => Ok(Network::Rinkeby),
            other => Err(ConfigError::InvalidFormat {
                field: "network".to_string(),
                reason: format!("{}. Must be: mainnet or rinkeby", other),
            }),
        }
    }

    /// EIP-155 chain id for transaction signing
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Rinkeby => 4,
        }
    }

    /// Infura RPC URL for this network under the given project.
    pub fn rpc_url(&self, project_id: &str) -> String {
        format!("https://{}.infura.io/v3/{}", self.as_str(), project_id)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Solc optimizer settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizerConfig {
    pub enabled: bool,
    pub runs: u32,
}

/// Contract compiler selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolcConfig {
    pub version: String,
    pub optimizer: OptimizerConfig,
}

/// A named RPC endpoint with its signing accounts
#[derive(Debug, Clone, Serialize)]
pub struct NetworkConfig {
    pub url: String,
    pub accounts: Vec<PrivateKey>,
}

/// Gas usage reporting parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasReporterConfig {
    pub enabled: bool,
    pub currency: String,
    pub gas_price: f64,
}

/// Deployed PluToken contract address, `0x` followed by 40 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let hex = raw.strip_prefix("0x").unwrap_or(raw);
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidFormat {
                field: "contract address".to_string(),
                reason: "expected 0x followed by 40 hex digits".to_string(),
            });
        }
        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved build/deployment configuration with all required fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootConfig {
    /// Compiler selection and optimizer tuning
    pub solidity: SolcConfig,
    /// Deployment targets keyed by network name
    pub networks: BTreeMap<String, NetworkConfig>,
    /// Gas usage reporting
    pub gas_reporter: GasReporterConfig,
    /// Deployed token contract, once known
    pub contract_address: Option<ContractAddress>,
}

impl RootConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads a `.env` file first if one exists (non-fatal), then delegates
    /// to [`RootConfig::load_from`] over the real environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(&ProcessEnv)
    }

    /// Load configuration from an explicit variable source.
    ///
    /// Single pass, no I/O beyond the source itself. The required secrets
    /// are read first, optional overrides are applied over the static
    /// defaults, and the assembled config is validated before it is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when a required variable is
    /// absent or empty, and [`ConfigError::InvalidFormat`] when any value
    /// fails its shape constraint.
    pub fn load_from(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let project_id = required(env, INFURA_PROJECT_ID)?;
        let key = PrivateKey::parse(&required(env, PRIVATE_KEY)?)?;

        let version =
            optional(env, SOLC_VERSION).unwrap_or_else(|| DEFAULT_SOLC_VERSION.to_string());
        let runs = match optional(env, OPTIMIZER_RUNS) {
            Some(raw) => parse_u32(OPTIMIZER_RUNS, &raw)?,
            None => DEFAULT_OPTIMIZER_RUNS,
        };

        let gas_enabled = match optional(env, GAS_REPORTER_ENABLED) {
            Some(raw) => parse_bool(GAS_REPORTER_ENABLED, &raw)?,
            None => true,
        };
        let currency = optional(env, GAS_REPORTER_CURRENCY)
            .unwrap_or_else(|| DEFAULT_GAS_CURRENCY.to_string());
        let gas_price = match optional(env, GAS_REPORTER_GAS_PRICE) {
            Some(raw) => parse_f64(GAS_REPORTER_GAS_PRICE, &raw)?,
            None => DEFAULT_GAS_PRICE,
        };

        // "-" is the placeholder the repo ships before first deployment.
        let contract_address = match optional(env, PLUTOKEN_CONTRACT_ADDRESS) {
            Some(raw) if raw != "-" => Some(ContractAddress::parse(&raw)?),
            _ => None,
        };

        let mut networks = BTreeMap::new();
        for network in Network::ALL {
            networks.insert(
                network.as_str().to_string(),
                NetworkConfig {
                    url: network.rpc_url(&project_id),
                    accounts: vec![key.clone()],
                },
            );
        }

        let config = RootConfig {
            solidity: SolcConfig {
                version,
                optimizer: OptimizerConfig {
                    enabled: true,
                    runs,
                },
            },
            networks,
            gas_reporter: GasReporterConfig {
                enabled: gas_enabled,
                currency,
                gas_price,
            },
            contract_address,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate every invariant of the assembled configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_SOLC.contains(&self.solidity.version.as_str()) {
            return Err(ConfigError::InvalidFormat {
                field: "solidity.version".to_string(),
                reason: format!("{} is not a supported solc release", self.solidity.version),
            });
        }

        if self.solidity.optimizer.runs == 0 {
            return Err(ConfigError::InvalidFormat {
                field: "solidity.optimizer.runs".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let currency = &self.gas_reporter.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidFormat {
                field: "gasReporter.currency".to_string(),
                reason: format!("{} is not a three-letter currency code", currency),
            });
        }

        let gas_price = self.gas_reporter.gas_price;
        if !gas_price.is_finite() || gas_price <= 0.0 {
            return Err(ConfigError::InvalidFormat {
                field: "gasReporter.gasPrice".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }

        for (name, network) in &self.networks {
            if network.url.is_empty() {
                return Err(ConfigError::InvalidFormat {
                    field: format!("networks.{}.url", name),
                    reason: "must not be empty".to_string(),
                });
            }
            if !network.url.starts_with("https://") {
                return Err(ConfigError::InvalidFormat {
                    field: format!("networks.{}.url", name),
                    reason: format!("must start with https://: {}", network.url),
                });
            }
            if network.url.contains('{') || network.url.contains('$') {
                return Err(ConfigError::InvalidFormat {
                    field: format!("networks.{}.url", name),
                    reason: "contains an unsubstituted template marker".to_string(),
                });
            }
            if network.accounts.is_empty() {
                return Err(ConfigError::InvalidFormat {
                    field: format!("networks.{}.accounts", name),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Print the resolved configuration with secrets redacted
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║          PLUTOKEN BUILD CONFIGURATION RESOLVED                 ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!(
            "  Solidity:            {} (optimizer {} at {} runs)",
            self.solidity.version,
            if self.solidity.optimizer.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.solidity.optimizer.runs
        );

        for (name, network) in &self.networks {
            println!("  Network {:12} {}", name, network.url);
            for account in &network.accounts {
                println!("    account:           {}", account);
            }
        }

        if self.gas_reporter.enabled {
            println!(
                "  Gas Reporter:        {} at {} gwei",
                self.gas_reporter.currency, self.gas_reporter.gas_price
            );
        } else {
            println!("  Gas Reporter:        disabled");
        }

        if let Some(ref address) = self.contract_address {
            println!("  Contract:            {}", address);
        } else {
            println!("  Contract:            (not deployed)");
        }
    }

    /// Get configuration as JSON, secrets redacted
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Read a required variable; absent and empty both count as missing.
fn required(env: &impl EnvSource, key: &str) -> Result<String, ConfigError> {
    match env.var(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingEnv(key.to_string())),
    }
}

fn optional(env: &impl EnvSource, key: &str) -> Option<String> {
    env.var(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u32(field: &str, raw: &str) -> Result<u32, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidFormat {
        field: field.to_string(),
        reason: format!("{} is not a positive integer", raw),
    })
}

fn parse_f64(field: &str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidFormat {
        field: field.to_string(),
        reason: format!("{} is not a number", raw),
    })
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ConfigError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::InvalidFormat {
            field: field.to_string(),
            reason: format!("{} is not a boolean", raw),
        })
    }
}
