use crate::ConfigError;
use alloy_primitives::{address, Address};
use std::{fmt::Display, path::Path, str::FromStr};

/// The chain id of the mainnet L1.
pub const MAINNET_L1_CHAIN_ID: u64 = 1;

/// The chain id of the testnet L1.
pub const TESTNET_L1_CHAIN_ID: u64 = 5;

/// The address of the zkEVM rollup contract on Mainnet.
pub const MAINNET_ROLLUP_CONTRACT_ADDRESS: Address =
    address!("0x5132a183e9f3cb7c848b0aac5ae0c4f0491b7ab2");

/// The address of the zkEVM rollup contract on Testnet.
pub const TESTNET_ROLLUP_CONTRACT_ADDRESS: Address =
    address!("0xa997cfd539e703921fd1e3cf25b4c241a27a4c7a");

/// The address of the global exit root manager contract on Mainnet.
pub const MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS: Address =
    address!("0x580bda1e7a0cfae92fa7f6c20a3794f169ce3cfb");

/// The address of the global exit root manager contract on Testnet.
pub const TESTNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS: Address =
    address!("0x4d9427dca0406358445bc0a8f88c26b704004f74");

/// The address of the POL token contract on Mainnet.
pub const MAINNET_POL_TOKEN_ADDRESS: Address =
    address!("0x7d1afa7b718fb893db30a3abc0cfc608aacfebb0");

/// The address of the POL token contract on Testnet.
pub const TESTNET_POL_TOKEN_ADDRESS: Address =
    address!("0x1319d23c2f7034f52eb07399702b040ba278ca49");

/// The L1 block the rollup contracts were deployed at on Mainnet.
pub const MAINNET_L1_START_BLOCK_NUMBER: u64 = 16896721;

/// The L1 block the rollup contracts were deployed at on Testnet.
pub const TESTNET_L1_START_BLOCK_NUMBER: u64 = 8577775;

/// The network the node runs against.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Network {
    /// The mainnet network.
    #[default]
    Mainnet,
    /// The testnet network.
    Testnet,
    /// A custom network, configured from a file.
    Custom,
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "custom" => Ok(Self::Custom),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// The L1 configuration of a network.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// The chain id of the L1.
    pub l1_chain_id: u64,
    /// The L1 block to start synchronizing from.
    pub start_l1_block: u64,
    /// The address book of the L1 contracts.
    pub address_book: L1AddressBook,
}

/// The addresses of the rollup contracts on the L1.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1AddressBook {
    /// The address of the zkEVM rollup contract.
    pub rollup_contract_address: Address,
    /// The address of the global exit root manager contract.
    pub global_exit_root_manager_address: Address,
    /// The address of the POL token contract.
    pub pol_token_address: Address,
}

impl NetworkConfig {
    /// Returns the mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            l1_chain_id: MAINNET_L1_CHAIN_ID,
            start_l1_block: MAINNET_L1_START_BLOCK_NUMBER,
            address_book: L1AddressBook {
                rollup_contract_address: MAINNET_ROLLUP_CONTRACT_ADDRESS,
                global_exit_root_manager_address: MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
                pol_token_address: MAINNET_POL_TOKEN_ADDRESS,
            },
        }
    }

    /// Returns the testnet configuration.
    pub const fn testnet() -> Self {
        Self {
            l1_chain_id: TESTNET_L1_CHAIN_ID,
            start_l1_block: TESTNET_L1_START_BLOCK_NUMBER,
            address_book: L1AddressBook {
                rollup_contract_address: TESTNET_ROLLUP_CONTRACT_ADDRESS,
                global_exit_root_manager_address: TESTNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
                pol_token_address: TESTNET_POL_TOKEN_ADDRESS,
            },
        }
    }

    /// Returns the configuration for the network. The custom network is read from
    /// `custom_network_file`.
    pub fn for_network(
        network: Network,
        custom_network_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        match network {
            Network::Mainnet => Ok(Self::mainnet()),
            Network::Testnet => Ok(Self::testnet()),
            Network::Custom => {
                let path = custom_network_file.ok_or(ConfigError::MissingCustomNetwork)?;
                Self::from_file(path)
            }
        }
    }

    /// Reads the configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(target: "zkevm::config", ?path, "loading custom network configuration");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses the configuration from JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}
