//! Primitive types for the zkEVM node L1 synchronization.

pub use block::{BlockInfo, BlockLink, EventKind, EventOrder, L1Block, L1BlockBuilder, L1EventRef};
mod block;

pub use chain::{ChainUpdate, UnfinalizedChain, MAX_UNFINALIZED_BLOCK_COUNT};
mod chain;

pub use config::{
    L1AddressBook, Network, NetworkConfig, MAINNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
    MAINNET_L1_CHAIN_ID, MAINNET_L1_START_BLOCK_NUMBER, MAINNET_POL_TOKEN_ADDRESS,
    MAINNET_ROLLUP_CONTRACT_ADDRESS, TESTNET_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS,
    TESTNET_L1_CHAIN_ID, TESTNET_L1_START_BLOCK_NUMBER, TESTNET_POL_TOKEN_ADDRESS,
    TESTNET_ROLLUP_CONTRACT_ADDRESS,
};
mod config;

pub use error::ConfigError;
mod error;

pub use events::{
    BatchData, ForcedBatch, ForcedBatchData, ForkId, GlobalExitRoot, SequencedBatch,
    SequencedForceBatch, VerifiedBatch,
};
mod events;

pub use fork::ForkIdIntervals;
mod fork;

#[cfg(any(test, feature = "arbitrary"))]
/// Common test helpers
pub mod test_utils;
