use alloy_primitives::{keccak256, Address, Bytes, B256};

/// An update of the global exit root observed on the L1 exit root manager contract.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct GlobalExitRoot {
    /// The L1 block number the root was updated at.
    pub block_number: u64,
    /// The root of the mainnet exit tree.
    pub mainnet_exit_root: B256,
    /// The root of the rollup exit tree.
    pub rollup_exit_root: B256,
    /// The combined global exit root.
    pub global_exit_root: B256,
}

impl GlobalExitRoot {
    /// Returns a new [`GlobalExitRoot`], combining the mainnet and rollup exit roots into the
    /// global exit root.
    pub fn new(block_number: u64, mainnet_exit_root: B256, rollup_exit_root: B256) -> Self {
        Self {
            block_number,
            mainnet_exit_root,
            rollup_exit_root,
            global_exit_root: Self::combine(mainnet_exit_root, rollup_exit_root),
        }
    }

    /// Computes the global exit root as `keccak256(mainnet_exit_root || rollup_exit_root)`.
    pub fn combine(mainnet_exit_root: B256, rollup_exit_root: B256) -> B256 {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(mainnet_exit_root.as_slice());
        buf[32..].copy_from_slice(rollup_exit_root.as_slice());
        keccak256(buf)
    }
}

/// A batch forced on the L1, bypassing the trusted sequencer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct ForcedBatch {
    /// The L1 block number the batch was forced at.
    pub block_number: u64,
    /// The index of the forced batch.
    pub forced_batch_number: u64,
    /// The account which forced the batch.
    pub sequencer: Address,
    /// The last global exit root at the time the batch was forced.
    pub global_exit_root: B256,
    /// The raw L2 transactions of the batch.
    pub raw_txs_data: Bytes,
    /// The timestamp of the L1 block the batch was forced at.
    pub forced_at: u64,
}

/// The data of a batch as submitted by the trusted sequencer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct BatchData {
    /// The raw L2 transactions of the batch.
    pub transactions: Bytes,
    /// The global exit root used by the batch.
    pub global_exit_root: B256,
    /// The timestamp of the batch.
    pub timestamp: u64,
    /// The timestamp of the forced batch included in this batch, zero if none.
    pub min_forced_timestamp: u64,
}

/// A batch sequenced on the L1 by the trusted sequencer, also known as a virtual batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct SequencedBatch {
    /// The number of the batch.
    pub batch_number: u64,
    /// The account which sent the sequencing transaction.
    pub sequencer_addr: Address,
    /// The hash of the sequencing transaction.
    pub tx_hash: B256,
    /// The nonce of the sequencing transaction.
    pub nonce: u64,
    /// The L2 coinbase receiving the batch fees.
    pub coinbase: Address,
    /// The batch data.
    pub data: BatchData,
}

/// A batch verified on the L1 by an aggregator.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct VerifiedBatch {
    /// The L1 block number the batch was verified at.
    pub block_number: u64,
    /// The number of the last verified batch.
    pub batch_number: u64,
    /// The aggregator which submitted the proof.
    pub aggregator: Address,
    /// The state root after the batch.
    pub state_root: B256,
    /// The hash of the verification transaction.
    pub tx_hash: B256,
}

/// The data of a forced batch as submitted when sequencing forced batches.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct ForcedBatchData {
    /// The raw L2 transactions of the batch.
    pub transactions: Bytes,
    /// The global exit root used by the batch.
    pub global_exit_root: B256,
    /// The timestamp at which the batch was forced.
    pub min_forced_timestamp: u64,
}

/// A forced batch sequenced on the L1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct SequencedForceBatch {
    /// The number of the batch.
    pub batch_number: u64,
    /// The account which sequenced the forced batch.
    pub coinbase: Address,
    /// The hash of the sequencing transaction.
    pub tx_hash: B256,
    /// The timestamp of the L1 block the batch was sequenced at.
    pub timestamp: u64,
    /// The nonce of the sequencing transaction.
    pub nonce: u64,
    /// The forced batch data.
    pub data: ForcedBatchData,
}

/// A change of the execution fork, active starting at the given batch number.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct ForkId {
    /// The batch number the fork is active from.
    pub batch_number: u64,
    /// The fork identifier.
    pub fork_id: u64,
    /// The version label of the fork.
    pub version: String,
}

impl ForkId {
    /// Returns a new [`ForkId`].
    pub fn new(batch_number: u64, fork_id: u64, version: impl Into<String>) -> Self {
        Self { batch_number, fork_id, version: version.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn test_should_combine_exit_roots() {
        let mainnet = b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
        let rollup = b256!("0x2222222222222222222222222222222222222222222222222222222222222222");

        let root = GlobalExitRoot::new(10, mainnet, rollup);

        let expected = keccak256([mainnet.as_slice(), rollup.as_slice()].concat());
        assert_eq!(root.global_exit_root, expected);
        assert_eq!(root.block_number, 10);
    }

    #[test]
    fn test_combine_is_order_sensitive() {
        let a = B256::repeat_byte(1);
        let b = B256::repeat_byte(2);
        assert_ne!(GlobalExitRoot::combine(a, b), GlobalExitRoot::combine(b, a));
    }
}
