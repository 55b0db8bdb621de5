use alloy_primitives::B256;
use alloy_sol_types::{sol, SolEvent};

sol! {
    // *********************GLOBAL EXIT ROOT MANAGER*********************
    #[derive(Debug, Default, PartialEq, Eq)]
    event UpdateGlobalExitRoot(bytes32 indexed mainnetExitRoot, bytes32 indexed rollupExitRoot);

    // *********************ROLLUP*********************
    #[derive(Debug, Default, PartialEq, Eq)]
    event ForceBatch(
        uint64 indexed forceBatchNum,
        bytes32 lastGlobalExitRoot,
        address sequencer,
        bytes transactions
    );

    #[derive(Debug, Default, PartialEq, Eq)]
    event SequenceBatches(uint64 indexed numBatch);

    #[derive(Debug, Default, PartialEq, Eq)]
    event SequenceForceBatches(uint64 indexed numBatch);

    #[derive(Debug, Default, PartialEq, Eq)]
    event VerifyBatches(uint64 indexed numBatch, bytes32 stateRoot, address indexed aggregator);

    #[derive(Debug, Default, PartialEq, Eq)]
    event VerifyBatchesTrustedAggregator(
        uint64 indexed numBatch,
        bytes32 stateRoot,
        address indexed aggregator
    );

    #[derive(Debug, Default, PartialEq, Eq)]
    event UpdateZkEVMVersion(uint64 numBatch, uint64 forkID, string version);
}

/// The signatures of all the events relevant to the L1 synchronization.
pub const EVENT_SIGNATURES: [B256; 7] = [
    UpdateGlobalExitRoot::SIGNATURE_HASH,
    ForceBatch::SIGNATURE_HASH,
    SequenceBatches::SIGNATURE_HASH,
    SequenceForceBatches::SIGNATURE_HASH,
    VerifyBatches::SIGNATURE_HASH,
    VerifyBatchesTrustedAggregator::SIGNATURE_HASH,
    UpdateZkEVMVersion::SIGNATURE_HASH,
];
