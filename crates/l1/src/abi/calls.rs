use alloy_sol_types::{sol, SolCall};

sol! {
    #[derive(Debug, Default, PartialEq, Eq)]
    struct BatchData {
        bytes transactions;
        bytes32 globalExitRoot;
        uint64 timestamp;
        uint64 minForcedTimestamp;
    }

    #[derive(Debug, Default, PartialEq, Eq)]
    struct ForcedBatchData {
        bytes transactions;
        bytes32 globalExitRoot;
        uint64 minForcedTimestamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    function sequenceBatches(BatchData[] calldata batches, address l2Coinbase) external;

    #[derive(Debug, PartialEq, Eq)]
    function sequenceForceBatches(ForcedBatchData[] calldata batches) external;

    #[derive(Debug, PartialEq, Eq)]
    function forceBatch(bytes calldata transactions, uint256 maticAmount) external;
}

impl From<BatchData> for zkevm_primitives::BatchData {
    fn from(value: BatchData) -> Self {
        Self {
            transactions: value.transactions,
            global_exit_root: value.globalExitRoot,
            timestamp: value.timestamp,
            min_forced_timestamp: value.minForcedTimestamp,
        }
    }
}

impl From<ForcedBatchData> for zkevm_primitives::ForcedBatchData {
    fn from(value: ForcedBatchData) -> Self {
        Self {
            transactions: value.transactions,
            global_exit_root: value.globalExitRoot,
            min_forced_timestamp: value.minForcedTimestamp,
        }
    }
}

/// A call submitting batches to the rollup contract.
#[derive(Debug, derive_more::From)]
pub enum SequenceCall {
    /// A call from the trusted sequencer.
    SequenceBatches(sequenceBatchesCall),
    /// A call sequencing forced batches.
    SequenceForceBatches(sequenceForceBatchesCall),
    /// A call forcing a batch.
    ForceBatch(forceBatchCall),
}

impl SequenceCall {
    /// Decodes the calldata into a [`SequenceCall`], dispatching on the function selector.
    pub fn abi_decode(calldata: &[u8]) -> alloy_sol_types::Result<Self> {
        let selector: [u8; 4] =
            calldata.get(0..4).and_then(|s| s.try_into().ok()).ok_or_else(|| {
                alloy_sol_types::Error::Other("calldata shorter than a selector".into())
            })?;
        match selector {
            sequenceBatchesCall::SELECTOR => {
                sequenceBatchesCall::abi_decode(calldata).map(Into::into)
            }
            sequenceForceBatchesCall::SELECTOR => {
                sequenceForceBatchesCall::abi_decode(calldata).map(Into::into)
            }
            forceBatchCall::SELECTOR => forceBatchCall::abi_decode(calldata).map(Into::into),
            _ => Err(alloy_sol_types::Error::unknown_selector("SequenceCall", selector)),
        }
    }

    /// Returns the name of the called function.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SequenceBatches(_) => "sequenceBatches",
            Self::SequenceForceBatches(_) => "sequenceForceBatches",
            Self::ForceBatch(_) => "forceBatch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, B256, U256};

    #[test]
    fn test_should_decode_sequence_call() -> eyre::Result<()> {
        let call = sequenceBatchesCall {
            batches: vec![
                BatchData { transactions: Bytes::from_static(&[1]), ..Default::default() },
                BatchData { transactions: Bytes::from_static(&[2, 2]), ..Default::default() },
            ],
            l2Coinbase: Address::repeat_byte(7),
        };
        let decoded = SequenceCall::abi_decode(&call.abi_encode())?;

        assert_eq!(decoded.name(), "sequenceBatches");
        assert!(matches!(decoded, SequenceCall::SequenceBatches(ref c) if c == &call));
        Ok(())
    }

    #[test]
    fn test_should_decode_force_batch_call() -> eyre::Result<()> {
        let call = forceBatchCall {
            transactions: Bytes::from_static(&[0xca, 0xfe]),
            maticAmount: U256::from(10),
        };
        let decoded = SequenceCall::abi_decode(&call.abi_encode())?;

        assert_eq!(decoded.name(), "forceBatch");
        assert!(matches!(decoded, SequenceCall::ForceBatch(ref c) if c == &call));
        Ok(())
    }

    #[test]
    fn test_should_not_decode_unknown_calldata() {
        assert!(SequenceCall::abi_decode(&[]).is_err());
        assert!(SequenceCall::abi_decode(&[1, 2, 3]).is_err());
        assert!(matches!(
            SequenceCall::abi_decode(B256::ZERO.as_slice()),
            Err(alloy_sol_types::Error::UnknownSelector { name: "SequenceCall", .. })
        ));
    }

    #[test]
    fn test_should_convert_batch_data() {
        let data = ForcedBatchData {
            transactions: Bytes::from_static(&[3]),
            globalExitRoot: B256::repeat_byte(1),
            minForcedTimestamp: 99,
        };
        let converted: zkevm_primitives::ForcedBatchData = data.into();

        assert_eq!(converted.transactions, Bytes::from_static(&[3]));
        assert_eq!(converted.global_exit_root, B256::repeat_byte(1));
        assert_eq!(converted.min_forced_timestamp, 99);
    }
}
