//! Decoding of the rollup event logs into the L1 event model.

use crate::{
    abi::{
        calls::SequenceCall,
        logs::{
            ForceBatch, SequenceBatches, SequenceForceBatches, UpdateGlobalExitRoot,
            UpdateZkEVMVersion, VerifyBatches, VerifyBatchesTrustedAggregator,
        },
    },
    error::EventDecodeResult,
    EventDecodeError,
};
use alloy_primitives::{Address, Bytes, B256};
use alloy_rpc_types_eth::{Log, Transaction, TransactionTrait};
use alloy_sol_types::SolEvent;
use std::ops::RangeInclusive;
use zkevm_primitives::{
    ForcedBatch, ForkId, GlobalExitRoot, SequencedBatch, SequencedForceBatch, VerifiedBatch,
};

/// The fields of an L1 transaction required to decode the rollup events it emitted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct L1TransactionInfo {
    /// The transaction hash.
    pub hash: B256,
    /// The sender of the transaction.
    pub from: Address,
    /// The nonce of the transaction.
    pub nonce: u64,
    /// The calldata of the transaction.
    pub input: Bytes,
}

impl From<&Transaction> for L1TransactionInfo {
    fn from(value: &Transaction) -> Self {
        Self {
            hash: *value.inner.tx_hash(),
            from: value.inner.signer(),
            nonce: value.nonce(),
            input: value.input().clone(),
        }
    }
}

/// Decodes an `UpdateGlobalExitRoot` log.
pub fn decode_global_exit_root(log: &Log) -> EventDecodeResult<GlobalExitRoot> {
    let event = decode_log::<UpdateGlobalExitRoot>(log, "UpdateGlobalExitRoot")?;
    let block_number = log.block_number.ok_or(EventDecodeError::MissingBlockNumber)?;
    Ok(GlobalExitRoot::new(block_number, event.mainnetExitRoot, event.rollupExitRoot))
}

/// Decodes a `ForceBatch` log emitted by `tx`.
///
/// When the batch is forced directly by the sender of the transaction, the log does not carry
/// the L2 transactions, which are read from the calldata instead.
pub fn decode_forced_batch(
    log: &Log,
    tx: &L1TransactionInfo,
    block_timestamp: u64,
) -> EventDecodeResult<ForcedBatch> {
    let event = decode_log::<ForceBatch>(log, "ForceBatch")?;
    let block_number = log.block_number.ok_or(EventDecodeError::MissingBlockNumber)?;

    let raw_txs_data = if event.sequencer == tx.from {
        match decode_call(tx, "forceBatch")? {
            SequenceCall::ForceBatch(call) => call.transactions,
            call => return Err(unexpected_call(tx, "forceBatch", &call)),
        }
    } else {
        event.transactions
    };

    Ok(ForcedBatch {
        block_number,
        forced_batch_number: event.forceBatchNum,
        sequencer: event.sequencer,
        global_exit_root: event.lastGlobalExitRoot,
        raw_txs_data,
        forced_at: block_timestamp,
    })
}

/// Decodes a `SequenceBatches` log emitted by `tx` into the sequenced batches, in calldata
/// order. The log carries the number of the last batch of the sequence.
pub fn decode_sequenced_batches(
    log: &Log,
    tx: &L1TransactionInfo,
) -> EventDecodeResult<Vec<SequencedBatch>> {
    let event = decode_log::<SequenceBatches>(log, "SequenceBatches")?;
    let call = match decode_call(tx, "sequenceBatches")? {
        SequenceCall::SequenceBatches(call) => call,
        call => return Err(unexpected_call(tx, "sequenceBatches", &call)),
    };
    let numbers = batch_numbers(event.numBatch, call.batches.len())?;

    Ok(call
        .batches
        .into_iter()
        .zip(numbers)
        .map(|(data, batch_number)| SequencedBatch {
            batch_number,
            sequencer_addr: tx.from,
            tx_hash: tx.hash,
            nonce: tx.nonce,
            coinbase: call.l2Coinbase,
            data: data.into(),
        })
        .collect())
}

/// Decodes a `SequenceForceBatches` log emitted by `tx` into the sequenced forced batches, in
/// calldata order.
pub fn decode_sequenced_force_batches(
    log: &Log,
    tx: &L1TransactionInfo,
    block_timestamp: u64,
) -> EventDecodeResult<Vec<SequencedForceBatch>> {
    let event = decode_log::<SequenceForceBatches>(log, "SequenceForceBatches")?;
    let call = match decode_call(tx, "sequenceForceBatches")? {
        SequenceCall::SequenceForceBatches(call) => call,
        call => return Err(unexpected_call(tx, "sequenceForceBatches", &call)),
    };
    let numbers = batch_numbers(event.numBatch, call.batches.len())?;

    Ok(call
        .batches
        .into_iter()
        .zip(numbers)
        .map(|(data, batch_number)| SequencedForceBatch {
            batch_number,
            coinbase: tx.from,
            tx_hash: tx.hash,
            timestamp: block_timestamp,
            nonce: tx.nonce,
            data: data.into(),
        })
        .collect())
}

/// Decodes a `VerifyBatches` or `VerifyBatchesTrustedAggregator` log.
pub fn decode_verified_batch(log: &Log) -> EventDecodeResult<VerifiedBatch> {
    let (batch_number, state_root, aggregator) = match log.topics().first() {
        Some(&VerifyBatchesTrustedAggregator::SIGNATURE_HASH) => {
            let event = decode_log::<VerifyBatchesTrustedAggregator>(
                log,
                "VerifyBatchesTrustedAggregator",
            )?;
            (event.numBatch, event.stateRoot, event.aggregator)
        }
        _ => {
            let event = decode_log::<VerifyBatches>(log, "VerifyBatches")?;
            (event.numBatch, event.stateRoot, event.aggregator)
        }
    };

    Ok(VerifiedBatch {
        block_number: log.block_number.ok_or(EventDecodeError::MissingBlockNumber)?,
        batch_number,
        aggregator,
        state_root,
        tx_hash: log.transaction_hash.ok_or(EventDecodeError::MissingTransactionHash)?,
    })
}

/// Decodes an `UpdateZkEVMVersion` log.
pub fn decode_fork_id(log: &Log) -> EventDecodeResult<ForkId> {
    let event = decode_log::<UpdateZkEVMVersion>(log, "UpdateZkEVMVersion")?;
    Ok(ForkId::new(event.numBatch, event.forkID, event.version))
}

/// Returns the numbers of the `count` batches of a sequence ending at batch `last`.
fn batch_numbers(last: u64, count: usize) -> EventDecodeResult<RangeInclusive<u64>> {
    let Some(span) = count.checked_sub(1) else {
        return Ok(1..=0);
    };
    let first = u64::try_from(span)
        .ok()
        .and_then(|span| last.checked_sub(span))
        .ok_or(EventDecodeError::BatchNumberUnderflow { last, count })?;
    Ok(first..=last)
}

fn decode_log<T: SolEvent>(log: &Log, log_type: &'static str) -> EventDecodeResult<T> {
    Ok(T::decode_log(&log.inner)
        .map_err(|error| EventDecodeError::DecodeLogFailed { log_type, error })?
        .data)
}

fn decode_call(
    tx: &L1TransactionInfo,
    call_type: &'static str,
) -> EventDecodeResult<SequenceCall> {
    SequenceCall::abi_decode(&tx.input).map_err(|error| EventDecodeError::DecodeCallFailed {
        call_type,
        tx_hash: tx.hash,
        error,
    })
}

const fn unexpected_call(
    tx: &L1TransactionInfo,
    expected: &'static str,
    call: &SequenceCall,
) -> EventDecodeError {
    EventDecodeError::UnexpectedCall { expected, received: call.name(), tx_hash: tx.hash }
}
