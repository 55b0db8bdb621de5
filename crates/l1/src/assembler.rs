use crate::{
    abi::logs::{
        ForceBatch, SequenceBatches, SequenceForceBatches, UpdateGlobalExitRoot,
        UpdateZkEVMVersion, VerifyBatches, VerifyBatchesTrustedAggregator,
    },
    decode::{
        decode_fork_id, decode_forced_batch, decode_global_exit_root, decode_sequenced_batches,
        decode_sequenced_force_batches, decode_verified_batch, L1TransactionInfo,
    },
    error::EventDecodeResult,
    EventDecodeError, L1EventMetrics, OverriddenHeader,
};
use alloy_consensus::BlockHeader;
use alloy_primitives::B256;
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use std::{collections::HashMap, time::SystemTime};
use zkevm_primitives::L1Block;

/// Assembles the rollup events emitted in an L1 block into a complete [`L1Block`].
#[derive(Debug, Default, Clone)]
pub struct L1BlockAssembler {
    metrics: L1EventMetrics,
}

impl L1BlockAssembler {
    /// Returns a new [`L1BlockAssembler`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles the block identified by `header`, received now.
    ///
    /// `logs` are the rollup logs of the block, in any order. `transactions` must contain every
    /// transaction emitting a log which requires its sender or calldata: forced batches and
    /// sequenced batches.
    pub fn assemble<H: BlockHeader>(
        &self,
        header: &OverriddenHeader<H>,
        logs: &[Log],
        transactions: &HashMap<B256, L1TransactionInfo>,
    ) -> EventDecodeResult<L1Block> {
        self.assemble_at(header, logs, transactions, SystemTime::now())
    }

    /// Assembles the block identified by `header`, received at `received_at`.
    #[tracing::instrument(
        target = "zkevm::l1",
        skip_all,
        fields(number = header.number(), hash = ?header.hash(), logs = logs.len())
    )]
    pub fn assemble_at<H: BlockHeader>(
        &self,
        header: &OverriddenHeader<H>,
        logs: &[Log],
        transactions: &HashMap<B256, L1TransactionInfo>,
        received_at: SystemTime,
    ) -> EventDecodeResult<L1Block> {
        let link = header.link();
        let timestamp = header.inner().timestamp();

        // order the logs by their index in the block.
        let mut ordered = Vec::with_capacity(logs.len());
        for log in logs {
            if log.removed {
                tracing::trace!(target: "zkevm::l1", tx_hash = ?log.transaction_hash, "skipping removed log");
                continue;
            }
            let block_hash = log.block_hash.ok_or(EventDecodeError::MissingBlockHash)?;
            if block_hash != link.hash {
                return Err(EventDecodeError::ForeignLog { expected: link.hash, received: block_hash });
            }
            let log_index = log.log_index.ok_or(EventDecodeError::MissingLogIndex)?;
            ordered.push((log_index, log));
        }
        ordered.sort_unstable_by_key(|(log_index, _)| *log_index);
        if let Some(window) = ordered.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(EventDecodeError::DuplicateLogIndex(window[0].0));
        }

        let mut builder = L1Block::builder(link).with_received_at(received_at);
        for (log_index, log) in ordered {
            match log.topics().first() {
                Some(&UpdateGlobalExitRoot::SIGNATURE_HASH) => {
                    builder.push_global_exit_root(decode_global_exit_root(log)?);
                }
                Some(&ForceBatch::SIGNATURE_HASH) => {
                    let tx = transaction(log, transactions)?;
                    builder.push_forced_batch(decode_forced_batch(log, tx, timestamp)?);
                }
                Some(&SequenceBatches::SIGNATURE_HASH) => {
                    let tx = transaction(log, transactions)?;
                    builder.push_sequenced_batches(decode_sequenced_batches(log, tx)?);
                }
                Some(&SequenceForceBatches::SIGNATURE_HASH) => {
                    let tx = transaction(log, transactions)?;
                    builder.push_sequenced_force_batches(decode_sequenced_force_batches(
                        log, tx, timestamp,
                    )?);
                }
                Some(
                    &VerifyBatches::SIGNATURE_HASH
                    | &VerifyBatchesTrustedAggregator::SIGNATURE_HASH,
                ) => {
                    builder.push_verified_batch(decode_verified_batch(log)?);
                }
                Some(&UpdateZkEVMVersion::SIGNATURE_HASH) => {
                    builder.push_fork_id(decode_fork_id(log)?);
                }
                signature => {
                    tracing::debug!(target: "zkevm::l1", log_index, ?signature, "skipping unregistered event");
                }
            }
        }

        let block = builder.build();
        self.metrics.process_block(&block);
        tracing::trace!(target: "zkevm::l1", %block, "assembled L1 block");

        Ok(block)
    }
}

/// Returns the transaction which emitted the log.
fn transaction<'a>(
    log: &Log,
    transactions: &'a HashMap<B256, L1TransactionInfo>,
) -> EventDecodeResult<&'a L1TransactionInfo> {
    let tx_hash = log.transaction_hash.ok_or(EventDecodeError::MissingTransactionHash)?;
    transactions.get(&tx_hash).ok_or(EventDecodeError::MissingTransaction(tx_hash))
}
