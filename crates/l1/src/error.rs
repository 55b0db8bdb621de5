use alloy_primitives::B256;

/// A [`Result`] that uses [`EventDecodeError`] as the error type.
pub type EventDecodeResult<T> = Result<T, EventDecodeError>;

/// An error decoding a hexadecimal quantity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The quantity has no digits.
    #[error("empty hex quantity")]
    Empty,
    /// The quantity contains a non hexadecimal character.
    #[error("invalid character {character:?} in hex quantity {input:?}")]
    InvalidCharacter {
        /// The raw quantity.
        input: String,
        /// The first invalid character.
        character: char,
    },
    /// The quantity does not fit the target integer.
    #[error("hex quantity {input:?} overflows {bits} bits")]
    Overflow {
        /// The raw quantity.
        input: String,
        /// The width of the target integer.
        bits: usize,
    },
}

/// An error occurring while decoding the rollup events of an L1 block.
#[derive(Debug, thiserror::Error)]
pub enum EventDecodeError {
    /// The log is missing a block hash.
    #[error("missing block hash for log")]
    MissingBlockHash,
    /// The log is missing a block number.
    #[error("missing block number for log")]
    MissingBlockNumber,
    /// The log is missing a transaction hash.
    #[error("missing transaction hash for log")]
    MissingTransactionHash,
    /// The log is missing its index in the block.
    #[error("missing log index for log")]
    MissingLogIndex,
    /// Two logs of the block share the same log index.
    #[error("duplicate log index {0}")]
    DuplicateLogIndex(u64),
    /// The log was emitted in another block than the one being assembled.
    #[error("log from block {received} does not belong to block {expected}")]
    ForeignLog {
        /// The hash of the block being assembled.
        expected: B256,
        /// The block hash of the log.
        received: B256,
    },
    /// The transaction emitting the log was not provided.
    #[error("unknown transaction {0}")]
    MissingTransaction(B256),
    /// The log could not be decoded.
    #[error("failed to decode {log_type} log: {error}")]
    DecodeLogFailed {
        /// The expected event.
        log_type: &'static str,
        /// The decoding error.
        #[source]
        error: alloy_sol_types::Error,
    },
    /// The calldata of the transaction emitting the log could not be decoded.
    #[error("failed to decode {call_type} calldata of transaction {tx_hash}: {error}")]
    DecodeCallFailed {
        /// The expected call.
        call_type: &'static str,
        /// The hash of the transaction.
        tx_hash: B256,
        /// The decoding error.
        #[source]
        error: alloy_sol_types::Error,
    },
    /// The transaction emitting the log called another function than the one emitting it.
    #[error("expected {expected} call in transaction {tx_hash}, got {received}")]
    UnexpectedCall {
        /// The expected call.
        expected: &'static str,
        /// The decoded call.
        received: &'static str,
        /// The hash of the transaction.
        tx_hash: B256,
    },
    /// More batches were sequenced than the last sequenced batch number allows.
    #[error("sequenced {count} batches up to batch {last}")]
    BatchNumberUnderflow {
        /// The last sequenced batch number.
        last: u64,
        /// The amount of sequenced batches.
        count: usize,
    },
}
