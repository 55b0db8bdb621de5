//! A library containing the logic required to read the rollup events from L1.

pub mod abi;

pub use assembler::L1BlockAssembler;
mod assembler;

pub use block_id::block_number_arg;
mod block_id;

pub use decode::{
    decode_fork_id, decode_forced_batch, decode_global_exit_root, decode_sequenced_batches,
    decode_sequenced_force_batches, decode_verified_batch, L1TransactionInfo,
};
mod decode;

pub use error::{DecodeError, EventDecodeError, EventDecodeResult};
mod error;

pub use filter::event_filter;
mod filter;

pub use header::{Block, EthermintBlock, Header, OverriddenBlock, OverriddenHeader};
mod header;

pub use metrics::L1EventMetrics;
mod metrics;

pub use quantity::{decode_quantity, decode_quantity_u256, decode_quantity_u64, Quantity};
pub mod quantity;
