use crate::abi::logs::EVENT_SIGNATURES;
use alloy_rpc_types_eth::Filter;
use zkevm_primitives::L1AddressBook;

/// Returns the log filter on the rollup events emitted in the block range
/// \[`from_block`; `to_block`\].
pub fn event_filter(address_book: &L1AddressBook, from_block: u64, to_block: u64) -> Filter {
    let filter = Filter::new()
        .address(vec![
            address_book.rollup_contract_address,
            address_book.global_exit_root_manager_address,
        ])
        .event_signature(EVENT_SIGNATURES.to_vec())
        .from_block(from_block)
        .to_block(to_block);

    tracing::trace!(target: "zkevm::l1", ?filter, "built rollup events filter");

    filter
}
