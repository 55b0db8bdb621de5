use metrics::Counter;
use metrics_derive::Metrics;
use zkevm_primitives::L1Block;

/// The metrics for the [`super::L1BlockAssembler`].
#[derive(Clone, Metrics)]
#[metrics(scope = "l1_events")]
pub struct L1EventMetrics {
    /// A counter on the assembled blocks.
    pub blocks: Counter,
    /// A counter on the global exit root updates.
    pub global_exit_roots: Counter,
    /// A counter on the forced batches.
    pub forced_batches: Counter,
    /// A counter on the sequenced batches.
    pub sequenced_batches: Counter,
    /// A counter on the verified batches.
    pub verified_batches: Counter,
    /// A counter on the sequenced forced batches.
    pub sequenced_force_batches: Counter,
    /// A counter on the fork id changes.
    pub fork_ids: Counter,
}

impl L1EventMetrics {
    /// Processes an assembled block by updating the counters of each event kind.
    pub fn process_block(&self, block: &L1Block) {
        self.blocks.increment(1);
        self.global_exit_roots.increment(block.global_exit_roots().len() as u64);
        self.forced_batches.increment(block.forced_batches().len() as u64);
        self.sequenced_batches
            .increment(block.sequenced_batches().iter().map(Vec::len).sum::<usize>() as u64);
        self.verified_batches.increment(block.verified_batches().len() as u64);
        self.sequenced_force_batches
            .increment(block.sequenced_force_batches().iter().map(Vec::len).sum::<usize>() as u64);
        self.fork_ids.increment(block.fork_ids().len() as u64);
    }
}
