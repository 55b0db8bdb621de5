use crate::{
    ForcedBatch, ForkId, GlobalExitRoot, SequencedBatch, SequencedForceBatch, VerifiedBatch,
};
use alloy_primitives::B256;
use std::{
    fmt::{Display, Formatter},
    time::SystemTime,
};

/// Information about a block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct BlockInfo {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

impl BlockInfo {
    /// Returns a new instance of [`BlockInfo`].
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

impl Display for BlockInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockInfo {{ number: {}, hash: {} }}", self.number, self.hash)
    }
}

/// The position of a block in the chain: its number, its hash and the hash of its parent.
///
/// The hash is the one reported by the L1 node and is never recomputed from the header fields.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct BlockLink {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The hash of the parent block.
    pub parent_hash: B256,
}

impl BlockLink {
    /// Returns a new instance of [`BlockLink`].
    pub const fn new(number: u64, hash: B256, parent_hash: B256) -> Self {
        Self { number, hash, parent_hash }
    }

    /// Returns the [`BlockInfo`] of the link.
    pub const fn info(&self) -> BlockInfo {
        BlockInfo { number: self.number, hash: self.hash }
    }

    /// Returns true if `child` is the direct successor of this block.
    pub fn is_parent_of(&self, child: &Self) -> bool {
        self.number.checked_add(1) == Some(child.number) && child.parent_hash == self.hash
    }
}

/// The kind of an event observed in an L1 block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub enum EventKind {
    /// A global exit root update.
    GlobalExitRoot,
    /// A forced batch.
    ForcedBatch,
    /// The batches sequenced by a single L1 transaction.
    SequencedBatches,
    /// A verified batch.
    VerifiedBatch,
    /// The forced batches sequenced by a single L1 transaction.
    SequencedForceBatches,
    /// A fork id change.
    ForkId,
}

/// The emission order of an event in an [`L1Block`]: the event is located at `position` in the
/// collection for its `kind`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct EventOrder {
    /// The kind of the event.
    pub kind: EventKind,
    /// The position of the event in the collection of its kind.
    pub position: usize,
}

/// A borrowed event of an [`L1Block`], as yielded by [`L1Block::events`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum L1EventRef<'a> {
    /// A global exit root update.
    GlobalExitRoot(&'a GlobalExitRoot),
    /// A forced batch.
    ForcedBatch(&'a ForcedBatch),
    /// The batches sequenced by a single L1 transaction.
    SequencedBatches(&'a [SequencedBatch]),
    /// A verified batch.
    VerifiedBatch(&'a VerifiedBatch),
    /// The forced batches sequenced by a single L1 transaction.
    SequencedForceBatches(&'a [SequencedForceBatch]),
    /// A fork id change.
    ForkId(&'a ForkId),
}

/// An L1 block along with all the rollup events it contains.
///
/// Every collection is in emission order. Sequenced batches are grouped per L1 transaction: the
/// outer vector follows the transaction index in the block, the inner one the emission order in
/// the transaction. The block is complete at construction through [`L1BlockBuilder`] and
/// offers no way to append events afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1Block {
    link: BlockLink,
    received_at: SystemTime,
    global_exit_roots: Vec<GlobalExitRoot>,
    forced_batches: Vec<ForcedBatch>,
    sequenced_batches: Vec<Vec<SequencedBatch>>,
    verified_batches: Vec<VerifiedBatch>,
    sequenced_force_batches: Vec<Vec<SequencedForceBatch>>,
    fork_ids: Vec<ForkId>,
    order: Vec<EventOrder>,
}

impl L1Block {
    /// Returns a [`L1BlockBuilder`] for the block at the provided link.
    pub fn builder(link: BlockLink) -> L1BlockBuilder {
        L1BlockBuilder::new(link)
    }

    /// Returns the block number.
    pub const fn number(&self) -> u64 {
        self.link.number
    }

    /// Returns the block hash.
    pub const fn hash(&self) -> B256 {
        self.link.hash
    }

    /// Returns the parent hash.
    pub const fn parent_hash(&self) -> B256 {
        self.link.parent_hash
    }

    /// Returns the [`BlockLink`] of the block.
    pub const fn link(&self) -> BlockLink {
        self.link
    }

    /// Returns the [`BlockInfo`] of the block.
    pub const fn info(&self) -> BlockInfo {
        self.link.info()
    }

    /// Returns the time at which the block was received.
    pub const fn received_at(&self) -> SystemTime {
        self.received_at
    }

    /// Returns the global exit roots.
    pub fn global_exit_roots(&self) -> &[GlobalExitRoot] {
        &self.global_exit_roots
    }

    /// Returns the forced batches.
    pub fn forced_batches(&self) -> &[ForcedBatch] {
        &self.forced_batches
    }

    /// Returns the sequenced batches, grouped per L1 transaction.
    pub fn sequenced_batches(&self) -> &[Vec<SequencedBatch>] {
        &self.sequenced_batches
    }

    /// Returns the verified batches.
    pub fn verified_batches(&self) -> &[VerifiedBatch] {
        &self.verified_batches
    }

    /// Returns the sequenced forced batches, grouped per L1 transaction.
    pub fn sequenced_force_batches(&self) -> &[Vec<SequencedForceBatch>] {
        &self.sequenced_force_batches
    }

    /// Returns the fork id changes.
    pub fn fork_ids(&self) -> &[ForkId] {
        &self.fork_ids
    }

    /// Returns the emission order of the events across all kinds.
    pub fn order(&self) -> &[EventOrder] {
        &self.order
    }

    /// Returns true if the block contains no event.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if `child` is the direct successor of this block.
    pub fn is_parent_of(&self, child: &Self) -> bool {
        self.link.is_parent_of(&child.link)
    }

    /// Returns an iterator over the events of the block, in emission order across all kinds.
    pub fn events(&self) -> impl Iterator<Item = L1EventRef<'_>> + '_ {
        self.order.iter().filter_map(|order| {
            let position = order.position;
            Some(match order.kind {
                EventKind::GlobalExitRoot => {
                    L1EventRef::GlobalExitRoot(self.global_exit_roots.get(position)?)
                }
                EventKind::ForcedBatch => {
                    L1EventRef::ForcedBatch(self.forced_batches.get(position)?)
                }
                EventKind::SequencedBatches => {
                    L1EventRef::SequencedBatches(self.sequenced_batches.get(position)?)
                }
                EventKind::VerifiedBatch => {
                    L1EventRef::VerifiedBatch(self.verified_batches.get(position)?)
                }
                EventKind::SequencedForceBatches => {
                    L1EventRef::SequencedForceBatches(self.sequenced_force_batches.get(position)?)
                }
                EventKind::ForkId => L1EventRef::ForkId(self.fork_ids.get(position)?),
            })
        })
    }
}

impl Display for L1Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "L1Block {{ number: {}, hash: {}, events: {} }}",
            self.link.number,
            self.link.hash,
            self.order.len()
        )
    }
}

/// A builder for an [`L1Block`]. Events must be pushed in emission order.
#[derive(Debug)]
pub struct L1BlockBuilder {
    block: L1Block,
}

impl L1BlockBuilder {
    /// Returns a new [`L1BlockBuilder`] for the block at the provided link, received now.
    pub fn new(link: BlockLink) -> Self {
        Self {
            block: L1Block {
                link,
                received_at: SystemTime::now(),
                global_exit_roots: Vec::new(),
                forced_batches: Vec::new(),
                sequenced_batches: Vec::new(),
                verified_batches: Vec::new(),
                sequenced_force_batches: Vec::new(),
                fork_ids: Vec::new(),
                order: Vec::new(),
            },
        }
    }

    /// Sets the time at which the block was received.
    pub const fn with_received_at(mut self, received_at: SystemTime) -> Self {
        self.block.received_at = received_at;
        self
    }

    /// Pushes a global exit root.
    pub fn push_global_exit_root(&mut self, root: GlobalExitRoot) -> &mut Self {
        self.record(EventKind::GlobalExitRoot, self.block.global_exit_roots.len());
        self.block.global_exit_roots.push(root);
        self
    }

    /// Pushes a forced batch.
    pub fn push_forced_batch(&mut self, batch: ForcedBatch) -> &mut Self {
        self.record(EventKind::ForcedBatch, self.block.forced_batches.len());
        self.block.forced_batches.push(batch);
        self
    }

    /// Pushes the batches sequenced by a single L1 transaction.
    pub fn push_sequenced_batches(&mut self, batches: Vec<SequencedBatch>) -> &mut Self {
        self.record(EventKind::SequencedBatches, self.block.sequenced_batches.len());
        self.block.sequenced_batches.push(batches);
        self
    }

    /// Pushes a verified batch.
    pub fn push_verified_batch(&mut self, batch: VerifiedBatch) -> &mut Self {
        self.record(EventKind::VerifiedBatch, self.block.verified_batches.len());
        self.block.verified_batches.push(batch);
        self
    }

    /// Pushes the forced batches sequenced by a single L1 transaction.
    pub fn push_sequenced_force_batches(
        &mut self,
        batches: Vec<SequencedForceBatch>,
    ) -> &mut Self {
        self.record(EventKind::SequencedForceBatches, self.block.sequenced_force_batches.len());
        self.block.sequenced_force_batches.push(batches);
        self
    }

    /// Pushes a fork id change.
    pub fn push_fork_id(&mut self, fork_id: ForkId) -> &mut Self {
        self.record(EventKind::ForkId, self.block.fork_ids.len());
        self.block.fork_ids.push(fork_id);
        self
    }

    /// Returns the completed [`L1Block`].
    pub fn build(self) -> L1Block {
        self.block
    }

    fn record(&mut self, kind: EventKind, position: usize) {
        self.block.order.push(EventOrder { kind, position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{random, BatchData};
    use arbitrary::Arbitrary;

    fn sequenced(batch_number: u64, tx_hash: B256) -> SequencedBatch {
        SequencedBatch {
            batch_number,
            tx_hash,
            data: BatchData { timestamp: batch_number, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn test_should_link_successive_blocks() {
        let parent = random!(BlockLink);
        let parent = BlockLink { number: 100, ..parent };
        let child = L1Block::builder(BlockLink::new(101, B256::random(), parent.hash)).build();
        let parent = L1Block::builder(parent).build();

        assert!(parent.is_parent_of(&child));
    }

    #[test]
    fn test_should_not_link_on_parent_hash_mismatch() {
        let parent = L1Block::builder(BlockLink::new(100, B256::random(), B256::random())).build();
        let child = L1Block::builder(BlockLink::new(101, B256::random(), B256::random())).build();

        assert!(!parent.is_parent_of(&child));
    }

    #[test]
    fn test_should_not_link_on_number_gap() {
        let parent = BlockLink::new(100, B256::random(), B256::random());
        let child = BlockLink::new(102, B256::random(), parent.hash);
        assert!(!parent.is_parent_of(&child));

        let max = BlockLink::new(u64::MAX, B256::random(), B256::random());
        let wrapped = BlockLink::new(0, B256::random(), max.hash);
        assert!(!max.is_parent_of(&wrapped));
    }

    #[test]
    fn test_should_preserve_sequenced_batches_grouping() {
        const TXS: u64 = 4;
        const BATCHES_PER_TX: u64 = 3;

        let mut builder = L1Block::builder(random!(BlockLink));
        let mut expected = Vec::new();
        for tx in 0..TXS {
            let tx_hash = B256::with_last_byte(tx as u8);
            let batches = (0..BATCHES_PER_TX)
                .map(|i| sequenced(tx * BATCHES_PER_TX + i, tx_hash))
                .collect::<Vec<_>>();
            expected.push(batches.clone());
            builder.push_sequenced_batches(batches);
        }
        let block = builder.build();

        assert_eq!(block.sequenced_batches().len(), TXS as usize);
        for (group, expected) in block.sequenced_batches().iter().zip(&expected) {
            assert_eq!(group.len(), BATCHES_PER_TX as usize);
            assert_eq!(group, expected);
        }
        let numbers = block.sequenced_batches().iter().flatten().map(|b| b.batch_number);
        assert!(numbers.eq(0..TXS * BATCHES_PER_TX));
    }

    #[test]
    fn test_should_replay_events_in_emission_order() {
        let root = random!(GlobalExitRoot);
        let verified = random!(VerifiedBatch);
        let fork = ForkId::new(12, 5, "v2.0.0-RC1-fork.5");
        let batches = vec![sequenced(1, B256::ZERO), sequenced(2, B256::ZERO)];

        let mut builder = L1Block::builder(random!(BlockLink));
        builder
            .push_sequenced_batches(batches.clone())
            .push_global_exit_root(root)
            .push_verified_batch(verified)
            .push_fork_id(fork.clone());
        let block = builder.build();

        let events = block.events().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                L1EventRef::SequencedBatches(&batches),
                L1EventRef::GlobalExitRoot(&root),
                L1EventRef::VerifiedBatch(&verified),
                L1EventRef::ForkId(&fork),
            ]
        );
        assert_eq!(block.order().len(), 4);
        assert!(!block.is_empty());
    }

    #[test]
    fn test_empty_block() {
        let link = random!(BlockLink);
        let block = L1Block::builder(link).build();

        assert!(block.is_empty());
        assert_eq!(block.link(), link);
        assert_eq!(block.info(), link.info());
        assert_eq!(block.events().count(), 0);
    }
}
