//! Tracking of the unfinalized L1 chain for reorg detection.

use crate::{BlockInfo, BlockLink};
use std::collections::VecDeque;

/// The maximum count of unfinalized blocks we can have in Ethereum.
pub const MAX_UNFINALIZED_BLOCK_COUNT: usize = 96;

/// The outcome of applying a block to the [`UnfinalizedChain`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChainUpdate {
    /// The block extends the tip of the chain.
    Extended,
    /// The block is already part of the chain.
    Duplicate,
    /// The block is ahead of the tip, the blocks in between must be applied first.
    Gap {
        /// The next expected block number.
        expected: u64,
        /// The received block number.
        received: u64,
    },
    /// The parent of the block conflicts with the retained block at the same height. The parent
    /// must be fetched and applied before the block. The chain is left untouched.
    UnknownParent {
        /// The number of the parent block to fetch.
        number: u64,
    },
    /// The block, or the parent it conflicts with, is at or below the finalized block. The
    /// block is either a stale delivery of a finalized block or conflicts with finality. The
    /// chain is left untouched.
    BelowFinalized {
        /// The finalized block number.
        finalized: u64,
    },
    /// The block replaced part of the chain. The chain was rewound to the common ancestor and
    /// extended with the block.
    Reorg {
        /// The last block shared by both chains, if it is still retained.
        common_ancestor: Option<BlockInfo>,
        /// The amount of blocks discarded.
        depth: u64,
    },
}

/// A bounded chain of the latest unfinalized L1 blocks. Successive blocks are linked through
/// their parent hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfinalizedChain {
    links: VecDeque<BlockLink>,
    capacity: usize,
    finalized: Option<u64>,
}

impl Default for UnfinalizedChain {
    fn default() -> Self {
        Self::new(2 * MAX_UNFINALIZED_BLOCK_COUNT)
    }
}

impl UnfinalizedChain {
    /// Returns a new [`UnfinalizedChain`] retaining at most `capacity` blocks.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { links: VecDeque::with_capacity(capacity), capacity, finalized: None }
    }

    /// Returns the last finalized block number.
    pub const fn finalized(&self) -> Option<u64> {
        self.finalized
    }

    /// Returns the tip of the chain.
    pub fn tip(&self) -> Option<&BlockLink> {
        self.links.back()
    }

    /// Returns the oldest retained block.
    pub fn tail(&self) -> Option<&BlockLink> {
        self.links.front()
    }

    /// Returns the retained block at the provided number.
    pub fn get(&self, number: u64) -> Option<&BlockLink> {
        let tail = self.links.front()?.number;
        let index = usize::try_from(number.checked_sub(tail)?).ok()?;
        self.links.get(index)
    }

    /// Returns the amount of retained blocks.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if no block is retained.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Returns an iterator over the retained blocks, from the oldest to the tip.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, BlockLink> {
        self.links.iter()
    }

    /// Applies the block to the chain.
    pub fn apply(&mut self, link: BlockLink) -> ChainUpdate {
        if self.get(link.number).is_some_and(|retained| retained == &link) {
            return ChainUpdate::Duplicate;
        }

        if let Some(finalized) = self.finalized.filter(|finalized| link.number <= *finalized) {
            tracing::debug!(target: "zkevm::chain", number = link.number, hash = ?link.hash, finalized, "block at or below finalized block");
            return ChainUpdate::BelowFinalized { finalized };
        }

        let Some(tip) = self.links.back().copied() else {
            self.push(link);
            return ChainUpdate::Extended;
        };

        if tip.is_parent_of(&link) {
            self.push(link);
            return ChainUpdate::Extended;
        }

        let expected = tip.number.saturating_add(1);
        if link.number > expected {
            tracing::trace!(target: "zkevm::chain", expected, received = link.number, "block ahead of tip");
            return ChainUpdate::Gap { expected, received: link.number };
        }

        let parent_number = link.number.checked_sub(1);
        if let Some(parent) = parent_number.and_then(|n| self.get(n)).copied() {
            if parent.hash == link.parent_hash {
                return self.rewind_and_push(parent, link);
            }
            if let Some(finalized) = self.finalized.filter(|finalized| parent.number <= *finalized) {
                tracing::warn!(target: "zkevm::chain", number = link.number, parent_hash = ?link.parent_hash, finalized, "block conflicts with finalized block");
                return ChainUpdate::BelowFinalized { finalized };
            }
            tracing::trace!(target: "zkevm::chain", number = parent.number, retained = ?parent.hash, received = ?link.parent_hash, "parent hash conflict");
            return ChainUpdate::UnknownParent { number: parent.number };
        }

        // the block is older than the retained chain.
        let depth = self.links.len() as u64;
        tracing::warn!(target: "zkevm::chain", number = link.number, depth, "reorg past the retained chain");
        self.links.clear();
        self.push(link);
        ChainUpdate::Reorg { common_ancestor: None, depth }
    }

    /// Drains all blocks before the provided finalized block number. The finalized block itself
    /// is retained as the anchor of the chain. Blocks at or below it are no longer accepted.
    pub fn finalize(&mut self, finalized: u64) {
        if self.finalized.is_some_and(|current| current >= finalized) {
            return;
        }
        self.finalized = Some(finalized);

        let count = self.links.iter().take_while(|link| link.number < finalized).count();
        if count > 0 {
            tracing::trace!(target: "zkevm::chain", finalized, count, "draining finalized blocks");
            self.links.drain(..count);
        }
    }

    fn rewind_and_push(&mut self, ancestor: BlockLink, link: BlockLink) -> ChainUpdate {
        let retained = self.links.iter().take_while(|l| l.number <= ancestor.number).count();
        let depth = (self.links.len() - retained) as u64;
        tracing::warn!(target: "zkevm::chain", ancestor = %ancestor.info(), depth, "L1 reorg detected");

        self.links.truncate(retained);
        self.push(link);
        ChainUpdate::Reorg { common_ancestor: Some(ancestor.info()), depth }
    }

    fn push(&mut self, link: BlockLink) {
        if self.links.len() == self.capacity {
            self.links.pop_front();
        }
        self.links.push_back(link);
    }
}

impl<'a> IntoIterator for &'a UnfinalizedChain {
    type Item = &'a BlockLink;
    type IntoIter = std::collections::vec_deque::Iter<'a, BlockLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{chain, chain_from};
    use alloy_primitives::B256;

    fn unfinalized(links: &[BlockLink]) -> UnfinalizedChain {
        let mut chain = UnfinalizedChain::default();
        for link in links {
            assert_eq!(chain.apply(*link), ChainUpdate::Extended);
        }
        chain
    }

    #[test]
    fn test_should_extend_chain() {
        let links = chain(10, 20);
        let chain = unfinalized(&links);

        assert_eq!(chain.len(), 20);
        assert_eq!(chain.tip(), links.last());
        assert_eq!(chain.get(15), Some(&links[5]));
        assert_eq!(chain.get(9), None);
        assert_eq!(chain.get(30), None);
    }

    #[test]
    fn test_should_ignore_duplicate() {
        let links = chain(10, 5);
        let mut chain = unfinalized(&links);

        assert_eq!(chain.apply(links[2]), ChainUpdate::Duplicate);
        assert_eq!(chain.apply(links[4]), ChainUpdate::Duplicate);
        assert_eq!(chain.len(), 5);
    }

    #[test]
    fn test_should_detect_gap() {
        let links = chain(10, 5);
        let mut chain = unfinalized(&links[..3]);

        assert_eq!(chain.apply(links[4]), ChainUpdate::Gap { expected: 13, received: 14 });
        assert_eq!(chain.tip(), Some(&links[2]));
    }

    #[test]
    fn test_should_rewind_to_common_ancestor() {
        let links = chain(10, 10);
        let mut chain = unfinalized(&links);

        // fork from block 15.
        let fork = chain_from(links[5], 3);
        let update = chain.apply(fork[1]);

        assert_eq!(
            update,
            ChainUpdate::Reorg { common_ancestor: Some(links[5].info()), depth: 4 }
        );
        assert_eq!(chain.tip(), Some(&fork[1]));
        assert_eq!(chain.len(), 7);
        assert_eq!(chain.apply(fork[2]), ChainUpdate::Extended);
    }

    #[test]
    fn test_should_request_unknown_parent() {
        let links = chain(10, 10);
        let mut chain = unfinalized(&links);

        // fork from block 15, first observed at height 19.
        let fork = chain_from(links[5], 5);
        assert_eq!(chain.apply(fork[4]), ChainUpdate::UnknownParent { number: 18 });
        assert_eq!(chain.len(), 10);

        // walk back the fork until the common ancestor is found.
        assert_eq!(chain.apply(fork[3]), ChainUpdate::UnknownParent { number: 17 });
        assert_eq!(chain.apply(fork[2]), ChainUpdate::UnknownParent { number: 16 });
        assert_eq!(
            chain.apply(fork[1]),
            ChainUpdate::Reorg { common_ancestor: Some(links[5].info()), depth: 4 }
        );
        assert_eq!(chain.apply(fork[2]), ChainUpdate::Extended);
        assert_eq!(chain.apply(fork[3]), ChainUpdate::Extended);
        assert_eq!(chain.apply(fork[4]), ChainUpdate::Extended);
        assert_eq!(chain.tip(), Some(&fork[4]));
    }

    #[test]
    fn test_should_reset_on_reorg_past_retained_chain() {
        let links = chain(10, 5);
        let mut chain = unfinalized(&links);

        let old = BlockLink::new(10, B256::random(), B256::random());
        assert_eq!(chain.apply(old), ChainUpdate::Reorg { common_ancestor: None, depth: 5 });
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.tip(), Some(&old));
    }

    #[test]
    fn test_should_drain_finalized_blocks() {
        let links = chain(10, 10);
        let mut chain = unfinalized(&links);

        chain.finalize(14);
        assert_eq!(chain.tail(), Some(&links[4]));
        assert_eq!(chain.len(), 6);

        chain.finalize(5);
        assert_eq!(chain.len(), 6);
        assert_eq!(chain.finalized(), Some(14));
    }

    #[test]
    fn test_should_ignore_stale_finalized_block() {
        let links = chain(10, 10);
        let mut chain = unfinalized(&links);
        chain.finalize(14);

        // canonical block 13, delivered again after finalization.
        assert_eq!(chain.apply(links[3]), ChainUpdate::BelowFinalized { finalized: 14 });
        // the finalized anchor is still retained.
        assert_eq!(chain.apply(links[4]), ChainUpdate::Duplicate);

        assert_eq!(chain.len(), 6);
        assert_eq!(chain.tail(), Some(&links[4]));
        assert_eq!(chain.tip(), Some(&links[9]));
    }

    #[test]
    fn test_should_report_conflict_with_finalized_block() {
        let links = chain(10, 10);
        let mut chain = unfinalized(&links);
        chain.finalize(14);

        // a competing block at the finalized height.
        let conflicting = BlockLink::new(14, B256::random(), links[3].hash);
        assert_eq!(chain.apply(conflicting), ChainUpdate::BelowFinalized { finalized: 14 });

        // a child of a competing finalized block.
        let orphan = BlockLink::new(15, B256::random(), B256::random());
        assert_eq!(chain.apply(orphan), ChainUpdate::BelowFinalized { finalized: 14 });

        assert_eq!(chain.len(), 6);
        assert_eq!(chain.tip(), Some(&links[9]));
    }

    #[test]
    fn test_should_reorg_above_finalized_block() {
        let links = chain(10, 10);
        let mut chain = unfinalized(&links);
        chain.finalize(14);

        let fork = chain_from(links[4], 2);
        assert_eq!(
            chain.apply(fork[1]),
            ChainUpdate::Reorg { common_ancestor: Some(links[4].info()), depth: 5 }
        );
        assert_eq!(chain.tip(), Some(&fork[1]));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_should_reject_finalized_block_on_drained_chain() {
        let links = chain(10, 5);
        let mut chain = unfinalized(&links);
        chain.finalize(20);
        assert!(chain.is_empty());

        assert_eq!(chain.apply(links[4]), ChainUpdate::BelowFinalized { finalized: 20 });
        assert!(chain.is_empty());

        let next = BlockLink::new(21, B256::random(), B256::random());
        assert_eq!(chain.apply(next), ChainUpdate::Extended);
        assert_eq!(chain.tip(), Some(&next));
    }

    #[test]
    fn test_should_respect_capacity() {
        let links = chain(0, 10);
        let mut chain = UnfinalizedChain::new(4);
        for link in &links {
            chain.apply(*link);
        }

        assert_eq!(chain.len(), 4);
        assert_eq!(chain.tail(), Some(&links[6]));
        assert_eq!(chain.tip(), Some(&links[9]));
    }
}
