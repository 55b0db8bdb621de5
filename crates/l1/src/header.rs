//! L1 headers and blocks whose identity is the hash reported by the L1 node.
//!
//! Some L1 compatible chains report a block hash that cannot be recomputed from the header
//! fields returned by their RPC. Reorg detection relies on the reported hash, so these wrappers
//! carry it explicitly instead of hashing the header.

use alloy_consensus::BlockHeader;
use alloy_primitives::B256;
use std::ops::Deref;
use zkevm_primitives::{BlockInfo, BlockLink};

/// The Ethereum L1 header.
pub type Header = alloy_consensus::Header;

/// The Ethereum L1 block.
pub type Block = alloy_consensus::Block<alloy_consensus::TxEnvelope>;

/// A header along with the hash identifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverriddenHeader<H = Header> {
    inner: H,
    hash: B256,
}

impl<H> OverriddenHeader<H> {
    /// Returns a new [`OverriddenHeader`]. The hash is not checked against the header.
    pub const fn new(inner: H, hash: B256) -> Self {
        Self { inner, hash }
    }

    /// Returns the hash identifying the header.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Returns the wrapped header.
    pub const fn inner(&self) -> &H {
        &self.inner
    }

    /// Consumes the wrapper, returning the header.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: BlockHeader> OverriddenHeader<H> {
    /// Returns the [`BlockLink`] of the header.
    pub fn link(&self) -> BlockLink {
        BlockLink::new(self.inner.number(), self.hash, self.inner.parent_hash())
    }

    /// Returns the [`BlockInfo`] of the header.
    pub fn info(&self) -> BlockInfo {
        BlockInfo::new(self.inner.number(), self.hash)
    }
}

impl<H> Deref for OverriddenHeader<H> {
    type Target = H;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<H> From<alloy_rpc_types_eth::Header<H>> for OverriddenHeader<H> {
    fn from(value: alloy_rpc_types_eth::Header<H>) -> Self {
        Self::new(value.inner, value.hash)
    }
}

impl<H: BlockHeader> From<&OverriddenHeader<H>> for BlockLink {
    fn from(value: &OverriddenHeader<H>) -> Self {
        value.link()
    }
}

/// A block along with the hash identifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverriddenBlock<B = Block> {
    inner: B,
    hash: B256,
}

impl<B> OverriddenBlock<B> {
    /// Returns a new [`OverriddenBlock`]. The hash is not checked against the block header.
    pub const fn new(inner: B, hash: B256) -> Self {
        Self { inner, hash }
    }

    /// Returns the hash identifying the block.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Returns the wrapped block.
    pub const fn inner(&self) -> &B {
        &self.inner
    }

    /// Consumes the wrapper, returning the block.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<T, H: BlockHeader + Clone> OverriddenBlock<alloy_consensus::Block<T, H>> {
    /// Returns the header of the block, identified by the block hash.
    pub fn header(&self) -> OverriddenHeader<H> {
        OverriddenHeader::new(self.inner.header.clone(), self.hash)
    }

    /// Returns the [`BlockLink`] of the block.
    pub fn link(&self) -> BlockLink {
        BlockLink::new(self.inner.header.number(), self.hash, self.inner.header.parent_hash())
    }
}

impl<B> Deref for OverriddenBlock<B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// The block identity returned by Ethermint based L1 nodes, which may omit the `0x` prefix of
/// the block number.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthermintBlock {
    /// The block number.
    #[serde(with = "crate::quantity::lenient_u64")]
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The parent hash.
    pub parent_hash: B256,
}

impl From<EthermintBlock> for BlockLink {
    fn from(value: EthermintBlock) -> Self {
        Self::new(value.number, value.hash, value.parent_hash)
    }
}
