use crate::BlockLink;
use alloy_primitives::B256;

/// Returns an arbitrary instance of the passed type.
#[macro_export]
macro_rules! random {
    ($typ: ty) => {{
        let mut bytes = Box::new([0u8; size_of::<$typ>()]);
        let mut rng = ::rand::rng();
        ::rand::RngCore::fill_bytes(&mut rng, bytes.as_mut_slice());
        let mut u = ::arbitrary::Unstructured::new(bytes.as_slice());
        <$typ>::arbitrary(&mut u).unwrap()
    }};
}

/// Returns a linked chain of `len` blocks starting at block number `start`.
pub fn chain(start: u64, len: usize) -> Vec<BlockLink> {
    chain_from(BlockLink::new(start, B256::random(), B256::random()), len)
}

/// Returns a linked chain of `len` blocks starting at the provided link, included.
pub fn chain_from(link: BlockLink, len: usize) -> Vec<BlockLink> {
    assert!(len >= 1, "chain should have a minimal length of one");

    let mut chain = Vec::with_capacity(len);
    chain.push(link);
    for i in 1..len {
        let parent = chain[i - 1];
        chain.push(BlockLink::new(parent.number + 1, B256::random(), parent.hash));
    }
    chain
}
