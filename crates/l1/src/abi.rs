/// The calls to the rollup contract the L1 synchronization decodes.
#[allow(missing_docs)]
pub mod calls;

/// The events emitted by the rollup and global exit root manager contracts.
#[allow(missing_docs)]
pub mod logs;
