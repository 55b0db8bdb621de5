use alloy_eips::BlockNumberOrTag;
use alloy_primitives::I256;

/// Renders a block height as a JSON RPC block argument.
///
/// `None` is the latest block. Negative heights fitting an `i64` are the named tags of the
/// JSON RPC: `-1` for pending, `-2` for latest, `-3` for finalized and `-4` for safe. Any
/// other negative height cannot be represented and is rendered as `<invalid N>`.
pub fn block_number_arg(number: Option<I256>) -> String {
    let Some(number) = number else {
        return BlockNumberOrTag::Latest.to_string();
    };
    if !number.is_negative() {
        return format!("0x{:x}", number.into_raw());
    }

    match i64::try_from(number).ok().and_then(named_tag) {
        Some(tag) => tag.to_string(),
        None => {
            tracing::warn!(target: "zkevm::l1", %number, "unrepresentable block number argument");
            format!("<invalid {number}>")
        }
    }
}

/// Returns the tag encoded as a negative block number.
const fn named_tag(number: i64) -> Option<BlockNumberOrTag> {
    match number {
        -1 => Some(BlockNumberOrTag::Pending),
        -2 => Some(BlockNumberOrTag::Latest),
        -3 => Some(BlockNumberOrTag::Finalized),
        -4 => Some(BlockNumberOrTag::Safe),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(number: i64) -> String {
        block_number_arg(Some(I256::try_from(number).expect("i64 fits i256")))
    }

    #[test]
    fn test_should_render_latest_for_none() {
        assert_eq!(block_number_arg(None), "latest");
    }

    #[test]
    fn test_should_render_hex_for_positive() {
        assert_eq!(arg(1024), "0x400");
        assert_eq!(arg(0), "0x0");
        assert_eq!(arg(i64::MAX), "0x7fffffffffffffff");
        assert_eq!(block_number_arg(Some(I256::MAX)), format!("0x7{}", "f".repeat(63)));
    }

    #[test]
    fn test_should_render_named_tags() {
        assert_eq!(arg(-1), "pending");
        assert_eq!(arg(-2), "latest");
        assert_eq!(arg(-3), "finalized");
        assert_eq!(arg(-4), "safe");
    }

    #[test]
    fn test_should_render_invalid_for_unknown_negative() {
        assert_eq!(arg(-5), "<invalid -5>");
        assert_eq!(arg(i64::MIN), format!("<invalid {}>", i64::MIN));
    }

    #[test]
    fn test_should_render_invalid_for_large_negative() {
        let number = I256::MIN;
        assert_eq!(block_number_arg(Some(number)), format!("<invalid {number}>"));
        assert!(block_number_arg(Some(number)).starts_with("<invalid -5789604461865809771"));
    }
}
