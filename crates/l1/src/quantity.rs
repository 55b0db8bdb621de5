//! Decoding of hexadecimal quantities as returned by the L1 JSON RPC.
//!
//! Ethereum nodes encode quantities with a `0x` prefix while some Cosmos-SDK based L1 nodes
//! omit it. Both encodings are accepted.

use crate::DecodeError;
use alloy_primitives::U256;
use num_bigint::BigUint;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Decodes a hexadecimal quantity of any width, with or without the `0x` prefix.
pub fn decode_quantity(raw: &str) -> Result<BigUint, DecodeError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.is_empty() {
        return Err(DecodeError::Empty);
    }
    if let Some(character) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidCharacter { input: raw.to_string(), character });
    }
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or(DecodeError::Empty)
}

/// Decodes a hexadecimal quantity that must fit a [`U256`], with or without the `0x` prefix.
pub fn decode_quantity_u256(raw: &str) -> Result<U256, DecodeError> {
    let value = decode_quantity(raw)?;
    U256::try_from_be_slice(&value.to_bytes_be())
        .ok_or_else(|| DecodeError::Overflow { input: raw.to_string(), bits: U256::BITS })
}

/// Decodes a hexadecimal quantity that must fit a `u64`, with or without the `0x` prefix.
pub fn decode_quantity_u64(raw: &str) -> Result<u64, DecodeError> {
    let value = decode_quantity(raw)?;
    u64::try_from(&value).map_err(|_| DecodeError::Overflow { input: raw.to_string(), bits: 64 })
}

/// A quantity deserialized from a hexadecimal JSON string, with or without the `0x` prefix.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(pub BigUint);

impl Quantity {
    /// Returns the decoded value.
    pub const fn get(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for Quantity {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<U256> for Quantity {
    fn from(value: U256) -> Self {
        Self(BigUint::from_bytes_be(&value.to_be_bytes::<32>()))
    }
}

impl From<Quantity> for BigUint {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl FromStr for Quantity {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_quantity(s).map(Self)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Serde helpers for a `u64` encoded as a hexadecimal quantity, with or without the `0x`
/// prefix.
///
/// ```ignore
/// #[serde(with = "zkevm_l1::quantity::lenient_u64")]
/// number: u64,
/// ```
pub mod lenient_u64 {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Serializes the value as a `0x` prefixed quantity.
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{value:#x}"))
    }

    /// Deserializes a quantity, with or without the `0x` prefix.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        super::decode_quantity_u64(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_should_decode_with_and_without_prefix() -> eyre::Result<()> {
        assert_eq!(decode_quantity("0x1a")?, big(26));
        assert_eq!(decode_quantity("1a")?, big(26));
        assert_eq!(decode_quantity("0x1A")?, decode_quantity("1A")?);
        assert_eq!(decode_quantity("0x0")?, big(0));
        assert_eq!(decode_quantity("00ff")?, big(255));
        assert_eq!(decode_quantity(&format!("0x{}1", "0".repeat(100)))?, big(1));
        Ok(())
    }

    #[test]
    fn test_should_decode_beyond_256_bits() -> eyre::Result<()> {
        let raw = format!("0x1{}", "0".repeat(64));
        let value = decode_quantity(&raw)?;

        assert_eq!(value.bits(), 257);
        assert_eq!(value, BigUint::from(1u8) << 256u32);
        assert_eq!(Quantity(value).to_string(), raw);
        Ok(())
    }

    #[test]
    fn test_should_narrow_to_u256() -> eyre::Result<()> {
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(decode_quantity_u256(&max)?, U256::MAX);
        assert_eq!(decode_quantity_u256("0x0")?, U256::ZERO);
        assert_eq!(decode_quantity_u256(&format!("{}1a", "0".repeat(80)))?, U256::from(26));

        let raw = format!("0x1{}", "0".repeat(64));
        assert!(matches!(decode_quantity_u256(&raw), Err(DecodeError::Overflow { bits: 256, .. })));
        Ok(())
    }

    #[test]
    fn test_should_narrow_to_u64() {
        assert!(matches!(
            decode_quantity_u64("0x10000000000000000"),
            Err(DecodeError::Overflow { bits: 64, .. })
        ));
        assert_eq!(decode_quantity_u64("ffffffffffffffff"), Ok(u64::MAX));
        assert_eq!(decode_quantity_u64("0x400"), Ok(1024));
    }

    #[test]
    fn test_should_reject_empty() {
        assert_eq!(decode_quantity(""), Err(DecodeError::Empty));
        assert_eq!(decode_quantity("0x"), Err(DecodeError::Empty));
    }

    #[test]
    fn test_should_reject_non_hex() {
        for raw in ["0xzz", "xyz", "0x1g", "-1a", "+1a", "0X1a", " 1a", "1a ", "1_0"] {
            assert!(
                matches!(decode_quantity(raw), Err(DecodeError::InvalidCharacter { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_should_deserialize_json_string() -> eyre::Result<()> {
        let prefixed: Quantity = serde_json::from_str("\"0x1a\"")?;
        let bare: Quantity = serde_json::from_str("\"1a\"")?;

        assert_eq!(prefixed, bare);
        assert_eq!(prefixed.get(), &big(26));
        assert_eq!(serde_json::to_string(&prefixed)?, "\"0x1a\"");
        assert_eq!(Quantity::from(U256::from(26)), prefixed);
        Ok(())
    }

    #[test]
    fn test_should_reject_non_string_json() {
        assert!(serde_json::from_str::<Quantity>("26").is_err());
        assert!(serde_json::from_str::<Quantity>("\"\"").is_err());
        assert!(serde_json::from_str::<Quantity>("\"0xnope\"").is_err());
    }

    #[test]
    fn test_lenient_u64_roundtrip() -> eyre::Result<()> {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "lenient_u64")]
            number: u64,
        }

        let bare: Wrapper = serde_json::from_str(r#"{"number":"400"}"#)?;
        assert_eq!(bare, Wrapper { number: 1024 });
        assert_eq!(serde_json::to_string(&bare)?, r#"{"number":"0x400"}"#);
        Ok(())
    }
}
