// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address canonicalization.
//!
//! Every address that crosses the public surface (query parameters, the
//! tracked-pool registry, JSON output) is rendered as `0x` followed by 40
//! lowercase hex digits. Because the rendering is fixed-width and lowercase,
//! lexicographic order on the canonical string is exactly the byte order of
//! the underlying [`Address`], so side assignment can compare addresses
//! directly.

use alloy_primitives::{hex, Address};
use serde::Serializer;

use crate::errors::SwapscanError;

/// Parse and validate an address-like string.
///
/// Accepts an optional `0x`/`0X` prefix followed by exactly 40 hex digits of
/// any case. Checksums are not enforced: the canonical form is lowercase.
///
/// # Examples
///
/// ```
/// use swapscan::address::parse_address;
///
/// let addr = parse_address("0x7507C1DC16935B82698E4C63F2746A5FCF994DF8").unwrap();
/// assert_eq!(
///     swapscan::address::canonical(&addr),
///     "0x7507c1dc16935b82698e4c63f2746a5fcf994df8"
/// );
///
/// assert!(parse_address("0x1234").is_err());
/// ```
pub fn parse_address(input: &str) -> Result<Address, SwapscanError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SwapscanError::invalid_address(input));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| SwapscanError::invalid_address(input))?;
    Ok(Address::from(bytes))
}

/// Canonical lowercase rendering of an address.
pub fn canonical(address: &Address) -> String {
    hex::encode_prefixed(address)
}

/// Normalize any address-like string to its canonical form.
pub fn canonicalize(input: &str) -> Result<String, SwapscanError> {
    parse_address(input).map(|address| canonical(&address))
}

/// Order two addresses under canonical ordering, lowest first.
///
/// This is the rule that decides which asset of a pool is `asset0`.
pub fn canonical_pair(a: Address, b: Address) -> (Address, Address) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Serde helper rendering an address in canonical form.
///
/// Used with `#[serde(serialize_with = "...")]` on wire types so the output
/// never depends on how the address type formats itself.
pub fn serialize_canonical<S: Serializer>(
    address: &Address,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&canonical(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use proptest::prelude::*;

    #[test]
    fn accepts_mixed_case_and_missing_prefix() {
        let expected = "0xfc363be22236d5034381b08e17c4e763b8334c79";
        assert_eq!(
            canonicalize("0xFC363BE22236d5034381b08e17c4e763b8334c79").unwrap(),
            expected
        );
        assert_eq!(
            canonicalize("fc363be22236d5034381b08e17c4e763b8334c79").unwrap(),
            expected
        );
        assert_eq!(
            canonicalize("0XFC363BE22236D5034381B08E17C4E763B8334C79").unwrap(),
            expected
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "0x",
            "0x123",
            "0xzz363be22236d5034381b08e17c4e763b8334c79",
            "0xfc363be22236d5034381b08e17c4e763b8334c7900",
            "not an address",
        ] {
            let err = parse_address(bad).unwrap_err();
            assert!(
                matches!(err, SwapscanError::InvalidAddress { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn canonical_pair_orders_lowest_first() {
        let token = address!("07974f37167524b0b56da29b5b437014c5626797");
        let wbera = address!("6969696969696969696969696969696969696969");
        assert_eq!(canonical_pair(wbera, token), (token, wbera));
        assert_eq!(canonical_pair(token, wbera), (token, wbera));
    }

    proptest! {
        #[test]
        fn byte_order_matches_canonical_string_order(
            a in any::<[u8; 20]>(),
            b in any::<[u8; 20]>(),
        ) {
            let (a, b) = (Address::from(a), Address::from(b));
            prop_assert_eq!(a.cmp(&b), canonical(&a).cmp(&canonical(&b)));
        }

        #[test]
        fn canonicalize_is_idempotent(bytes in any::<[u8; 20]>()) {
            let once = canonical(&Address::from(bytes));
            let twice = canonicalize(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
