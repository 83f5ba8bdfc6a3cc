use std::fmt;
use std::str::{self, FromStr};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Identifier of one object in a content-addressed store.
///
/// A `BlobId` is the fixed-length lowercase-hexadecimal name under which the
/// external object store files a message blob (a 20-byte digest rendered as
/// 40 hex characters). maildex never computes these itself — the store is the
/// only authority — so the type is an opaque, immutable key: equality is
/// exact character equality.
///
/// Stored as the 40 ASCII bytes rather than the decoded digest because every
/// consumer (command arguments, listing lines, log output, the index) speaks
/// the hex form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobId([u8; Self::LEN]);

impl BlobId {
    /// Length of the hexadecimal form, in characters.
    pub const LEN: usize = 40;

    /// Parse an identifier from text.
    ///
    /// The input must be exactly [`BlobId::LEN`] lowercase hex characters;
    /// anything else is rejected. Callers holding mixed-case input must
    /// lowercase it first.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Self::from_hex_bytes(s.as_bytes())
    }

    /// Parse an identifier from raw bytes (e.g. the prefix of a listing line).
    pub fn from_hex_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        if bytes.len() != Self::LEN {
            return Err(TypeError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let mut id = [0u8; Self::LEN];
        for (i, &b) in bytes.iter().enumerate() {
            if !matches!(b, b'0'..=b'9' | b'a'..=b'f') {
                return Err(TypeError::InvalidHex(format!(
                    "expected lowercase hex digit at offset {i}"
                )));
            }
            id[i] = b;
        }
        Ok(Self(id))
    }

    /// Hex-encode a raw 20-byte digest into an identifier.
    pub fn from_bytes(digest: &[u8; 20]) -> Self {
        let encoded = hex::encode(digest);
        let mut id = [0u8; Self::LEN];
        id.copy_from_slice(encoded.as_bytes());
        Self(id)
    }

    /// The full hexadecimal form.
    pub fn as_str(&self) -> &str {
        // Constructors only admit ASCII hex digits.
        str::from_utf8(&self.0).expect("blob id is ascii hex")
    }

    /// Short form (first 8 characters), for log lines.
    pub fn short(&self) -> &str {
        &self.as_str()[..8]
    }

    /// Bucket selector derived from the first 8 hex digits.
    ///
    /// Packs each digit as a 4-bit nibble into a `u32`, first character in
    /// the lowest nibble. Adequate distribution comes for free because the
    /// identifiers are uniform digests; this is NOT a cryptographic hash.
    pub fn bucket_hash(&self) -> u32 {
        fn nibble(b: u8) -> u32 {
            if b >= b'a' {
                u32::from(b - b'a') + 10
            } else {
                u32::from(b - b'0')
            }
        }
        let mut h = 0u32;
        for (i, &b) in self.0[..8].iter().enumerate() {
            h |= nibble(b) << (4 * i as u32);
        }
        h
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.short())
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlobId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized as the hex string: 40-element byte arrays have no derived serde
// impls, and the string form is what every external surface exchanges anyway.
impl Serialize for BlobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SAMPLE: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn parse_roundtrips_through_as_str() {
        let id = BlobId::parse(SAMPLE).unwrap();
        assert_eq!(id.as_str(), SAMPLE);
        assert_eq!(id.to_string(), SAMPLE);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let result = BlobId::parse("abc123");
        assert_eq!(
            result,
            Err(TypeError::InvalidLength {
                expected: 40,
                actual: 6
            })
        );
        assert!(BlobId::parse(&"a".repeat(41)).is_err());
    }

    #[test]
    fn parse_rejects_uppercase() {
        let upper = SAMPLE.to_uppercase();
        assert!(matches!(
            BlobId::parse(&upper),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn parse_rejects_non_hex() {
        let mut s = SAMPLE.to_string();
        s.replace_range(12..13, "g");
        assert!(matches!(BlobId::parse(&s), Err(TypeError::InvalidHex(_))));
    }

    #[test]
    fn from_hex_bytes_rejects_binary_junk() {
        let mut bytes = [b'a'; 40];
        bytes[0] = 0xff;
        assert!(BlobId::from_hex_bytes(&bytes).is_err());
    }

    #[test]
    fn from_bytes_encodes_lowercase_hex() {
        let id = BlobId::from_bytes(&[0xab; 20]);
        assert_eq!(id.as_str(), "ab".repeat(20));
    }

    #[test]
    fn short_is_first_8_chars() {
        let id = BlobId::parse(SAMPLE).unwrap();
        assert_eq!(id.short(), "01234567");
    }

    #[test]
    fn debug_uses_short_form() {
        let id = BlobId::parse(SAMPLE).unwrap();
        assert_eq!(format!("{id:?}"), "BlobId(01234567)");
    }

    #[test]
    fn bucket_hash_packs_first_char_lowest() {
        // Digits 0..7 in order: nibble i lands at bit 4*i.
        let id = BlobId::parse(SAMPLE).unwrap();
        assert_eq!(id.bucket_hash(), 0x7654_3210);

        let all_f = BlobId::parse(&"f".repeat(40)).unwrap();
        assert_eq!(all_f.bucket_hash(), 0xffff_ffff);

        let mut tail_one = "0".repeat(40);
        tail_one.replace_range(7..8, "1");
        let id = BlobId::parse(&tail_one).unwrap();
        assert_eq!(id.bucket_hash(), 0x1000_0000);
    }

    #[test]
    fn equal_ids_share_bucket_hash() {
        let a = BlobId::parse(SAMPLE).unwrap();
        let b = BlobId::parse(SAMPLE).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bucket_hash(), b.bucket_hash());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = BlobId::parse(&"0".repeat(40)).unwrap();
        let b = BlobId::parse(&"f".repeat(40)).unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip_as_hex_string() {
        let id = BlobId::parse(SAMPLE).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        let parsed: BlobId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let result: Result<BlobId, _> = serde_json::from_str("\"not an id\"");
        assert!(result.is_err());
    }

    #[test]
    fn from_str_via_parse_method() {
        let id: BlobId = SAMPLE.parse().unwrap();
        assert_eq!(id.as_str(), SAMPLE);
    }

    proptest! {
        #[test]
        fn any_valid_hex_roundtrips(s in "[0-9a-f]{40}") {
            let id = BlobId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
            prop_assert_eq!(BlobId::parse(id.as_str()).unwrap(), id);
        }

        #[test]
        fn bucket_hash_depends_only_on_prefix(
            prefix in "[0-9a-f]{8}",
            tail_a in "[0-9a-f]{32}",
            tail_b in "[0-9a-f]{32}",
        ) {
            let a = BlobId::parse(&format!("{prefix}{tail_a}")).unwrap();
            let b = BlobId::parse(&format!("{prefix}{tail_b}")).unwrap();
            prop_assert_eq!(a.bucket_hash(), b.bucket_hash());
        }
    }
}
