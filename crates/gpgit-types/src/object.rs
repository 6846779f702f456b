use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};

use crate::error::TypeError;

/// Content-addressed identifier for any stored object.
///
/// An `ObjectId` is the SHA-1 hash of `kind || 0x00 || payload`. Identical
/// content of the same kind always produces the same `ObjectId`, so writing
/// an object twice stores it once.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 20]);

impl ObjectId {
    /// Length of the raw hash in bytes.
    pub const LEN: usize = 20;

    /// Length of the hex rendering.
    pub const HEX_LEN: usize = 40;

    /// Compute the identifier of a tagged object.
    pub fn hash(kind: ObjectKind, payload: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(kind.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(payload);
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&hasher.finalize());
        Self(arr)
    }

    /// Create an `ObjectId` from a pre-computed hash.
    pub fn from_hash(hash: [u8; 20]) -> Self {
        Self(hash)
    }

    /// The raw 20-byte hash.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex rendering (40 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Abbreviated hex rendering (first 10 characters), used in log output.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..5])
    }

    /// Parse from a 40-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        if s.len() != Self::HEX_LEN {
            return Err(TypeError::InvalidLength {
                expected: Self::HEX_LEN,
                actual: s.len(),
            });
        }
        let mut arr = [0u8; 20];
        hex::decode_to_slice(s, &mut arr).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Ok(Self(arr))
    }

    /// Returns `true` if `s` looks like a full raw object id.
    pub fn is_hex_id(s: &str) -> bool {
        s.len() == Self::HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for ObjectId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// Ids are persisted as hex strings so the index file stays readable.
impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The type tag carried by every stored object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    /// The tag as written on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Self::Blob),
            "tree" => Ok(Self::Tree),
            "commit" => Ok(Self::Commit),
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_blob_matches_git() {
        let id = ObjectId::hash(ObjectKind::Blob, b"");
        assert_eq!(id.to_hex(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
    }

    #[test]
    fn kind_is_part_of_identity() {
        let blob = ObjectId::hash(ObjectKind::Blob, b"same");
        let tree = ObjectId::hash(ObjectKind::Tree, b"same");
        assert_ne!(blob, tree);
    }

    #[test]
    fn short_hex_is_10_chars() {
        let id = ObjectId::hash(ObjectKind::Blob, b"test");
        assert_eq!(id.short_hex().len(), 10);
        assert!(id.to_hex().starts_with(&id.short_hex()));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = ObjectId::from_hex("abcd").unwrap_err();
        assert!(matches!(
            err,
            TypeError::InvalidLength {
                expected: 40,
                actual: 4
            }
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        let bad = "z".repeat(40);
        assert!(matches!(
            ObjectId::from_hex(&bad),
            Err(TypeError::InvalidHex(_))
        ));
        assert!(!ObjectId::is_hex_id(&bad));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let id = ObjectId::hash(ObjectKind::Commit, b"serde test");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn kind_parses_only_known_tags() {
        assert_eq!("tree".parse::<ObjectKind>().unwrap(), ObjectKind::Tree);
        assert!(matches!(
            "tag".parse::<ObjectKind>(),
            Err(TypeError::UnknownKind(_))
        ));
    }

    proptest! {
        #[test]
        fn hashing_is_deterministic(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
            let a = ObjectId::hash(ObjectKind::Blob, &payload);
            let b = ObjectId::hash(ObjectKind::Blob, &payload);
            prop_assert_eq!(a, b);
            prop_assert!(ObjectId::is_hex_id(&a.to_hex()));
            prop_assert_eq!(ObjectId::from_hex(&a.to_hex()).unwrap(), a);
        }
    }
}
