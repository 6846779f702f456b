use gpgit_types::{ObjectId, ObjectKind};

use crate::error::{StoreError, StoreResult};

/// A stored object: kind tag plus payload.
///
/// `StoredObject` is the unit of storage. On disk it is written as
/// `kind || 0x00 || data`; the id is the SHA-1 of those bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// The type of this object.
    pub kind: ObjectKind,
    /// The payload, without the tag.
    pub data: Vec<u8>,
}

impl StoredObject {
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Compute the content-addressed ID for this object.
    pub fn compute_id(&self) -> ObjectId {
        ObjectId::hash(self.kind, &self.data)
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Render the tagged on-disk form.
    pub fn encode(&self) -> Vec<u8> {
        encode_tagged(self.kind, &self.data)
    }

    /// Parse the tagged on-disk form read back for `id`.
    pub fn decode(id: &ObjectId, raw: &[u8]) -> StoreResult<Self> {
        let nul = raw
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| StoreError::CorruptObject {
                id: *id,
                reason: "missing type separator".into(),
            })?;
        let tag = std::str::from_utf8(&raw[..nul]).map_err(|_| StoreError::CorruptObject {
            id: *id,
            reason: "type tag is not UTF-8".into(),
        })?;
        let kind = tag
            .parse::<ObjectKind>()
            .map_err(|e| StoreError::CorruptObject {
                id: *id,
                reason: e.to_string(),
            })?;
        Ok(Self::new(kind, raw[nul + 1..].to_vec()))
    }
}

pub(crate) fn encode_tagged(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let tag = kind.as_str().as_bytes();
    let mut raw = Vec::with_capacity(tag.len() + 1 + payload.len());
    raw.extend_from_slice(tag);
    raw.push(0);
    raw.extend_from_slice(payload);
    raw
}
