//! Value-bearing tokens and their canonical encoding

use serde::{Deserialize, Serialize};

use crate::types::TokenId;

/// A token held by exactly one wallet.
///
/// `id` and `value` are fixed at mint time; `owner` changes once per
/// accepted transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    value: u64,
    owner: String,
}

impl Token {
    pub fn new(id: TokenId, value: u64, owner: impl Into<String>) -> Self {
        Self {
            id,
            value,
            owner: owner.into(),
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: String) {
        self.owner = owner;
    }

    /// Canonical byte encoding that signatures are computed over.
    ///
    /// Layout: `u32_be(len) || id_hex || u64_be(value) || u32_be(len) || owner_utf8`.
    /// The id is its 32-char lowercase hex form. Field order is fixed.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let id = self.id.to_hex();
        let mut buf = Vec::with_capacity(4 + id.len() + 8 + 4 + self.owner.len());
        put_field(&mut buf, id.as_bytes());
        buf.extend_from_slice(&self.value.to_be_bytes());
        put_field(&mut buf, self.owner.as_bytes());
        buf
    }
}

fn put_field(buf: &mut Vec<u8>, field: &[u8]) {
    // fields are a 32-char id or an owner name, far below u32::MAX
    buf.extend_from_slice(&(field.len() as u32).to_be_bytes());
    buf.extend_from_slice(field);
}
