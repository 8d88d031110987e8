//! # Signature Store
//!
//! Content-addressed storage for captured signature blobs. Domain
//! records carry only [`SignatureRef`] values; the bytes live here,
//! keyed by their own digest.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use regcom_core::{ContentDigest, SignatureRef};

/// Contract for the attachment blob store.
pub trait SignatureStore {
    /// Store a blob, returning its content-addressed reference.
    fn put(&mut self, bytes: &[u8], media_type: &str) -> SignatureRef;

    /// Retrieve a blob by digest.
    fn get(&self, digest: &ContentDigest) -> Option<&[u8]>;
}

/// In-memory content-addressed blob store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemorySignatureStore {
    blobs: HashMap<ContentDigest, Vec<u8>>,
}

impl InMemorySignatureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SignatureStore for InMemorySignatureStore {
    fn put(&mut self, bytes: &[u8], media_type: &str) -> SignatureRef {
        let digest = ContentDigest::of_bytes(bytes);
        let byte_len = bytes.len() as u64;
        self.blobs.entry(digest).or_insert_with(|| bytes.to_vec());
        SignatureRef {
            digest,
            media_type: media_type.to_string(),
            byte_len,
        }
    }

    fn get(&self, digest: &ContentDigest) -> Option<&[u8]> {
        self.blobs.get(digest).map(|b| b.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_roundtrip() {
        let mut store = InMemorySignatureStore::new();
        let sig = store.put(b"trazo de firma", "image/png");
        assert_eq!(sig.byte_len, 14);
        assert_eq!(store.get(&sig.digest).unwrap(), b"trazo de firma");
    }

    #[test]
    fn identical_blobs_share_one_entry() {
        let mut store = InMemorySignatureStore::new();
        let a = store.put(b"misma firma", "image/png");
        let b = store.put(b"misma firma", "image/png");
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn missing_digest_returns_none() {
        let store = InMemorySignatureStore::new();
        assert!(store.get(&ContentDigest::of_bytes(b"ausente")).is_none());
    }
}
