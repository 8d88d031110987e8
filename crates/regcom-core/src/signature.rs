//! # Content-Addressed Attachments
//!
//! Signature captures and generated documents are opaque blobs. The
//! domain records never embed the bytes — they hold a content-addressed
//! reference ([`SignatureRef`], [`ArtifactRef`]) whose digest names the
//! blob in whatever attachment store backs the deployment.
//!
//! Presence of a reference is the only check the registry performs on a
//! signature; there is no cryptographic verification.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// A SHA-256 content digest, displayed and serialized as `sha256:<hex>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Compute the digest of a byte blob.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let hash = Sha256::digest(bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        Self(out)
    }

    /// The raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string (no prefix).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a `sha256:<64 hex chars>` string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDigest`] for any other shape.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidDigest {
            input: s.to_string(),
        };
        let hex = s.strip_prefix("sha256:").ok_or_else(invalid)?;
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| invalid())?;
            out[i] = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
        }
        Ok(Self(out))
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ContentDigest::parse(&s).map_err(de::Error::custom)
    }
}

/// Reference to a captured signature blob.
///
/// The blob itself lives in the attachment store; the workflow and
/// certification records carry only this reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRef {
    /// Content address of the signature blob.
    pub digest: ContentDigest,
    /// Media type of the capture (e.g., `image/png`).
    pub media_type: String,
    /// Size of the blob in bytes.
    pub byte_len: u64,
}

/// Reference to a generated document artifact.
///
/// Produced by the document generator from a finalized certification;
/// the registry never inspects the generated bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Content address of the artifact.
    pub digest: ContentDigest,
    /// Media type of the artifact.
    pub media_type: String,
    /// Human-readable label (e.g., `acta constitutiva`).
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let a = ContentDigest::of_bytes(b"firma de prueba");
        let b = ContentDigest::of_bytes(b"firma de prueba");
        assert_eq!(a, b);
        assert_ne!(a, ContentDigest::of_bytes(b"otra firma"));
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let digest = ContentDigest::of_bytes(b"blob");
        let shown = digest.to_string();
        assert!(shown.starts_with("sha256:"));
        assert_eq!(shown.len(), 7 + 64);
        assert_eq!(ContentDigest::parse(&shown).unwrap(), digest);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(ContentDigest::parse("md5:abcd").is_err());
        assert!(ContentDigest::parse("sha256:zz").is_err());
        assert!(ContentDigest::parse("sha256:").is_err());
    }

    #[test]
    fn test_serde_uses_prefixed_hex() {
        let sig = SignatureRef {
            digest: ContentDigest::of_bytes(b"x"),
            media_type: "image/png".to_string(),
            byte_len: 1,
        };
        let json = serde_json::to_value(&sig).unwrap();
        let digest_str = json["digest"].as_str().unwrap();
        assert!(digest_str.starts_with("sha256:"));
        let back: SignatureRef = serde_json::from_value(json).unwrap();
        assert_eq!(back, sig);
    }
}
