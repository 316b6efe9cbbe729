//! Nostr event model and signature verification.

use k256::schnorr::{Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single event tag: the first element is the key, the rest are values.
///
/// Order within a tag is significant; order among different tags is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Vec<String>);

impl Tag {
    /// Create a tag from its ordered parts (`["u", "https://..."]`).
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// The tag key, if the tag is non-empty.
    pub fn key(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The values following the key, in order.
    pub fn values(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }
}

/// A signed Nostr event.
///
/// The `id` carried on the wire is never trusted: the canonical digest is
/// recomputed from the other fields and the signature is checked against
/// that, so mutating any field invalidates the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier (hex SHA-256 of the canonical serialization).
    #[serde(default)]
    pub id: String,
    /// Author public key (x-only secp256k1, hex).
    pub pubkey: String,
    /// Unix timestamp of creation, in seconds.
    pub created_at: i64,
    /// Kind number; `27235` for HTTP request authorization.
    pub kind: u32,
    /// Event tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Event content body; empty for authorization events.
    #[serde(default)]
    pub content: String,
    /// BIP-340 Schnorr signature over the canonical digest (hex).
    pub sig: String,
}

impl Event {
    /// First tag whose key matches, or `None`.
    pub fn tag(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.key() == Some(key))
    }

    /// SHA-256 of the canonical serialization
    /// `[0, pubkey, created_at, kind, tags, content]`.
    pub fn canonical_digest(&self) -> [u8; 32] {
        let serialized = serde_json::to_vec(&(
            0,
            &self.pubkey,
            self.created_at,
            self.kind,
            &self.tags,
            &self.content,
        ))
        .expect("event canonicalization cannot fail");
        Sha256::digest(serialized).into()
    }

    /// Verify the Schnorr signature against the recomputed digest.
    ///
    /// Malformed hex in `pubkey` or `sig` counts as verification failure.
    pub fn verify_signature(&self) -> bool {
        self.check_signature().is_some()
    }

    fn check_signature(&self) -> Option<()> {
        let pubkey_bytes = hex::decode(&self.pubkey).ok()?;
        // `VerifyingKey::from_bytes` panics on a non-32-byte slice, so reject
        // malformed lengths before calling it (per this method's contract).
        if pubkey_bytes.len() != 32 {
            return None;
        }
        let key = VerifyingKey::from_bytes(&pubkey_bytes).ok()?;
        let sig = Signature::try_from(hex::decode(&self.sig).ok()?.as_slice()).ok()?;
        key.verify_raw(&self.canonical_digest(), &sig).ok()
    }
}
