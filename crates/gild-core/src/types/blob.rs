//! Opaque content-store pointers
//!
//! Descriptions, submission proofs, and deliverables live in an external
//! content-addressed store. The engine carries their identifiers as opaque
//! byte strings and never interprets the contents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for content held in the external store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobPtr(Vec<u8>);

impl BlobPtr {
    /// Wrap raw pointer bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw pointer bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True if the pointer is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// hex-render for logs and events; the bytes themselves stay opaque
impl fmt::Display for BlobPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob-{}", hex::encode(&self.0))
    }
}

impl From<&[u8]> for BlobPtr {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for BlobPtr {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for BlobPtr {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}
