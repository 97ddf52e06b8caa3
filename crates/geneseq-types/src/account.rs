//! Account-related types for the geneseq client.
//!
//! This module defines the identity types used when signing and submitting
//! contract calls: principals, public keys, and signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain identity representation.
///
/// A principal is an opaque identity string. Principals derived from a local
/// key are SP-prefixed, but the client accepts any string the chain would
/// accept as a principal literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(pub String);

impl Principal {
	pub fn new(identity: impl Into<String>) -> Self {
		Principal(identity.into())
	}
}

impl fmt::Display for Principal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for Principal {
	fn from(identity: &str) -> Self {
		Principal(identity.to_string())
	}
}

/// Compressed SEC1 public key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(pub Vec<u8>);

impl PublicKey {
	/// Derives the principal bound to this key.
	///
	/// The principal is SP followed by the uppercase hex of the first 20
	/// bytes of the SHA-256 digest of the compressed key.
	pub fn principal(&self) -> Principal {
		use sha2::{Digest, Sha256};

		let digest = Sha256::digest(&self.0);
		Principal(format!("SP{}", hex::encode_upper(&digest[..20])))
	}
}

/// Fixed-size ECDSA signature bytes (r || s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);
