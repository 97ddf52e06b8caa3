//! Account implementations for the geneseq client.
//!
//! This module provides concrete implementations of the AccountInterface
//! trait, currently supporting local secp256k1 private keys.

use crate::{AccountError, AccountInterface};
use async_trait::async_trait;
use geneseq_types::{Principal, PublicKey, Signature};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::SigningKey;

/// Local key implementation backed by an in-memory secp256k1 signing key.
///
/// Suitable for development and testing environments where key management
/// simplicity is preferred over custody guarantees.
pub struct LocalKey {
	signing_key: SigningKey,
}

impl LocalKey {
	/// Creates a new LocalKey from a hex-encoded private key.
	///
	/// The key should be provided as a hex string (with or without 0x prefix).
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let key_without_prefix = private_key_hex
			.strip_prefix("0x")
			.unwrap_or(private_key_hex);

		let key_bytes = hex::decode(key_without_prefix)
			.map_err(|e| AccountError::InvalidKey(format!("Invalid hex: {}", e)))?;

		let signing_key = SigningKey::from_slice(&key_bytes)
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signing_key })
	}

	fn compressed_public_key(&self) -> PublicKey {
		let encoded = self.signing_key.verifying_key().to_encoded_point(true);
		PublicKey(encoded.as_bytes().to_vec())
	}
}

#[async_trait]
impl AccountInterface for LocalKey {
	async fn principal(&self) -> Result<Principal, AccountError> {
		Ok(self.compressed_public_key().principal())
	}

	async fn public_key(&self) -> Result<PublicKey, AccountError> {
		Ok(self.compressed_public_key())
	}

	async fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, AccountError> {
		let signature: k256::ecdsa::Signature = self
			.signing_key
			.sign_prehash(digest)
			.map_err(|e| AccountError::SigningFailed(format!("Failed to sign digest: {}", e)))?;

		Ok(Signature(signature.to_bytes().to_vec()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::AccountService;
	use geneseq_types::{ClarityArg, ContractCall, ContractId};
	use k256::ecdsa::signature::hazmat::PrehashVerifier;
	use k256::ecdsa::VerifyingKey;

	const KEY_A: &str = "0000000000000000000000000000000000000000000000000000000000000001";
	const KEY_B: &str = "0000000000000000000000000000000000000000000000000000000000000002";

	#[test]
	fn test_accepts_key_with_and_without_prefix() {
		assert!(LocalKey::new(KEY_A).is_ok());
		assert!(LocalKey::new(&format!("0x{}", KEY_A)).is_ok());
	}

	#[test]
	fn test_rejects_malformed_keys() {
		assert!(LocalKey::new("not-hex").is_err());
		assert!(LocalKey::new("abcd").is_err());
		// zero is not a valid scalar
		let zero = "0".repeat(64);
		assert!(LocalKey::new(&zero).is_err());
	}

	#[tokio::test]
	async fn test_principal_is_stable_per_key() {
		let key = LocalKey::new(KEY_A).unwrap();
		let first = key.principal().await.unwrap();
		let second = key.principal().await.unwrap();
		assert_eq!(first, second);

		let other = LocalKey::new(KEY_B).unwrap();
		assert_ne!(first, other.principal().await.unwrap());
	}

	#[tokio::test]
	async fn test_signed_call_verifies_against_public_key() {
		let service = AccountService::new(Box::new(LocalKey::new(KEY_A).unwrap()));
		let call = ContractCall::new(
			ContractId::new("SPDEPLOYER", "gene-sequence-nft"),
			"mint",
			vec![ClarityArg::Ascii("ATCG".to_string())],
		);

		let signed = service.sign_call(call.clone()).await.unwrap();
		assert_eq!(signed.sender, signed.public_key.principal());

		let verifying_key = VerifyingKey::from_sec1_bytes(&signed.public_key.0).unwrap();
		let signature = k256::ecdsa::Signature::from_slice(&signed.signature.0).unwrap();
		let digest = call.digest(&signed.sender);
		assert!(verifying_key.verify_prehash(&digest, &signature).is_ok());
	}
}
