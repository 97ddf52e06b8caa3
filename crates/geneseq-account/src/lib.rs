use async_trait::async_trait;
use geneseq_types::{ContractCall, Principal, PublicKey, Signature, SignedCall};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait implemented by anything that can act as a call signer.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	async fn principal(&self) -> Result<Principal, AccountError>;
	async fn public_key(&self) -> Result<PublicKey, AccountError>;
	async fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, AccountError>;
}

/// High-level signing service wrapping an account backend.
pub struct AccountService {
	provider: Box<dyn AccountInterface>,
}

impl AccountService {
	pub fn new(provider: Box<dyn AccountInterface>) -> Self {
		Self { provider }
	}

	pub async fn principal(&self) -> Result<Principal, AccountError> {
		self.provider.principal().await
	}

	/// Binds a contract call to this account: computes the call digest as
	/// the sender sees it, signs it, and attaches the public key so the
	/// provider can check the key-to-principal binding.
	pub async fn sign_call(&self, call: ContractCall) -> Result<SignedCall, AccountError> {
		let sender = self.provider.principal().await?;
		let digest = call.digest(&sender);
		let signature = self.provider.sign_digest(&digest).await?;
		let public_key = self.provider.public_key().await?;

		Ok(SignedCall {
			call,
			sender,
			public_key,
			signature,
		})
	}
}
