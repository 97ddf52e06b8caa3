//! Contract client adapter for the gene-sequence NFT contract.
//!
//! Translates the five high-level operations (mint, transfer, and the three
//! queries) into contract calls, signs them on behalf of the configured
//! account, submits them through a provider, and surfaces the provider's
//! result. The adapter holds no state of its own: every operation is a
//! single awaited request/response against the provider, with no retries,
//! caching, or batching.

use geneseq_account::{AccountError, AccountService};
use geneseq_provider::{ProviderError, ProviderInterface};
use geneseq_types::{
	CallResponse, ClarityArg, ClarityValue, ContractCall, ContractId, Principal, SequenceRecord,
	TokenId,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Account error: {0}")]
	Account(#[from] AccountError),
	#[error("Provider error: {0}")]
	Provider(#[from] ProviderError),
	#[error("Contract returned error code u{0}")]
	ContractError(u128),
	#[error("Unexpected return value: {0}")]
	UnexpectedValue(String),
}

/// High-level client for one deployed gene-sequence contract.
pub struct ClientService {
	account: Arc<AccountService>,
	provider: Arc<dyn ProviderInterface>,
	contract: ContractId,
}

impl ClientService {
	pub fn new(
		account: Arc<AccountService>,
		provider: Arc<dyn ProviderInterface>,
		contract: ContractId,
	) -> Self {
		Self {
			account,
			provider,
			contract,
		}
	}

	pub fn contract(&self) -> &ContractId {
		&self.contract
	}

	/// The principal this client signs with.
	pub async fn signer_principal(&self) -> Result<Principal, ClientError> {
		Ok(self.account.principal().await?)
	}

	fn call(&self, function: &str, args: Vec<ClarityArg>) -> ContractCall {
		ContractCall::new(self.contract.clone(), function, args)
	}

	async fn submit_public(&self, call: ContractCall) -> Result<CallResponse, ClientError> {
		debug!("Constructed {}", call);
		let signed = self.account.sign_call(call).await?;
		info!("Submitting {} as {}", signed.call, signed.sender);

		let response = self.provider.call_public(signed).await?;
		if !response.success {
			warn!("Contract answered {}", response);
		}
		Ok(response)
	}

	async fn submit_read_only(&self, call: ContractCall) -> Result<CallResponse, ClientError> {
		debug!("Querying {}", call);
		Ok(self.provider.call_read_only(call).await?)
	}

	/// Unwraps a success envelope, classifying contract failures.
	fn expect_ok(response: CallResponse) -> Result<ClarityValue, ClientError> {
		if response.success {
			Ok(response.value)
		} else {
			match response.error_code() {
				Some(code) => Err(ClientError::ContractError(code)),
				None => Err(ClientError::UnexpectedValue(format!(
					"failure envelope without an error code: {}",
					response
				))),
			}
		}
	}

	/// Mints a new token carrying `sequence` and `metadata`, returning the
	/// provider's envelope unchanged.
	pub async fn mint(&self, sequence: &str, metadata: &str) -> Result<CallResponse, ClientError> {
		self.submit_public(self.call(
			"mint",
			vec![
				ClarityArg::Ascii(sequence.to_string()),
				ClarityArg::Ascii(metadata.to_string()),
			],
		))
		.await
	}

	/// Mints a new token and decodes the assigned token id.
	pub async fn mint_token(
		&self,
		sequence: &str,
		metadata: &str,
	) -> Result<TokenId, ClientError> {
		let value = Self::expect_ok(self.mint(sequence, metadata).await?)?;
		let id = value
			.as_uint()
			.and_then(|id| u64::try_from(id).ok())
			.ok_or_else(|| {
				ClientError::UnexpectedValue(format!("mint did not return a token id: {}", value))
			})?;
		Ok(TokenId(id))
	}

	/// Transfers `token_id` to `recipient`, returning the provider's
	/// envelope unchanged. The contract authorizes the transfer against
	/// the signing account.
	pub async fn transfer(
		&self,
		token_id: TokenId,
		recipient: &Principal,
	) -> Result<CallResponse, ClientError> {
		self.submit_public(self.call(
			"transfer",
			vec![
				ClarityArg::Uint(token_id.0 as u128),
				ClarityArg::Principal(recipient.clone()),
			],
		))
		.await
	}

	/// Transfers `token_id` to `recipient`, classifying contract failures.
	pub async fn transfer_token(
		&self,
		token_id: TokenId,
		recipient: &Principal,
	) -> Result<(), ClientError> {
		Self::expect_ok(self.transfer(token_id, recipient).await?)?;
		Ok(())
	}

	/// Fetches the `{owner, sequence, metadata}` record of a minted token.
	pub async fn get_sequence(&self, token_id: TokenId) -> Result<SequenceRecord, ClientError> {
		let response = self
			.submit_read_only(self.call("get-sequence", vec![ClarityArg::Uint(token_id.0 as u128)]))
			.await?;
		let value = Self::expect_ok(response)?;
		SequenceRecord::from_clarity(&value).ok_or_else(|| {
			ClientError::UnexpectedValue(format!("get-sequence did not return a record: {}", value))
		})
	}

	/// Fetches the current owner of a minted token.
	pub async fn get_owner(&self, token_id: TokenId) -> Result<Principal, ClientError> {
		let response = self
			.submit_read_only(self.call("get-owner", vec![ClarityArg::Uint(token_id.0 as u128)]))
			.await?;
		let value = Self::expect_ok(response)?;
		value.as_principal().cloned().ok_or_else(|| {
			ClientError::UnexpectedValue(format!("get-owner did not return a principal: {}", value))
		})
	}

	/// Fetches the highest assigned token id, 0 when nothing has been minted.
	pub async fn get_last_token_id(&self) -> Result<TokenId, ClientError> {
		let response = self
			.submit_read_only(self.call("get-last-token-id", vec![]))
			.await?;
		let value = Self::expect_ok(response)?;
		let id = value
			.as_uint()
			.and_then(|id| u64::try_from(id).ok())
			.ok_or_else(|| {
				ClientError::UnexpectedValue(format!(
					"get-last-token-id did not return a uint: {}",
					value
				))
			})?;
		Ok(TokenId(id))
	}
}
