//! In-process simulated provider.
//!
//! Executes the gene-sequence NFT contract against an in-memory ledger so
//! clients and tests can run without a node. Submission checks (signature,
//! key-to-principal binding) happen before execution, the same split a real
//! chain enforces; authorization checks (token ownership) happen inside the
//! contract and produce failure envelopes rather than rejections.

use crate::{ProviderError, ProviderInterface};
use async_trait::async_trait;
use geneseq_types::{
	CallResponse, ClarityArg, ClarityValue, ContractCall, ContractId, Principal, SequenceRecord,
	SignedCall,
};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::VerifyingKey;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Contract error code: sender does not own the token.
pub const ERR_NOT_TOKEN_OWNER: u128 = 101;
/// Contract error code: the token id was never minted.
pub const ERR_TOKEN_NOT_FOUND: u128 = 102;

#[derive(Default)]
struct Ledger {
	last_token_id: u64,
	tokens: HashMap<u64, SequenceRecord>,
}

/// Simulated execution provider hosting a single gene-sequence contract.
pub struct SimnetProvider {
	contract: ContractId,
	ledger: RwLock<Ledger>,
}

impl SimnetProvider {
	pub fn new(contract: ContractId) -> Self {
		Self {
			contract,
			ledger: RwLock::new(Ledger::default()),
		}
	}

	fn check_contract(&self, call: &ContractCall) -> Result<(), ProviderError> {
		if call.contract != self.contract {
			return Err(ProviderError::Rejected(format!(
				"No contract {} deployed on this simnet",
				call.contract
			)));
		}
		Ok(())
	}

	/// Submission-level checks. The signature must cover the call digest as
	/// computed for the claimed sender, and the public key must hash to
	/// that sender's principal.
	fn verify_submission(&self, signed: &SignedCall) -> Result<(), ProviderError> {
		let verifying_key = VerifyingKey::from_sec1_bytes(&signed.public_key.0)
			.map_err(|e| ProviderError::Rejected(format!("Invalid public key: {}", e)))?;

		if signed.public_key.principal() != signed.sender {
			return Err(ProviderError::Rejected(format!(
				"Public key does not resolve to sender {}",
				signed.sender
			)));
		}

		let signature = k256::ecdsa::Signature::from_slice(&signed.signature.0)
			.map_err(|e| ProviderError::Rejected(format!("Malformed signature: {}", e)))?;

		let digest = signed.call.digest(&signed.sender);
		verifying_key
			.verify_prehash(&digest, &signature)
			.map_err(|_| ProviderError::Rejected("Signature verification failed".to_string()))?;

		Ok(())
	}

	async fn execute_mint(
		&self,
		sender: &Principal,
		args: &[ClarityArg],
	) -> Result<CallResponse, ProviderError> {
		let (sequence, metadata) = match args {
			[ClarityArg::Ascii(sequence), ClarityArg::Ascii(metadata)] => (sequence, metadata),
			_ => {
				return Err(ProviderError::Rejected(
					"mint expects (sequence ascii, metadata ascii)".to_string(),
				))
			}
		};

		let mut ledger = self.ledger.write().await;
		let token_id = ledger.last_token_id + 1;
		ledger.last_token_id = token_id;
		ledger.tokens.insert(
			token_id,
			SequenceRecord {
				owner: sender.clone(),
				sequence: sequence.clone(),
				metadata: metadata.clone(),
			},
		);

		info!("Minted token {} for {}", token_id, sender);
		Ok(CallResponse::ok(ClarityValue::Uint(token_id as u128)))
	}

	async fn execute_transfer(
		&self,
		sender: &Principal,
		args: &[ClarityArg],
	) -> Result<CallResponse, ProviderError> {
		let (token_id, recipient) = match args {
			[ClarityArg::Uint(token_id), ClarityArg::Principal(recipient)] => {
				(*token_id, recipient)
			}
			_ => {
				return Err(ProviderError::Rejected(
					"transfer expects (token-id uint, recipient principal)".to_string(),
				))
			}
		};

		let mut ledger = self.ledger.write().await;
		let record = match u64::try_from(token_id)
			.ok()
			.and_then(|id| ledger.tokens.get_mut(&id))
		{
			Some(record) => record,
			None => return Ok(CallResponse::err_code(ERR_TOKEN_NOT_FOUND)),
		};

		if record.owner != *sender {
			warn!(
				"Rejecting transfer of token {}: {} is not the owner",
				token_id, sender
			);
			return Ok(CallResponse::err_code(ERR_NOT_TOKEN_OWNER));
		}

		record.owner = recipient.clone();
		info!("Transferred token {} to {}", token_id, recipient);
		Ok(CallResponse::ok(ClarityValue::Bool(true)))
	}

	async fn lookup(&self, args: &[ClarityArg]) -> Result<Option<SequenceRecord>, ProviderError> {
		let token_id = match args {
			[ClarityArg::Uint(token_id)] => *token_id,
			_ => {
				return Err(ProviderError::Rejected(
					"expected a single token-id uint argument".to_string(),
				))
			}
		};

		let ledger = self.ledger.read().await;
		Ok(u64::try_from(token_id)
			.ok()
			.and_then(|id| ledger.tokens.get(&id))
			.cloned())
	}
}

#[async_trait]
impl ProviderInterface for SimnetProvider {
	async fn call_public(&self, signed: SignedCall) -> Result<CallResponse, ProviderError> {
		self.check_contract(&signed.call)?;
		self.verify_submission(&signed)?;
		debug!("Executing {} from {}", signed.call, signed.sender);

		match signed.call.function.as_str() {
			"mint" => self.execute_mint(&signed.sender, &signed.call.args).await,
			"transfer" => {
				self.execute_transfer(&signed.sender, &signed.call.args)
					.await
			}
			other => Err(ProviderError::Rejected(format!(
				"{} is not a public function of {}",
				other, self.contract
			))),
		}
	}

	async fn call_read_only(&self, call: ContractCall) -> Result<CallResponse, ProviderError> {
		self.check_contract(&call)?;
		debug!("Read-only {}", call);

		match call.function.as_str() {
			"get-sequence" => Ok(match self.lookup(&call.args).await? {
				Some(record) => CallResponse::ok(record.to_clarity()),
				None => CallResponse::err_code(ERR_TOKEN_NOT_FOUND),
			}),
			"get-owner" => Ok(match self.lookup(&call.args).await? {
				Some(record) => CallResponse::ok(ClarityValue::Principal(record.owner)),
				None => CallResponse::err_code(ERR_TOKEN_NOT_FOUND),
			}),
			"get-last-token-id" => {
				if !call.args.is_empty() {
					return Err(ProviderError::Rejected(
						"get-last-token-id takes no arguments".to_string(),
					));
				}
				let ledger = self.ledger.read().await;
				Ok(CallResponse::ok(ClarityValue::Uint(
					ledger.last_token_id as u128,
				)))
			}
			other => Err(ProviderError::Rejected(format!(
				"{} is not a read-only function of {}",
				other, self.contract
			))),
		}
	}
}
