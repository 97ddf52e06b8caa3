//! Provider abstractions for the geneseq client.
//!
//! A provider is the external execution environment that runs the contract
//! and maintains ledger state. This module defines the submission interface
//! and ships two backends: an in-process simnet that executes the
//! gene-sequence contract locally, and an HTTP client for a remote node.

use async_trait::async_trait;
use geneseq_types::{CallResponse, ContractCall, SignedCall};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
	pub mod simnet;
}

/// Errors that can occur while submitting a call to a provider.
///
/// A contract-level failure is not an error: it comes back as a
/// `CallResponse` with `success = false` and is surfaced unchanged.
#[derive(Debug, Error)]
pub enum ProviderError {
	/// The provider could not be reached at all.
	#[error("Provider unreachable: {0}")]
	Unreachable(String),
	/// The provider refused the submission before executing it.
	#[error("Submission rejected: {0}")]
	Rejected(String),
	/// The provider answered with something the client cannot decode.
	#[error("Protocol error: {0}")]
	Protocol(String),
}

/// Trait defining the contract-call interface of an execution provider.
#[async_trait]
pub trait ProviderInterface: Send + Sync {
	/// Submits a signed public-function call and awaits its result.
	async fn call_public(&self, call: SignedCall) -> Result<CallResponse, ProviderError>;

	/// Executes a read-only function. No signer is required.
	async fn call_read_only(&self, call: ContractCall) -> Result<CallResponse, ProviderError>;
}
