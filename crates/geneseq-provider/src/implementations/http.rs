//! HTTP provider implementation.
//!
//! Submits contract calls to a remote node over JSON. Arguments travel as
//! rendered literals; the node answers with the same `{success, value}`
//! envelope the simnet produces. Transport failures and node refusals are
//! kept apart so callers can tell an unreachable provider from a rejected
//! submission.

use crate::{ProviderError, ProviderInterface};
use async_trait::async_trait;
use geneseq_types::{CallResponse, ClarityValue, ContractCall, SignedCall};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const CALL_PATH: &str = "/v2/contracts/call";
const CALL_READ_PATH: &str = "/v2/contracts/call-read";

/// HTTP client for a remote contract-chain node.
pub struct HttpProvider {
	client: reqwest::Client,
	endpoint: reqwest::Url,
}

#[derive(Debug, Serialize)]
struct CallRequest {
	contract: String,
	function: String,
	args: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	sender: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	public_key: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	signature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallReply {
	success: bool,
	value: ClarityValue,
}

impl HttpProvider {
	pub fn new(endpoint: &str) -> Result<Self, ProviderError> {
		let endpoint = endpoint
			.parse::<reqwest::Url>()
			.map_err(|e| ProviderError::Unreachable(format!("Invalid endpoint URL: {}", e)))?;

		Ok(Self {
			client: reqwest::Client::new(),
			endpoint,
		})
	}

	fn url(&self, path: &str) -> Result<reqwest::Url, ProviderError> {
		self.endpoint
			.join(path)
			.map_err(|e| ProviderError::Unreachable(format!("Invalid endpoint URL: {}", e)))
	}

	fn request_for(call: &ContractCall) -> CallRequest {
		CallRequest {
			contract: call.contract.to_string(),
			function: call.function.clone(),
			args: call.rendered_args(),
			sender: None,
			public_key: None,
			signature: None,
		}
	}

	fn request_for_signed(signed: &SignedCall) -> CallRequest {
		let mut request = Self::request_for(&signed.call);
		request.sender = Some(signed.sender.to_string());
		request.public_key = Some(hex::encode(&signed.public_key.0));
		request.signature = Some(hex::encode(&signed.signature.0));
		request
	}

	async fn submit(&self, path: &str, request: CallRequest) -> Result<CallResponse, ProviderError> {
		debug!("POST {} {}.{}", path, request.contract, request.function);

		let response = self
			.client
			.post(self.url(path)?)
			.json(&request)
			.send()
			.await
			.map_err(|e| ProviderError::Unreachable(format!("Failed to reach provider: {}", e)))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(ProviderError::Rejected(format!(
				"Provider returned {}: {}",
				status, body
			)));
		}

		let reply: CallReply = response
			.json()
			.await
			.map_err(|e| ProviderError::Protocol(format!("Undecodable provider reply: {}", e)))?;

		info!(
			"{}.{} -> success={}",
			request.contract, request.function, reply.success
		);
		Ok(CallResponse {
			success: reply.success,
			value: reply.value,
		})
	}
}

#[async_trait]
impl ProviderInterface for HttpProvider {
	async fn call_public(&self, signed: SignedCall) -> Result<CallResponse, ProviderError> {
		let request = Self::request_for_signed(&signed);
		self.submit(CALL_PATH, request).await
	}

	async fn call_read_only(&self, call: ContractCall) -> Result<CallResponse, ProviderError> {
		let request = Self::request_for(&call);
		self.submit(CALL_READ_PATH, request).await
	}
}
