//! Contract call and response envelopes.

use crate::account::{Principal, PublicKey, Signature};
use crate::clarity::{ClarityArg, ClarityValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing contract identifiers.
#[derive(Debug, Error)]
pub enum ContractIdError {
	#[error("Invalid contract identifier: {0}")]
	Invalid(String),
}

/// Fully-qualified contract identifier: deployer principal plus contract name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId {
	pub deployer: Principal,
	pub name: String,
}

impl ContractId {
	pub fn new(deployer: impl Into<Principal>, name: impl Into<String>) -> Self {
		Self {
			deployer: deployer.into(),
			name: name.into(),
		}
	}
}

impl fmt::Display for ContractId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.deployer, self.name)
	}
}

impl FromStr for ContractId {
	type Err = ContractIdError;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let (deployer, name) = raw.split_once('.').ok_or_else(|| {
			ContractIdError::Invalid(format!("expected <deployer>.<name>, got {:?}", raw))
		})?;
		if deployer.is_empty() || name.is_empty() {
			return Err(ContractIdError::Invalid(format!(
				"deployer and name must be non-empty, got {:?}",
				raw
			)));
		}
		Ok(ContractId::new(deployer, name))
	}
}

/// An unsigned contract call: target contract, function name, and positional
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
	pub contract: ContractId,
	pub function: String,
	pub args: Vec<ClarityArg>,
}

impl ContractCall {
	pub fn new(contract: ContractId, function: impl Into<String>, args: Vec<ClarityArg>) -> Self {
		Self {
			contract,
			function: function.into(),
			args,
		}
	}

	/// Renders the positional arguments as provider literals.
	pub fn rendered_args(&self) -> Vec<String> {
		self.args.iter().map(|arg| arg.to_string()).collect()
	}

	/// SHA-256 digest over the canonical rendering of this call as seen by
	/// `sender`. Signed and verified byte-for-byte, so the rendering must
	/// stay stable.
	pub fn digest(&self, sender: &Principal) -> [u8; 32] {
		use sha2::{Digest, Sha256};

		let canonical = format!(
			"{}::{}::{}::{}",
			sender,
			self.contract,
			self.function,
			self.rendered_args().join(",")
		);
		Sha256::digest(canonical.as_bytes()).into()
	}
}

impl fmt::Display for ContractCall {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}.{}({})",
			self.contract,
			self.function,
			self.rendered_args().join(", ")
		)
	}
}

/// A contract call bound to a sender identity.
///
/// The signature covers the call digest; the public key must hash to the
/// sender principal, which is what binds the two together.
#[derive(Debug, Clone)]
pub struct SignedCall {
	pub call: ContractCall,
	pub sender: Principal,
	pub public_key: PublicKey,
	pub signature: Signature,
}

/// The provider's result envelope: a success flag and the returned value.
///
/// A `success = false` envelope is a contract-level failure (the value is
/// the contract's error code) and is surfaced to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResponse {
	pub success: bool,
	pub value: ClarityValue,
}

impl CallResponse {
	pub fn ok(value: ClarityValue) -> Self {
		Self {
			success: true,
			value,
		}
	}

	pub fn err_code(code: u128) -> Self {
		Self {
			success: false,
			value: ClarityValue::Uint(code),
		}
	}

	/// The contract error code, when this is a failure envelope.
	pub fn error_code(&self) -> Option<u128> {
		if self.success {
			None
		} else {
			self.value.as_uint()
		}
	}
}

impl fmt::Display for CallResponse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.success {
			write!(f, "(ok {})", self.value)
		} else {
			write!(f, "(err {})", self.value)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn call() -> ContractCall {
		ContractCall::new(
			"SPDEPLOYER.gene-sequence-nft".parse().unwrap(),
			"mint",
			vec![
				ClarityArg::Ascii("ATCG".to_string()),
				ClarityArg::Ascii("Test Gene Sequence".to_string()),
			],
		)
	}

	#[test]
	fn test_contract_id_parses_deployer_and_name() {
		let id: ContractId = "SPDEPLOYER.gene-sequence-nft".parse().unwrap();
		assert_eq!(id.deployer, Principal::new("SPDEPLOYER"));
		assert_eq!(id.name, "gene-sequence-nft");
		assert_eq!(id.to_string(), "SPDEPLOYER.gene-sequence-nft");
	}

	#[test]
	fn test_contract_id_rejects_malformed_input() {
		assert!("no-dot".parse::<ContractId>().is_err());
		assert!(".name".parse::<ContractId>().is_err());
		assert!("deployer.".parse::<ContractId>().is_err());
	}

	#[test]
	fn test_call_display_uses_literals() {
		assert_eq!(
			call().to_string(),
			"SPDEPLOYER.gene-sequence-nft.mint(\"ATCG\", \"Test Gene Sequence\")"
		);
	}

	#[test]
	fn test_digest_binds_sender_and_args() {
		let sender_a = Principal::new("SPA");
		let sender_b = Principal::new("SPB");
		let base = call();

		assert_eq!(base.digest(&sender_a), base.digest(&sender_a));
		assert_ne!(base.digest(&sender_a), base.digest(&sender_b));

		let mut altered = base.clone();
		altered.args[0] = ClarityArg::Ascii("GCTA".to_string());
		assert_ne!(base.digest(&sender_a), altered.digest(&sender_a));
	}

	#[test]
	fn test_response_error_code() {
		let ok = CallResponse::ok(ClarityValue::Uint(1));
		assert_eq!(ok.error_code(), None);
		assert_eq!(ok.to_string(), "(ok u1)");

		let err = CallResponse::err_code(102);
		assert_eq!(err.error_code(), Some(102));
		assert_eq!(err.to_string(), "(err u102)");
	}
}
