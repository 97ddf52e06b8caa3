//! Gene-sequence token types.

use crate::account::Principal;
use crate::clarity::ClarityValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Token identifier. Ids are assigned sequentially by the contract starting
/// at 1; 0 is the last-token-id sentinel before any mint.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u64> for TokenId {
	fn from(id: u64) -> Self {
		TokenId(id)
	}
}

/// The on-chain record of a minted token, exactly as supplied at mint time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
	pub owner: Principal,
	pub sequence: String,
	pub metadata: String,
}

impl SequenceRecord {
	/// The tuple shape the contract returns from `get-sequence`.
	pub fn to_clarity(&self) -> ClarityValue {
		let mut fields = BTreeMap::new();
		fields.insert(
			"owner".to_string(),
			ClarityValue::Principal(self.owner.clone()),
		);
		fields.insert(
			"sequence".to_string(),
			ClarityValue::Ascii(self.sequence.clone()),
		);
		fields.insert(
			"metadata".to_string(),
			ClarityValue::Ascii(self.metadata.clone()),
		);
		ClarityValue::Tuple(fields)
	}

	pub fn from_clarity(value: &ClarityValue) -> Option<Self> {
		let fields = value.as_tuple()?;
		Some(SequenceRecord {
			owner: fields.get("owner")?.as_principal()?.clone(),
			sequence: fields.get("sequence")?.as_ascii()?.to_string(),
			metadata: fields.get("metadata")?.as_ascii()?.to_string(),
		})
	}
}
