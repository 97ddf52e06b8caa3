//! Contract wire values.
//!
//! Call arguments travel as provider-specific literal strings: a quoted
//! ASCII string, a `u`-prefixed unsigned integer, or a `'`-prefixed
//! principal. Return values come back as typed JSON and are kept in the
//! same shape the provider produced.

use crate::account::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A positional contract-call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityArg {
	/// Unsigned integer, rendered as `u123`.
	Uint(u128),
	/// ASCII string, rendered quoted.
	Ascii(String),
	/// Principal, rendered with a leading quote marker.
	Principal(Principal),
}

impl fmt::Display for ClarityArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ClarityArg::Uint(value) => write!(f, "u{}", value),
			ClarityArg::Ascii(value) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
			ClarityArg::Principal(principal) => write!(f, "'{}", principal),
		}
	}
}

/// A value returned by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum ClarityValue {
	Uint(u128),
	Bool(bool),
	Principal(Principal),
	Ascii(String),
	Tuple(BTreeMap<String, ClarityValue>),
	None,
}

impl ClarityValue {
	pub fn as_uint(&self) -> Option<u128> {
		match self {
			ClarityValue::Uint(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			ClarityValue::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_principal(&self) -> Option<&Principal> {
		match self {
			ClarityValue::Principal(principal) => Some(principal),
			_ => None,
		}
	}

	pub fn as_ascii(&self) -> Option<&str> {
		match self {
			ClarityValue::Ascii(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_tuple(&self) -> Option<&BTreeMap<String, ClarityValue>> {
		match self {
			ClarityValue::Tuple(fields) => Some(fields),
			_ => None,
		}
	}
}

impl fmt::Display for ClarityValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ClarityValue::Uint(value) => write!(f, "u{}", value),
			ClarityValue::Bool(value) => write!(f, "{}", value),
			ClarityValue::Principal(principal) => write!(f, "'{}", principal),
			ClarityValue::Ascii(value) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
			ClarityValue::Tuple(fields) => {
				write!(f, "{{")?;
				for (index, (name, value)) in fields.iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}: {}", name, value)?;
				}
				write!(f, "}}")
			}
			ClarityValue::None => write!(f, "none"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_arg_literal_rendering() {
		assert_eq!(ClarityArg::Uint(1).to_string(), "u1");
		assert_eq!(ClarityArg::Ascii("ATCG".to_string()).to_string(), "\"ATCG\"");
		assert_eq!(
			ClarityArg::Principal(Principal::new("SPOWNER")).to_string(),
			"'SPOWNER"
		);
	}

	#[test]
	fn test_ascii_literal_escapes_embedded_quotes() {
		let arg = ClarityArg::Ascii("a\"b".to_string());
		assert_eq!(arg.to_string(), "\"a\\\"b\"");
	}

	#[test]
	fn test_value_accessors() {
		assert_eq!(ClarityValue::Uint(7).as_uint(), Some(7));
		assert_eq!(ClarityValue::Bool(true).as_uint(), None);
		assert_eq!(
			ClarityValue::Principal(Principal::new("SPX")).as_principal(),
			Some(&Principal::new("SPX"))
		);
	}

	#[test]
	fn test_value_json_round_trip() {
		let mut fields = BTreeMap::new();
		fields.insert("owner".to_string(), ClarityValue::Principal(Principal::new("SPX")));
		fields.insert("sequence".to_string(), ClarityValue::Ascii("ATCG".to_string()));
		let value = ClarityValue::Tuple(fields);

		let json = serde_json::to_string(&value).unwrap();
		let back: ClarityValue = serde_json::from_str(&json).unwrap();
		assert_eq!(back, value);
	}

	#[test]
	fn test_uint_json_shape() {
		let json = serde_json::to_value(ClarityValue::Uint(2)).unwrap();
		assert_eq!(json["type"], "uint");
		assert_eq!(json["value"], 2);
	}
}
