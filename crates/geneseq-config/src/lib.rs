// geneseq-config/src/lib.rs

use geneseq_types::ContractId;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

fn default_log_level() -> String {
	"info".to_string()
}

/// Which provider backend to submit calls through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
	/// In-process simulated provider.
	Simnet,
	/// Remote node over HTTP.
	Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSection {
	/// Fully-qualified contract identifier, `<deployer>.<name>`.
	pub contract: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSection {
	/// Hex-encoded signing key, with or without 0x prefix.
	pub private_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
	pub kind: ProviderKind,
	/// Node base URL. Required when kind is http.
	pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneseqConfig {
	pub client: ClientSection,
	pub account: AccountSection,
	pub provider: ProviderSection,
}

impl GeneseqConfig {
	pub fn contract_id(&self) -> Result<ContractId, ConfigError> {
		self.client
			.contract
			.parse()
			.map_err(|e| ConfigError::ValidationError(format!("{}", e)))
	}
}

/// Configuration loader with environment variable substitution
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "GENESEQ_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<GeneseqConfig, ConfigError> {
		// Load base configuration from file
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path).await?
		} else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};

		// Apply environment variable overrides
		self.apply_env_overrides(&mut config);

		// Validate configuration
		self.validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<GeneseqConfig, ConfigError> {
		let content = tokio::fs::read_to_string(file_path).await?;

		// Substitute environment variables
		let substituted_content = self.substitute_env_vars(&content)?;

		// Parse TOML
		let config: GeneseqConfig = toml::from_str(&substituted_content)
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut GeneseqConfig) {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			config.client.log_level = log_level;
		}

		if let Ok(endpoint) = env::var(format!("{}ENDPOINT", self.env_prefix)) {
			config.provider.endpoint = Some(endpoint);
		}

		if let Ok(private_key) = env::var(format!("{}PRIVATE_KEY", self.env_prefix)) {
			config.account.private_key = private_key;
		}
	}

	fn validate_config(&self, config: &GeneseqConfig) -> Result<(), ConfigError> {
		config.contract_id()?;

		if config.account.private_key.is_empty() {
			return Err(ConfigError::ValidationError(
				"account.private_key must not be empty".to_string(),
			));
		}

		if config.provider.kind == ProviderKind::Http && config.provider.endpoint.is_none() {
			return Err(ConfigError::ValidationError(
				"provider.endpoint is required when provider.kind is http".to_string(),
			));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_config(content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	const VALID: &str = r#"
[client]
contract = "SPDEPLOYER.gene-sequence-nft"

[account]
private_key = "0000000000000000000000000000000000000000000000000000000000000001"

[provider]
kind = "simnet"
"#;

	#[tokio::test]
	async fn test_loads_valid_config() {
		let file = write_config(VALID);
		let config = ConfigLoader::new().with_file(file.path()).load().await.unwrap();

		assert_eq!(config.client.contract, "SPDEPLOYER.gene-sequence-nft");
		assert_eq!(config.client.log_level, "info");
		assert_eq!(config.provider.kind, ProviderKind::Simnet);
		assert!(config.contract_id().is_ok());
	}

	#[tokio::test]
	async fn test_missing_file_is_an_error() {
		let result = ConfigLoader::new()
			.with_file("/nonexistent/geneseq.toml")
			.load()
			.await;
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_unset_substitution_variable_fails() {
		let file = write_config(
			r#"
[client]
contract = "SPDEPLOYER.gene-sequence-nft"

[account]
private_key = "${GENESEQ_TEST_SURELY_UNSET_KEY}"

[provider]
kind = "simnet"
"#,
		);
		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(matches!(result, Err(ConfigError::EnvVarNotFound(_))));
	}

	#[tokio::test]
	async fn test_http_provider_requires_endpoint() {
		let file = write_config(
			r#"
[client]
contract = "SPDEPLOYER.gene-sequence-nft"

[account]
private_key = "01"

[provider]
kind = "http"
"#,
		);
		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));
	}

	#[tokio::test]
	async fn test_malformed_contract_id_fails_validation() {
		let file = write_config(
			r#"
[client]
contract = "missing-a-dot"

[account]
private_key = "01"

[provider]
kind = "simnet"
"#,
		);
		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));
	}
}
