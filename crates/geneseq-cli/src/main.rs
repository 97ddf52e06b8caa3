use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geneseq_account::implementations::local::LocalKey;
use geneseq_account::AccountService;
use geneseq_client::ClientService;
use geneseq_config::{ConfigLoader, GeneseqConfig, ProviderKind};
use geneseq_provider::implementations::http::HttpProvider;
use geneseq_provider::implementations::simnet::SimnetProvider;
use geneseq_provider::ProviderInterface;
use geneseq_types::{Principal, TokenId};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "geneseq")]
#[command(about = "Gene-sequence NFT contract client", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	#[arg(long, env = "GENESEQ_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Mint a new gene-sequence token
	Mint {
		/// The sequence payload, e.g. "ATCG"
		sequence: String,
		/// Free-text metadata attached to the token
		#[arg(default_value = "")]
		metadata: String,
	},
	/// Transfer a token to a new owner
	Transfer {
		token_id: u64,
		/// Recipient principal
		recipient: String,
	},
	/// Show a token's owner, sequence, and metadata
	GetSequence { token_id: u64 },
	/// Show a token's current owner
	GetOwner { token_id: u64 },
	/// Show the highest assigned token id
	LastTokenId,
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	// Initialize tracing
	setup_tracing(&cli.log_level)?;

	// Load configuration
	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	if let Commands::Validate = cli.command {
		return validate_config(&cli.config, &config);
	}

	let client = build_client(&config).context("Failed to build contract client")?;
	run_command(cli.command, &client).await
}

fn build_client(config: &GeneseqConfig) -> Result<ClientService> {
	let contract = config.contract_id().context("Invalid contract identifier")?;

	let key = LocalKey::new(&config.account.private_key).context("Invalid account key")?;
	let account = Arc::new(AccountService::new(Box::new(key)));

	let provider: Arc<dyn ProviderInterface> = match config.provider.kind {
		ProviderKind::Simnet => Arc::new(SimnetProvider::new(contract.clone())),
		ProviderKind::Http => {
			let endpoint = config
				.provider
				.endpoint
				.as_deref()
				.context("provider.endpoint is required for the http provider")?;
			Arc::new(HttpProvider::new(endpoint).context("Failed to create HTTP provider")?)
		}
	};

	Ok(ClientService::new(account, provider, contract))
}

async fn run_command(command: Commands, client: &ClientService) -> Result<()> {
	match command {
		Commands::Mint { sequence, metadata } => {
			let response = client.mint(&sequence, &metadata).await?;
			println!("{}", response);
		}
		Commands::Transfer {
			token_id,
			recipient,
		} => {
			let response = client
				.transfer(TokenId(token_id), &Principal::new(recipient))
				.await?;
			println!("{}", response);
		}
		Commands::GetSequence { token_id } => {
			let record = client.get_sequence(TokenId(token_id)).await?;
			println!("owner:    {}", record.owner);
			println!("sequence: {}", record.sequence);
			println!("metadata: {}", record.metadata);
		}
		Commands::GetOwner { token_id } => {
			let owner = client.get_owner(TokenId(token_id)).await?;
			println!("{}", owner);
		}
		Commands::LastTokenId => {
			let token_id = client.get_last_token_id().await?;
			println!("{}", token_id);
		}
		Commands::Validate => unreachable!("handled before client construction"),
	}

	Ok(())
}

fn validate_config(path: &Path, config: &GeneseqConfig) -> Result<()> {
	info!("Configuration {} is valid", path.display());
	info!("Contract: {}", config.client.contract);
	info!(
		"Provider: {}",
		match config.provider.kind {
			ProviderKind::Simnet => "simnet".to_string(),
			ProviderKind::Http => format!(
				"http ({})",
				config.provider.endpoint.as_deref().unwrap_or("<unset>")
			),
		}
	);
	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer())
		.init();

	Ok(())
}
