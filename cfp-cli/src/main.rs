//! CFP CLI
//!
//! Command-line access to name derivation, registration checks and reverse
//! resolution for the calls-for-proposals naming zones.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cfp_core::types::{Address, CallId, CallListing, ResolvedCall};
use cfp_crypto::{labelhash, namehash_hex, to_checksum_address};
use cfp_names::{AppContext, ChainConfig, NameService, RpcClient, Zone};
use cfp_registry::{ChainSnapshot, MemoryChain};

/// CFP - names for calls for proposals
#[derive(Parser)]
#[command(name = "cfp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON-RPC endpoint (overrides config)
    #[arg(long, global = true, env = "CFP_RPC_URL")]
    rpc_url: Option<String>,

    /// Chain configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve lookups from a chain snapshot instead of a node
    #[arg(long, global = true)]
    offline: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the node of a domain
    Namehash {
        /// Dotted domain, e.g. alice.usuarios.cfp
        domain: String,
    },

    /// Compute the hash of a single label
    Labelhash {
        /// Label, e.g. alice
        label: String,
    },

    /// Print an address in EIP-55 checksum form
    Checksum {
        /// Address (any case)
        address: String,
    },

    /// Check whether a name is free
    Available {
        /// Label to check
        label: String,
        /// Zone: users or calls
        #[arg(short, long, default_value = "users")]
        zone: Zone,
    },

    /// Resolve an address to its reverse name
    Reverse {
        /// Address (any case)
        address: String,
    },

    /// Resolve a call identifier to its name
    CallName {
        /// Call id (with or without 0x)
        call_id: CallId,
    },

    /// Show a call's description
    CallDescription {
        /// Call contract address, or call id
        target: String,
    },

    /// Resolve a name to its address
    Lookup {
        /// Label to resolve
        label: String,
        /// Zone: users or calls
        #[arg(short, long, default_value = "users")]
        zone: Zone,
    },

    /// List named calls
    Calls {
        /// Listing file (JSON array of {callId, owner, timestamp})
        file: Option<PathBuf>,
        /// Only show calls created by this account
        #[arg(long)]
        owner: Option<Address>,
    },

    /// Authorize accounts to create calls
    Authorize {
        /// Accounts to authorize (default: every pending account)
        addresses: Vec<Address>,
    },

    /// List accounts awaiting authorization
    Pending,

    /// Show the connected account
    Account,
}

/// Where lookups are served from.
enum Backend {
    Rpc(NameService),
    Offline(NameService, Arc<MemoryChain>),
}

impl Backend {
    fn names(&self) -> &NameService {
        match self {
            Backend::Rpc(names) | Backend::Offline(names, _) => names,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "cfp_cli=debug,cfp_names=debug,cfp_registry=debug,info"
    } else {
        "cfp_cli=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Namehash { domain } => cmd_namehash(domain),
        Commands::Labelhash { label } => cmd_labelhash(label),
        Commands::Checksum { address } => cmd_checksum(address),
        command => {
            let backend = connect(&cli).await?;
            run(command, &backend).await
        }
    }
}

async fn connect(cli: &Cli) -> Result<Backend> {
    if let Some(path) = &cli.offline {
        let snapshot = ChainSnapshot::load(path)
            .await
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
        let chain = Arc::new(MemoryChain::from_snapshot(&snapshot));
        let ctx = AppContext::new(chain.clone(), chain.clone(), chain.clone())
            .with_authorizer(chain.clone());
        return Ok(Backend::Offline(NameService::new(ctx), chain));
    }

    let mut config = match &cli.config {
        Some(path) => ChainConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ChainConfig::from_env().context("Invalid CFP_* environment")?,
    };
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = url.clone();
    }
    config.validate().context("Invalid chain configuration")?;
    debug!(rpc_url = %config.rpc_url, "Connecting");

    let client = Arc::new(RpcClient::new(config).context("Failed to create RPC client")?);
    Ok(Backend::Rpc(NameService::new(AppContext::from_rpc(client))))
}

async fn run(command: &Commands, backend: &Backend) -> Result<()> {
    let names = backend.names();
    match command {
        Commands::Available { label, zone } => cmd_available(names, label, *zone).await,
        Commands::Reverse { address } => cmd_reverse(names, address).await,
        Commands::CallName { call_id } => cmd_call_name(names, *call_id).await,
        Commands::CallDescription { target } => cmd_call_description(names, target).await,
        Commands::Lookup { label, zone } => cmd_lookup(names, label, *zone).await,
        Commands::Calls { file, owner } => cmd_calls(backend, file.as_deref(), owner.as_ref()).await,
        Commands::Authorize { addresses } => cmd_authorize(names, addresses).await,
        Commands::Pending => cmd_pending(names).await,
        Commands::Account => cmd_account(names).await,
        Commands::Namehash { domain } => cmd_namehash(domain),
        Commands::Labelhash { label } => cmd_labelhash(label),
        Commands::Checksum { address } => cmd_checksum(address),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOCAL COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_namehash(domain: &str) -> Result<()> {
    println!("{} {}", "Domain:".dimmed(), if domain.is_empty() { "(root)" } else { domain });
    println!("{} {}", "Node:  ".dimmed(), namehash_hex(domain).green());
    Ok(())
}

fn cmd_labelhash(label: &str) -> Result<()> {
    println!("0x{}", hex::encode(labelhash(label)).green());
    Ok(())
}

fn cmd_checksum(address: &str) -> Result<()> {
    let address = Address::from_hex(address).context("Invalid address")?;
    println!("{}", to_checksum_address(&address).green());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAME COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

async fn cmd_available(names: &NameService, label: &str, zone: Zone) -> Result<()> {
    let domain = zone.domain(label);
    if names.is_name_registered(label, zone).await {
        println!("{} {}", "✗ Taken:".red().bold(), domain);
    } else {
        println!("{} {}", "✓ Available:".green().bold(), domain);
    }
    Ok(())
}

async fn cmd_reverse(names: &NameService, address: &str) -> Result<()> {
    let name = names.resolve_reverse_name(address).await;
    if name == address {
        println!("{} {}", "No reverse record for".yellow(), address);
    } else {
        println!("{}", name.green());
    }
    Ok(())
}

async fn cmd_call_name(names: &NameService, call_id: CallId) -> Result<()> {
    let name = names.resolve_call_display_name(call_id).await;
    if name.is_empty() {
        println!("{} {}", "Unnamed call".yellow(), call_id);
    } else {
        println!("{}", name.green());
    }
    Ok(())
}

async fn cmd_call_description(names: &NameService, target: &str) -> Result<()> {
    let description = match CallId::from_hex(target) {
        Ok(call_id) => names.resolve_call_description_by_id(call_id).await,
        Err(_) => names.resolve_call_description(target).await,
    };
    println!("{}", description);
    Ok(())
}

async fn cmd_lookup(names: &NameService, label: &str, zone: Zone) -> Result<()> {
    let domain = zone.domain(label);
    match names.resolve_address(label, zone).await {
        Some(address) => println!("{} → {}", domain, to_checksum_address(&address).green()),
        None => println!("{} {}", "No address for".yellow(), domain),
    }
    Ok(())
}

async fn cmd_account(names: &NameService) -> Result<()> {
    match names.account_display_name().await {
        Some(display) => println!("{} {}", "Connected as:".cyan().bold(), display),
        None => println!("{}", "No account configured (set CFP_FROM_ACCOUNT)".yellow()),
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// CALL COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

async fn cmd_calls(backend: &Backend, file: Option<&Path>, owner: Option<&Address>) -> Result<()> {
    let listings: Vec<CallListing> = match (file, backend) {
        (Some(path), _) => {
            let data = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&data).context("Invalid listing file")?
        }
        (None, Backend::Offline(_, chain)) => chain
            .all_calls()
            .into_iter()
            .map(|(call_id, record)| CallListing {
                call_id,
                owner: record.creator,
                timestamp: 0,
            })
            .collect(),
        (None, Backend::Rpc(_)) => bail!("A listing file is required when reading from a node"),
    };

    let mut rows = backend.names().list_calls(&listings, owner).await;
    if file.is_none() {
        rows.sort_by(|a, b| a.name.cmp(&b.name));
    }

    if rows.is_empty() {
        println!("{}", "No named calls.".yellow());
        return Ok(());
    }

    println!("{}", format!("{} call(s)", rows.len()).cyan().bold());
    for row in &rows {
        print_call(row);
    }
    Ok(())
}

fn format_created(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .filter(|&t| t > 0)
        .and_then(|t| chrono::DateTime::from_timestamp(t, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

fn print_call(row: &ResolvedCall) {
    let created = format_created(row.timestamp);

    println!("\n   {}", row.name.green().bold());
    println!("   {} {}", "Id:     ".dimmed(), row.call_id);
    println!("   {} {}", "Owner:  ".dimmed(), row.owner_display);
    println!("   {} {}", "Created:".dimmed(), created);
}

async fn cmd_pending(names: &NameService) -> Result<()> {
    let pending = names.pending_users().await;
    if pending.is_empty() {
        println!("{}", "No accounts awaiting authorization.".yellow());
        return Ok(());
    }

    println!("{}", format!("{} pending account(s)", pending.len()).cyan().bold());
    for address in &pending {
        let display = names
            .resolve_reverse_name_with(&address.to_hex(), |_| to_checksum_address(address))
            .await;
        println!("   {} {}", address.short().dimmed(), display);
    }
    Ok(())
}

async fn cmd_authorize(names: &NameService, addresses: &[Address]) -> Result<()> {
    let batch = if addresses.is_empty() {
        names.pending_users().await
    } else {
        addresses.to_vec()
    };
    if batch.is_empty() {
        println!("{}", "Nothing to authorize.".yellow());
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Authorizing {} account(s)...", batch.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcomes = names.authorize_all(&batch).await;
    spinner.finish_and_clear();
    let outcomes = outcomes.context("Authorization batch failed")?;

    for outcome in &outcomes {
        let who = to_checksum_address(&outcome.address);
        match &outcome.result {
            Ok(tx_hash) => println!("{} {} {}", "✓".green(), who, tx_hash.dimmed()),
            Err(message) => println!("{} {} {}", "✗".red(), who, message.red()),
        }
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        bail!("{} of {} authorizations failed", failed, outcomes.len());
    }
    Ok(())
}
