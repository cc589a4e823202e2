use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{self, EnvFilter};

use nessie_client::nessie::api::NessieClient;
use nessie_client::nessie::models::{Branch, MergeRequest, Reference, Tag};

/// Environment variable holding the API endpoint URL
const ENDPOINT_ENV: &str = "NESSIE_ENDPOINT";

/// Environment variable holding the bearer token
const AUTH_TOKEN_ENV: &str = "NESSIE_AUTH_TOKEN";

/// Endpoint used when neither the flag nor the environment variable is set
const DEFAULT_ENDPOINT: &str = "http://localhost:19120/api/v1";

#[derive(Parser)]
#[command(author, version = "0.2.0", about = "Nessie CLI for versioned data operations", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Nessie API endpoint (overrides NESSIE_ENDPOINT environment variable)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Bearer token for authentication (overrides NESSIE_AUTH_TOKEN environment variable)
    #[arg(short = 't', long, global = true)]
    auth_token: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the server configuration
    Config,
    /// List all named references (branches and tags)
    ListRefs,
    /// Show a single reference
    GetRef {
        /// Reference name, e.g. 'main' or 'v1.0'
        name: String,
    },
    /// Create a branch
    CreateBranch {
        /// Name of the branch to create
        name: String,

        /// Commit hash the branch should point at (default branch head when omitted)
        #[arg(long)]
        hash: Option<String>,
    },
    /// Create a tag
    CreateTag {
        /// Name of the tag to create
        name: String,

        /// Commit hash the tag should point at (default branch head when omitted)
        #[arg(long)]
        hash: Option<String>,
    },
    /// Delete a branch
    DeleteBranch {
        /// Name of the branch to delete
        name: String,

        /// Hash the branch is expected to be at
        #[arg(long)]
        expected_hash: String,
    },
    /// Delete a tag
    DeleteTag {
        /// Name of the tag to delete
        name: String,

        /// Hash the tag is expected to be at
        #[arg(long)]
        expected_hash: String,
    },
    /// Show the commit log of a reference
    Log {
        /// Reference name to read the log of
        name: String,

        /// Maximum number of commits per page
        #[arg(long)]
        max: Option<u32>,

        /// Continuation token from a previous page
        #[arg(long)]
        page_token: Option<String>,
    },
    /// List the live entries reachable from a reference
    Entries {
        /// Reference name to list entries of
        name: String,

        /// Maximum number of entries per page
        #[arg(long)]
        max: Option<u32>,

        /// Continuation token from a previous page
        #[arg(long)]
        page_token: Option<String>,
    },
    /// Merge commits from another reference into a branch
    Merge {
        /// Branch to merge into
        branch: String,

        /// Hash the branch is expected to be at
        #[arg(long)]
        expected_hash: String,

        /// Hash to merge commits up to
        #[arg(long)]
        from_hash: String,
    },
}

/// Prints a value as pretty JSON on stdout
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr) // Use stderr for logging, stdout is for JSON output
        .with_target(false)
        .init();

    let endpoint = cli
        .endpoint
        .or_else(|| std::env::var(ENDPOINT_ENV).ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let auth_token = cli
        .auth_token
        .or_else(|| std::env::var(AUTH_TOKEN_ENV).ok());

    tracing::debug!("Using Nessie endpoint {}", endpoint);
    if auth_token.is_some() {
        tracing::debug!("Authenticating with a bearer token");
    }

    let client = NessieClient::new(&endpoint, auth_token)?;

    match cli.command {
        Commands::Config => {
            let config = client.get_config().await?;
            print_json(&config)?;
        }
        Commands::ListRefs => {
            let references = client.get_all_references().await?;
            print_json(&references)?;
        }
        Commands::GetRef { name } => {
            let reference = client.get_reference_by_name(&name).await?;
            print_json(&reference)?;
        }
        Commands::CreateBranch { name, hash } => {
            let branch = Reference::Branch(Branch { name, hash });
            client.create_reference(&branch).await?;
            tracing::info!("Created branch");
        }
        Commands::CreateTag { name, hash } => {
            let tag = Reference::Tag(Tag { name, hash });
            client.create_reference(&tag).await?;
            tracing::info!("Created tag");
        }
        Commands::DeleteBranch {
            name,
            expected_hash,
        } => {
            client.delete_branch(&name, &expected_hash).await?;
            tracing::info!("Deleted branch");
        }
        Commands::DeleteTag {
            name,
            expected_hash,
        } => {
            client.delete_tag(&name, &expected_hash).await?;
            tracing::info!("Deleted tag");
        }
        Commands::Log {
            name,
            max,
            page_token,
        } => {
            let log = client
                .get_commit_log(&name, max, page_token.as_deref())
                .await?;
            print_json(&log)?;
        }
        Commands::Entries {
            name,
            max,
            page_token,
        } => {
            let entries = client
                .get_entries(&name, max, page_token.as_deref())
                .await?;
            print_json(&entries)?;
        }
        Commands::Merge {
            branch,
            expected_hash,
            from_hash,
        } => {
            client
                .merge(&branch, &expected_hash, &MergeRequest { from_hash })
                .await?;
            tracing::info!("Merge complete");
        }
    }

    Ok(())
}
