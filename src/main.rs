use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flirtlink::cli::{Cli, Commands};
use flirtlink::connector::api::{self, Container};
use flirtlink::connector::client::{self, ClientConfig, PersonaApiClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Settings may come from a .env file in the working directory.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let is_client = matches!(cli.command, Commands::Client { .. });
    init_tracing(cli.verbose, cli.log_file.as_deref(), is_client)?;

    match cli.command {
        Commands::Serve(args) => {
            let container = Arc::new(Container::new(args.container_config()).await?);
            api::serve(container, args.addr()).await?;
        }

        Commands::Client {
            api_base,
            creator_id,
        } => {
            client::run(ClientConfig {
                api_base,
                creator_id,
            })
            .await?;
        }

        Commands::Persona { id, api_base } => {
            let api = PersonaApiClient::new(api_base);
            let agent = api.get_agent(&id).await?;

            println!("{} ({})", agent.persona_name, id);
            println!("  Prompt: {}", agent.prompt);
            if agent.links.is_empty() {
                println!("  Links: (none)");
            } else {
                println!("  Links:");
                for (name, url) in &agent.links {
                    println!("    {}: {}", name, url);
                }
            }
        }
    }

    Ok(())
}

/// Stdout logging for the server; the terminal client only logs to a file.
fn init_tracing(verbose: bool, log_file: Option<&Path>, is_client: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
            info!("Logging to {}", path.display());
        }
        None if is_client => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}
