use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::connector::adapter::{
    OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_POOL_SIZE,
};
use crate::connector::api::ContainerConfig;
use crate::connector::client::app::DEFAULT_CREATOR_ID;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "flirtlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file (the terminal client only logs when set)
    #[arg(long, global = true, env = "FLIRTLINK_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP chat service
    Serve(ServeArgs),

    /// Open the terminal client against a running service
    Client {
        #[arg(long, env = "FLIRTLINK_API_BASE", default_value = DEFAULT_API_BASE)]
        api_base: String,

        /// Creator id attached to every persona created from this client
        #[arg(long, env = "FLIRTLINK_CREATOR_ID", default_value = DEFAULT_CREATOR_ID)]
        creator_id: String,
    },

    /// Print a stored persona
    Persona {
        id: String,

        #[arg(long, env = "FLIRTLINK_API_BASE", default_value = DEFAULT_API_BASE)]
        api_base: String,
    },
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, env = "FLIRTLINK_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(short, long, env = "FLIRTLINK_PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, env = "FLIRTLINK_DB_PATH", default_value = "flirtlink.duckdb")]
    pub db_path: PathBuf,

    #[arg(long, env = "FLIRTLINK_DB_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub db_pool_size: usize,

    #[arg(long)]
    pub memory_storage: bool,

    #[arg(long)]
    pub mock_completions: bool,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub openai_model: String,

    #[arg(long, env = "OPENAI_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub openai_max_tokens: u32,

    #[arg(long, env = "OPENAI_TEMPERATURE")]
    pub openai_temperature: Option<f32>,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn container_config(&self) -> ContainerConfig {
        let completion = self.openai_api_key.as_ref().map(|key| {
            OpenAiConfig::new(key.clone())
                .with_base_url(self.openai_base_url.clone())
                .with_model(self.openai_model.clone())
                .with_max_tokens(self.openai_max_tokens)
                .with_temperature(self.openai_temperature)
        });

        ContainerConfig {
            db_path: self.db_path.clone(),
            pool_size: self.db_pool_size,
            memory_storage: self.memory_storage,
            mock_completions: self.mock_completions,
            completion,
        }
    }
}
