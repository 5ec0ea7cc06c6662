use clap::{Parser, Subcommand};
use std::time::Duration;

use answer_pool_client::ClientConfig;

use crate::{commands, error::CliError};

#[derive(Debug, Parser)]
#[command(name = "answer-pool")]
#[command(about = "Claim one of the available answers, first come first served")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Allocation endpoint URL (defaults to $ANSWER_POOL_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Report network failures instead of showing the built-in answers
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the answers that can still be claimed
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Claim an answer under your name
    Claim {
        /// Your name, at least 2 characters
        #[arg(short, long)]
        name: String,

        /// Id of the answer to claim
        #[arg(short, long)]
        answer: String,
    },

    /// Keep listing the available answers as they change
    Watch {
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 30)]
        interval: u64,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env().with_mock_fallback(!self.no_fallback);

        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config
    }

    pub async fn run(&self) -> Result<(), CliError> {
        let config = self.client_config();

        match &self.command {
            Some(Commands::List { format }) => commands::list_answers(&config, format).await,
            Some(Commands::Claim { name, answer }) => {
                commands::claim_answer(&config, name, answer).await
            }
            Some(Commands::Watch { interval }) => {
                let config = config.with_poll_interval(Duration::from_secs((*interval).max(1)));
                commands::watch_answers(&config).await
            }
            None => {
                println!("answer-pool - claim one of the available answers");
                println!("Run 'answer-pool --help' for usage information.");
                Ok(())
            }
        }
    }
}
