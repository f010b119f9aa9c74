use airquality_core::{Config, ProviderId};
use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};

use airquality_server::logging::init_logger;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "airquality", version, about = "Air-quality lookup service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    Serve {
        /// Interface to bind; overrides config and AIRQUALITY_HOST.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind; overrides config and AIRQUALITY_PORT.
        #[arg(long)]
        port: Option<u16>,

        /// Enable debug logging.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Store the API key for a provider in the config file.
    Configure {
        /// Provider short name, "geocodio" or "airnow".
        provider: String,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve {
                host,
                port,
                verbose,
            } => {
                init_logger(verbose);

                let mut config = Config::load()?;
                config.apply_env()?;
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }

                airquality_server::serve(config).await
            }
            Command::Configure { provider } => configure(&provider),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new(&format!("{} API key:", id.display_name()))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.upsert_provider_api_key(id, api_key.to_string());
    config.save()?;

    println!(
        "Saved {} key to {} ({} still takes precedence when set).",
        id.display_name(),
        Config::config_file_path()?.display(),
        id.key_env_var()
    );
    Ok(())
}
