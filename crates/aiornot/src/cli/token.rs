//! The `aiornot token` command: health/token check and key setup.

use clap::{Args, Subcommand};
use dialoguer::{Confirm, Input};

use aiornot_core::{credentials, AsyncClient};

/// Arguments for `aiornot token`.
#[derive(Args, Debug)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token management subcommands.
#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Check that the API is live and a token is configured
    Check,

    /// Save an API key to ~/.aiornot/config.json
    Config,
}

pub async fn execute(args: TokenArgs) -> anyhow::Result<()> {
    match args.command {
        TokenCommand::Check => check().await,
        TokenCommand::Config => config().await,
    }
}

async fn check() -> anyhow::Result<()> {
    let client = super::client()?;
    if client.is_live().await {
        println!("API is live and your token is configured.");
        Ok(())
    } else {
        anyhow::bail!("API is not responding.")
    }
}

async fn config() -> anyhow::Result<()> {
    println!("Go to https://aiornot.com/dashboard/api to get an API key.");

    let api_key: String = Input::new().with_prompt("API key").interact_text()?;

    // Verify the key before persisting it
    let client = AsyncClient::new(&api_key);
    if !client.is_live().await {
        println!("Warning: Could not verify API key (API may be down).");
        if !Confirm::new()
            .with_prompt("Save anyway?")
            .default(false)
            .interact()?
        {
            return Ok(());
        }
    }

    let path = credentials::default_path();
    if path.exists()
        && !Confirm::new()
            .with_prompt("Overwrite existing API token?")
            .default(false)
            .interact()?
    {
        println!("Not overwriting existing API token.");
        return Ok(());
    }

    let saved = credentials::save(&api_key)?;
    println!("API key saved to {}", saved.display());
    Ok(())
}
