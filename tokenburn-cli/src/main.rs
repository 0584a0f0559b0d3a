//! tokenburn CLI
//!
//! Burns the configured token from a locally held key and prints burn
//! history, supply and price. Secrets come from the environment (or a
//! `.env` file): `TOKENBURN_PRIVATE_KEY`, `ETHERSCAN_API_KEY`,
//! `COINGECKO_API_KEY`.

mod app;
mod config;

use alloy_primitives::utils::format_units;
use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use config::{CliConfig, Secrets};
use std::path::PathBuf;
use tokenburn::rates::CoinGeckoApi;
use tokenburn::traits::PriceApi;
use tokenburn::{BurnOutcome, BurnPageController};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tokenburn", version, about = "Burn tokens and inspect burn history", long_about = None)]
struct Cli {
    /// Config file (defaults to ./tokenburn.json when present)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Chain to act on, overriding `default_chain_id`
    #[arg(long, global = true)]
    chain_id: Option<u64>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Burn AMOUNT tokens (decimal, e.g. 1.5)
    Burn { amount: String },
    /// List recent burns on the active network tier
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show the token's total supply on the active chain
    Supply,
    /// Show a USD price (defaults to the configured coingecko_id)
    Price { id: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    let secrets = Secrets::from_env();
    let decimals = config.burn.token_decimals;

    match cli.cmd {
        Command::Burn { amount } => {
            let controller = app::build_controller(config, &secrets, cli.chain_id)?;
            burn(&controller, amount, decimals).await
        }
        Command::History { limit } => {
            let controller = app::build_controller(config, &secrets, cli.chain_id)?;
            history(&controller, limit).await;
            Ok(())
        }
        Command::Supply => {
            let controller = app::build_controller(config, &secrets, cli.chain_id)?;
            supply(&controller, decimals).await
        }
        Command::Price { id } => price(config, secrets, id).await,
    }
}

async fn burn(controller: &BurnPageController, amount: String, decimals: u8) -> anyhow::Result<()> {
    controller.set_burn_amount(amount);
    match controller.execute_burn().await {
        BurnOutcome::Confirmed { hash } => {
            println!("Burn confirmed: {hash}");
            if let Some(supply) = controller.state().supply {
                println!("Total supply: {}", format_amount(supply.total_supply, decimals));
            }
            Ok(())
        }
        BurnOutcome::ConnectPrompted => bail!("no signer: set TOKENBURN_PRIVATE_KEY"),
        BurnOutcome::TimedOut { hash } => bail!("{hash} was submitted but not confirmed in time"),
        other => bail!("burn did not complete: {other:?}"),
    }
}

async fn history(controller: &BurnPageController, limit: usize) {
    controller.refetch_transactions().await;
    let burns = controller.state().burn_transactions;
    if burns.is_empty() {
        println!("No burns found");
    }
    for record in burns.iter().take(limit) {
        let when = chrono::DateTime::from_timestamp(record.timestamp as i64, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| record.timestamp.to_string());
        println!("{when}  chain {:<9} {}  from {}", record.chain_id, record.hash, record.from);
    }
}

async fn supply(controller: &BurnPageController, decimals: u8) -> anyhow::Result<()> {
    controller.fetch_supplies().await;
    let supply = controller
        .state()
        .supply
        .ok_or_else(|| anyhow!("supply unavailable for chain {}", controller.active_chain_id()))?;
    println!("Chain {}: {}", supply.chain_id, format_amount(supply.total_supply, decimals));
    Ok(())
}

async fn price(config: CliConfig, secrets: Secrets, id: Option<String>) -> anyhow::Result<()> {
    let id = id
        .or(config.burn.coingecko_id)
        .ok_or_else(|| anyhow!("no coin id given and no coingecko_id configured"))?;
    let api = CoinGeckoApi::new(config.coingecko.with_api_key(secrets.coingecko_api_key))?;
    let usd = api.price_usd(&id).await?;
    println!("{id}: ${usd}");
    Ok(())
}

fn format_amount(value: alloy_primitives::U256, decimals: u8) -> String {
    format_units(value, decimals).unwrap_or_else(|_| value.to_string())
}
