use anyhow::{Context, Result};
use clap::Parser;
use fund_holdings_resolver::{BlockfrostApi, Config, FundHolding, Resolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const RULE: &str = "---------------------------------------";

fn print_holding(holding: &FundHolding) {
    println!("Fund Holding Address: {}", holding.holding_address);
    println!("{}", RULE);
    for utxo in &holding.utxos {
        println!("UTXO: {}", utxo.output_ref());
        for unit in &utxo.amount {
            println!("   {}: {}", unit.unit, unit.quantity);
        }
    }
    println!("{}", RULE);
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine, the environment may already be set.
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::parse();
    config.validate()?;

    let api = BlockfrostApi::new(&config.blockfrost_url, &config.blockfrost_api_key)
        .context("could not create Blockfrost client")?;
    let resolver = Resolver::new(api, config.selection);

    tracing::info!(
        addresses = config.addresses.len(),
        selection = ?config.selection,
        "starting fund holdings resolver"
    );

    let mut total = 0;
    for address in &config.addresses {
        total += resolver
            .explore_address_with(address, print_holding)
            .await
            .with_context(|| format!("resolving {}", address))?;
    }

    tracing::info!(resolved = total, "done");
    Ok(())
}
