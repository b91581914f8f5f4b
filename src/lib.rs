//! # fund-holdings-resolver
//!
//! Follows an on-chain fund structure on Cardano through the Blockfrost API,
//! from an invest-units contract to the address holding the fund's assets.
//!
//! | Hop | Lookup | Reads |
//! |-----|--------|-------|
//! | 1 | UTXOs at invest-units address, datum by hash | fund policy at `fields[0].fields[1]` |
//! | 2 | assets under fund policy | token ending in `FundID` |
//! | 3 | holders of FundID | fund contract address |
//! | 4 | UTXOs and datum at fund contract | holding policy at `fields[0].fields[4]` |
//! | 5 | assets under holding policy, holders | fund holding address |
//! | 6 | UTXOs at fund holding address | units starting with `FundHoldingID` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fund_holdings_resolver::{BlockfrostApi, Resolver, Selection};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = BlockfrostApi::new("https://cardano-mainnet.blockfrost.io/api/v0", "mainnet...")?;
//!     let resolver = Resolver::new(api, Selection::First);
//!
//!     for holding in resolver
//!         .explore_address("addr1w8gdpwxszrtvlqutsmnexyshkxfa4x0q7e87d026hhdjljc2drj9d")
//!         .await?
//!     {
//!         println!("{} holds {} UTXOs", holding.holding_address, holding.utxos.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! BLOCKFROST_API_KEY=mainnet... cargo run --release
//! cargo run --release -- --address addr1...,addr1... --selection unique
//! ```

pub mod blockfrost;
pub mod config;
pub mod models;
pub mod resolver;
pub mod utils;

pub use blockfrost::{ApiError, BlockfrostApi, ChainIndex};
pub use config::Config;
pub use models::{Asset, AssetHolder, Datum, DatumError, PlutusData, PolicyAsset, Unit, Utxo};
pub use resolver::{FundHolding, ResolveError, Resolver, Selection, Skip};
