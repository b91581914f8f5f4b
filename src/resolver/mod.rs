//! Walks from an invest-units address to the fund holding address.
//!
//! Per datum-bearing UTXO at the starting address:
//!
//! ```text
//! datum ─fields[0].fields[1]─▶ fund policy ─*FundID─▶ FundID token ─holder─▶ fund contract
//! fund contract utxo datum ─fields[0].fields[4]─▶ holding policy ─asset─▶ holding token
//! holding token ─holder─▶ fund holding address ─utxos with FundHoldingID─▶ report
//! ```
//!
//! A missing field at any hop is a [`Skip`]: logged, and the next UTXO is
//! tried. API failures are returned to the caller.
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::blockfrost::{ApiError, ChainIndex};
use crate::models::{Asset, DatumError, Utxo, FUND_POLICY_PATH, HOLDING_POLICY_PATH};

pub mod selection;


pub use selection::Selection;

/// Token-name suffix of the fund identity token ("FundID").
pub const FUND_ID_SUFFIX: &str = "46756e644944";
/// Token-name prefix of holding tokens ("FundHoldingID").
pub const FUND_HOLDING_ID_MARKER: &str = "46756e64486f6c64696e674944";

#[derive(Debug, Error)]
pub enum Skip {
    #[error("UTXO has no datum hash")]
    NoDatumHash,

    #[error("no fund policy found: {0}")]
    FundPolicy(#[source] DatumError),

    #[error("FundID token not found under policy {policy}")]
    FundIdNotFound { policy: String },

    #[error("fund contract address not found for {asset}")]
    FundContractNotFound { asset: String },

    #[error("no datum found on fund contract {address}")]
    NoFundDatum { address: String },

    #[error("FundHoldings policy not found: {0}")]
    HoldingPolicy(#[source] DatumError),

    #[error("FundHolding token not found under policy {policy}")]
    HoldingTokenNotFound { policy: String },

    #[error("FundHoldings address not found for {asset}")]
    HoldingAddressNotFound { asset: String },

    #[error("{count} candidates for {what}, expected exactly one")]
    Ambiguous { what: &'static str, count: usize },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Skip(#[from] Skip),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Everything learned on the way from one invest-units UTXO to its holdings.
#[derive(Debug, Clone, Serialize)]
pub struct FundHolding {
    pub source: String,
    pub fund_policy: String,
    pub fund_id: String,
    pub fund_address: String,
    pub holding_policy: String,
    pub holding_token: String,
    pub holding_address: String,
    /// UTXOs at `holding_address` carrying a FundHoldingID token.
    pub utxos: Vec<Utxo>,
}

/// Exact suffix match on the FundID token name.
pub fn is_fund_id(asset: &str) -> bool {
    asset.ends_with(FUND_ID_SUFFIX)
}

/// The unit's policy must be `holding_policy` and its name must start with
/// the FundHoldingID marker.
pub fn is_fund_holding_unit(unit: &str, holding_policy: &str) -> bool {
    match Asset::from_unit(unit) {
        Some(asset) => {
            asset.policy_id == holding_policy && asset.name_hex.starts_with(FUND_HOLDING_ID_MARKER)
        }
        None => false,
    }
}

pub struct Resolver<I> {
    index: I,
    selection: Selection,
}

impl<I: ChainIndex> Resolver<I> {
    pub fn new(index: I, selection: Selection) -> Self {
        Self { index, selection }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Resolve every UTXO at `address`, collecting the successful ones.
    pub async fn explore_address(&self, address: &str) -> Result<Vec<FundHolding>, ApiError> {
        let mut holdings = Vec::new();
        self.explore_address_with(address, |h| holdings.push(h.clone()))
            .await?;
        Ok(holdings)
    }

    /// Like [`Resolver::explore_address`] but hands each holding to
    /// `on_resolved` as soon as it is found. Returns how many were resolved.
    pub async fn explore_address_with<F>(
        &self,
        address: &str,
        mut on_resolved: F,
    ) -> Result<usize, ApiError>
    where
        F: FnMut(&FundHolding),
    {
        info!(%address, "exploring invest units");
        let utxos = self.index.utxos(address).await?;

        let mut resolved = 0;
        for utxo in &utxos {
            match self.resolve_utxo(utxo).await {
                Ok(holding) => {
                    resolved += 1;
                    on_resolved(&holding);
                }
                Err(ResolveError::Skip(reason)) => {
                    warn!(utxo = %utxo.output_ref(), "skipping: {}", reason);
                }
                Err(ResolveError::Api(e)) => return Err(e),
            }
        }
        Ok(resolved)
    }

    /// Run the full chain of lookups for a single invest-units UTXO.
    pub async fn resolve_utxo(&self, utxo: &Utxo) -> Result<FundHolding, ResolveError> {
        let datum_hash = utxo.data_hash().ok_or(Skip::NoDatumHash)?;
        let datum = self.index.datum(datum_hash).await?;
        let fund_policy = datum.bytes_at(FUND_POLICY_PATH).map_err(Skip::FundPolicy)?;
        info!(%fund_policy, "fund policy");

        let fund_id = self.fund_id_token(&fund_policy).await?;
        let fund_address = self
            .holder_of(&fund_id, "fund contract address")
            .await?
            .ok_or_else(|| Skip::FundContractNotFound {
                asset: fund_id.clone(),
            })?;
        info!(%fund_address, "fund contract address");

        let holding_policy = self.holding_policy(&fund_address).await?;
        info!(%holding_policy, "fund holdings policy");

        let holding_token = self.holding_token(&holding_policy).await?;
        let holding_address = self
            .holder_of(&holding_token, "fund holdings address")
            .await?
            .ok_or_else(|| Skip::HoldingAddressNotFound {
                asset: holding_token.clone(),
            })?;
        info!(%holding_address, "fund holding address");

        let utxos = self.inspect_holdings(&holding_address, &holding_policy).await?;

        Ok(FundHolding {
            source: utxo.output_ref(),
            fund_policy,
            fund_id,
            fund_address,
            holding_policy,
            holding_token,
            holding_address,
            utxos,
        })
    }

    async fn fund_id_token(&self, fund_policy: &str) -> Result<String, ResolveError> {
        let assets = self.index.assets_by_policy(fund_policy).await?;
        let candidates = assets
            .into_iter()
            .map(|a| a.asset)
            .filter(|a| is_fund_id(a));
        let fund_id = self
            .selection
            .pick(candidates, "FundID token")?
            .ok_or_else(|| Skip::FundIdNotFound {
                policy: fund_policy.to_string(),
            })?;
        if let Some(asset) = Asset::from_unit(&fund_id) {
            tracing::debug!(name = %asset.asset_name(), "fund identity token");
        }
        Ok(fund_id)
    }

    async fn holder_of(
        &self,
        asset: &str,
        what: &'static str,
    ) -> Result<Option<String>, ResolveError> {
        let holders = self.index.asset_addresses(asset).await?;
        let address = self
            .selection
            .pick(holders.into_iter().map(|h| h.address), what)?;
        Ok(address)
    }

    /// The first datum-bearing UTXO at the fund contract carries the policy.
    async fn holding_policy(&self, fund_address: &str) -> Result<String, ResolveError> {
        let utxos = self.index.utxos(fund_address).await?;
        let datum_hash = utxos
            .iter()
            .find_map(|u| u.data_hash())
            .ok_or_else(|| Skip::NoFundDatum {
                address: fund_address.to_string(),
            })?;
        let datum = self.index.datum(datum_hash).await?;
        let policy = datum
            .bytes_at(HOLDING_POLICY_PATH)
            .map_err(Skip::HoldingPolicy)?;
        Ok(policy)
    }

    async fn holding_token(&self, holding_policy: &str) -> Result<String, ResolveError> {
        let assets = self.index.assets_by_policy(holding_policy).await?;
        let token = self
            .selection
            .pick(assets.into_iter().map(|a| a.asset), "FundHolding token")?
            .ok_or_else(|| Skip::HoldingTokenNotFound {
                policy: holding_policy.to_string(),
            })?;
        Ok(token)
    }

    /// UTXOs at `holding_address` that carry a FundHoldingID token of `holding_policy`.
    pub async fn inspect_holdings(
        &self,
        holding_address: &str,
        holding_policy: &str,
    ) -> Result<Vec<Utxo>, ApiError> {
        info!(%holding_address, "fetching fund holding UTXOs");
        let utxos = self.index.utxos(holding_address).await?;
        let holdings: Vec<Utxo> = utxos
            .into_iter()
            .filter(|u| {
                u.amount
                    .iter()
                    .any(|a| is_fund_holding_unit(&a.unit, holding_policy))
            })
            .collect();

        if holdings.is_empty() {
            warn!(%holding_address, "no UTXOs with FundHoldingID tokens found");
        }
        Ok(holdings)
    }
}
