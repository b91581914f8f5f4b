use anyhow::{anyhow, Context, Result};
use clap::Parser;

use crate::blockfrost::MAINNET_URL;
use crate::resolver::Selection;

/// The invest-units contract the resolver starts from when none is configured.
pub const INVEST_UNITS_ADDRESS: &str = "addr1w8gdpwxszrtvlqutsmnexyshkxfa4x0q7e87d026hhdjljc2drj9d";

/// Command line and environment configuration.
///
/// Every flag falls back to an environment variable, and a `.env` file in the
/// working directory is loaded before parsing.
#[derive(Parser, Debug, Clone)]
#[command(name = "fund-holdings-resolver", version, about)]
pub struct Config {
    /// Blockfrost project id, sent as the `project_id` header.
    #[arg(long, env = "BLOCKFROST_API_KEY", hide_env_values = true)]
    pub blockfrost_api_key: String,

    /// Base URL of the Blockfrost API.
    #[arg(long, env = "BLOCKFROST_URL", default_value = MAINNET_URL)]
    pub blockfrost_url: String,

    /// Invest-units addresses to start from. Repeat the flag or separate with commas.
    #[arg(
        long = "address",
        env = "INVEST_UNITS_ADDRESSES",
        value_delimiter = ',',
        default_value = INVEST_UNITS_ADDRESS
    )]
    pub addresses: Vec<String>,

    /// How to choose among several matching assets or holders.
    #[arg(long, env = "SELECTION_POLICY", value_enum, default_value_t = Selection::First)]
    pub selection: Selection,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.blockfrost_api_key.trim().is_empty() {
            return Err(anyhow!("BLOCKFROST_API_KEY is empty"));
        }
        if self.addresses.is_empty() {
            return Err(anyhow!("no invest-units addresses configured"));
        }
        for address in &self.addresses {
            crate::utils::validate_address(address)
                .with_context(|| format!("bad invest-units address {:?}", address))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config =
            Config::try_parse_from(["fund-holdings-resolver", "--blockfrost-api-key", "mainnetKey"])
                .unwrap();
        assert_eq!(config.blockfrost_url, MAINNET_URL);
        assert_eq!(config.addresses, vec![INVEST_UNITS_ADDRESS.to_string()]);
        assert_eq!(config.selection, Selection::First);
        config.validate().unwrap();
    }

    #[test]
    fn test_comma_separated_addresses_and_selection() {
        let config = Config::try_parse_from([
            "fund-holdings-resolver",
            "--blockfrost-api-key",
            "mainnetKey",
            "--address",
            concat!(
                "addr1w84q0y2wwfj5efd9ch3x492edeh6pdwycvt7g030jfzhagg5ftr54,",
                "addr1wxxxdudv3dtaa09tngrm8wds54v45kkhdcau4e6keqh0uncksc7pn"
            ),
            "--selection",
            "unique",
        ])
        .unwrap();
        assert_eq!(config.addresses.len(), 2);
        assert_eq!(config.selection, Selection::Unique);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        let config = Config::try_parse_from([
            "fund-holdings-resolver",
            "--blockfrost-api-key",
            "mainnetKey",
            "--address",
            "addr1notreallyanaddress",
        ])
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("addr1notreallyanaddress"));
    }
}
