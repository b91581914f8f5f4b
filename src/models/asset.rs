use serde::{Deserialize, Serialize};

use super::utxo::deserialize_quantity;

/// Length of a hex-encoded policy ID (28 bytes).
pub const POLICY_ID_HEX_LEN: usize = 56;

/// A native asset unit split into policy ID and asset-name hex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub policy_id: String,
    pub name_hex: String,
}

impl Asset {
    pub fn new(policy_id: &str, name_hex: &str) -> Self {
        Self {
            policy_id: policy_id.to_string(),
            name_hex: name_hex.to_string(),
        }
    }

    /// Split a unit (`policy ++ name`, optionally dot separated) into an asset.
    /// Returns `None` for `lovelace` and for anything shorter than a policy ID.
    pub fn from_unit(unit: &str) -> Option<Asset> {
        let id = unit.replace('.', "");
        if id == "lovelace" {
            return None;
        }
        let policy_id = id.get(..POLICY_ID_HEX_LEN)?;
        let name_hex = id.get(POLICY_ID_HEX_LEN..)?;
        Some(Asset::new(policy_id, name_hex))
    }

    pub fn asset_name(&self) -> String {
        String::from_utf8_lossy(&hex::decode(&self.name_hex).unwrap_or_default()).to_string()
    }
}

/// One entry of `GET /assets/policy/{policy}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyAsset {
    pub asset: String,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: String,
}

/// One entry of `GET /assets/{asset}/addresses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetHolder {
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = "f5808c2c990d86da54bfc97d89cee6efa20cd8461616359478d96b4c";

    #[test]
    fn test_from_unit_splits_policy_and_name() {
        let asset = Asset::from_unit(&format!("{}46756e644944", POLICY)).unwrap();
        assert_eq!(asset.policy_id, POLICY);
        assert_eq!(asset.name_hex, "46756e644944");
        assert_eq!(asset.asset_name(), "FundID");
    }

    #[test]
    fn test_from_unit_accepts_dotted_and_nameless() {
        let asset = Asset::from_unit(&format!("{}.4d5350", POLICY)).unwrap();
        assert_eq!(asset.name_hex, "4d5350");

        let nameless = Asset::from_unit(POLICY).unwrap();
        assert_eq!(nameless.name_hex, "");
    }

    #[test]
    fn test_from_unit_rejects_lovelace_and_short_units() {
        assert!(Asset::from_unit("lovelace").is_none());
        assert!(Asset::from_unit("abc123").is_none());
    }

    #[test]
    fn test_holder_quantity_as_string() {
        let holder: AssetHolder =
            serde_json::from_str(r#"{"address":"addr1xyz","quantity":"1"}"#).unwrap();
        assert_eq!(holder.address, "addr1xyz");
        assert_eq!(holder.quantity, "1");
    }
}
