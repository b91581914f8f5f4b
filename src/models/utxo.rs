use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    pub unit: String,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: String,
}

/// Quantities arrive as strings or bare numbers.
pub(crate) fn deserialize_quantity<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Q {
        Str(String),
        Num(u64),
    }
    let q = Q::deserialize(deserializer)?;
    Ok(match q {
        Q::Str(s) => s,
        Q::Num(n) => n.to_string(),
    })
}

/// One entry of `GET /addresses/{address}/utxos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utxo {
    #[serde(default)]
    pub address: String,
    pub tx_hash: String,
    #[serde(default)]
    pub tx_index: u32,
    pub output_index: u32,
    #[serde(default)]
    pub amount: Vec<Unit>,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub data_hash: Option<String>,
    #[serde(default)]
    pub inline_datum: Option<String>,
    #[serde(default)]
    pub reference_script_hash: Option<String>,
}

impl Utxo {
    /// An empty hash counts as absent.
    pub fn data_hash(&self) -> Option<&str> {
        self.data_hash.as_deref().filter(|h| !h.is_empty())
    }

    /// `tx_hash#output_index`
    pub fn output_ref(&self) -> String {
        format!("{}#{}", self.tx_hash, self.output_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_blockfrost_utxo() {
        let utxo: Utxo = serde_json::from_value(json!({
            "address": "addr1w8gdpwxszrtvlqutsmnexyshkxfa4x0q7e87d026hhdjljc2drj9d",
            "tx_hash": "39a7a284c2a0948189dc45dec670211cd4d72f7b66c5726c08d9b3df11e44d58",
            "tx_index": 0,
            "output_index": 0,
            "amount": [
                { "unit": "lovelace", "quantity": "42000000" },
                {
                    "unit": "b0d07d45fe9514f80213f4020e5a61241458be626841cde717cb38a7",
                    "quantity": 12
                }
            ],
            "block": "7eb8e27d18686c7db9a18f8bbcfe34e3fed6e047afaa2d969904d15e934847e6",
            "data_hash": "9e478573ab81ea7a8e31891ce0648b81229f408d596a3483e6f4f9b92d3cf710",
            "inline_datum": null,
            "reference_script_hash": null
        }))
        .unwrap();

        assert_eq!(
            utxo.output_ref(),
            "39a7a284c2a0948189dc45dec670211cd4d72f7b66c5726c08d9b3df11e44d58#0"
        );
        assert_eq!(utxo.amount.len(), 2);
        assert_eq!(utxo.amount[0].quantity, "42000000");
        assert_eq!(utxo.amount[1].quantity, "12");
        assert_eq!(
            utxo.data_hash(),
            Some("9e478573ab81ea7a8e31891ce0648b81229f408d596a3483e6f4f9b92d3cf710")
        );
    }

    #[test]
    fn test_missing_or_empty_data_hash() {
        let utxo: Utxo = serde_json::from_value(json!({
            "tx_hash": "aa",
            "output_index": 3,
            "data_hash": ""
        }))
        .unwrap();
        assert!(utxo.amount.is_empty());
        assert_eq!(utxo.data_hash(), None);

        let utxo: Utxo =
            serde_json::from_value(json!({ "tx_hash": "aa", "output_index": 3 })).unwrap();
        assert_eq!(utxo.data_hash(), None);
    }
}
