//! Typed decoding of the Plutus data JSON returned by `GET /scripts/datum/{hash}`.
//!
//! Blockfrost renders datums in the detailed schema:
//!
//! ```text
//! { "constructor": 0, "fields": [ ... ] }
//! { "map": [ { "k": ..., "v": ... } ] }
//! { "list": [ ... ] }
//! { "int": 42 }
//! { "bytes": "deadbeef" }
//! ```
//!
//! Fields are addressed by position only, so a [`DatumPath`] is a list of
//! constructor field indexes ending on a `bytes` leaf.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fund policy ID inside an invest-units datum.
pub const FUND_POLICY_PATH: DatumPath = DatumPath(&[0, 1]);
/// FundHoldings policy ID inside a fund contract datum.
pub const HOLDING_POLICY_PATH: DatumPath = DatumPath(&[0, 4]);

#[derive(Debug, Error)]
pub enum DatumError {
    #[error("datum has no json_value")]
    Missing,

    #[error("datum is not valid plutus data: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("expected constructor at {path}, found {found}")]
    NotConstr { path: String, found: &'static str },

    #[error("no field {index} at {path} (constructor has {len} fields)")]
    MissingField {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("expected bytes at {path}, found {found}")]
    NotBytes { path: String, found: &'static str },
}

/// Response body of the datum-by-hash endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Datum {
    #[serde(default)]
    pub json_value: Option<serde_json::Value>,
}

impl Datum {
    pub fn plutus_data(&self) -> Result<PlutusData, DatumError> {
        let value = match &self.json_value {
            Some(serde_json::Value::Null) | None => return Err(DatumError::Missing),
            Some(v) => v,
        };
        Ok(PlutusData::deserialize(value)?)
    }

    /// Decode and read the bytes leaf at `path` in one step.
    pub fn bytes_at(&self, path: DatumPath) -> Result<String, DatumError> {
        let data = self.plutus_data()?;
        data.bytes_at(path).map(str::to_string)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapEntry {
    pub k: PlutusData,
    pub v: PlutusData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlutusData {
    Constr {
        constructor: u64,
        fields: Vec<PlutusData>,
    },
    Map {
        map: Vec<MapEntry>,
    },
    List {
        list: Vec<PlutusData>,
    },
    Int {
        int: serde_json::Number,
    },
    Bytes {
        bytes: String,
    },
}

impl PlutusData {
    pub fn kind(&self) -> &'static str {
        match self {
            PlutusData::Constr { .. } => "constructor",
            PlutusData::Map { .. } => "map",
            PlutusData::List { .. } => "list",
            PlutusData::Int { .. } => "int",
            PlutusData::Bytes { .. } => "bytes",
        }
    }

    /// Walk constructor fields along `path` and return the hex bytes found there.
    pub fn bytes_at(&self, path: DatumPath) -> Result<&str, DatumError> {
        let mut node = self;
        for (depth, &index) in path.0.iter().enumerate() {
            let here = path.render(depth);
            let fields = constr_fields(node, &here)?;
            node = fields.get(index).ok_or(DatumError::MissingField {
                path: here,
                index,
                len: fields.len(),
            })?;
        }
        as_bytes(node, &path.render(path.0.len()))
    }
}

/// Position of a value inside nested constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatumPath(pub &'static [usize]);

impl DatumPath {
    /// Render the first `depth` steps, e.g. `fields[0].fields[1]`. The root is `$`.
    fn render(&self, depth: usize) -> String {
        if depth == 0 {
            return "$".to_string();
        }
        self.0[..depth]
            .iter()
            .map(|i| format!("fields[{}]", i))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for DatumPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.bytes", self.render(self.0.len()))
    }
}

/// Fields of a constructor node.
pub fn constr_fields<'a>(v: &'a PlutusData, path: &str) -> Result<&'a [PlutusData], DatumError> {
    match v {
        PlutusData::Constr { fields, .. } => Ok(fields),
        other => Err(DatumError::NotConstr {
            path: path.to_string(),
            found: other.kind(),
        }),
    }
}

/// Hex string of a bytes node.
pub fn as_bytes<'a>(v: &'a PlutusData, path: &str) -> Result<&'a str, DatumError> {
    match v {
        PlutusData::Bytes { bytes } => Ok(bytes),
        other => Err(DatumError::NotBytes {
            path: path.to_string(),
            found: other.kind(),
        }),
    }
}
