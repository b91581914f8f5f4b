pub mod asset;
pub mod datum;
pub mod utxo;

pub use asset::{Asset, AssetHolder, PolicyAsset, POLICY_ID_HEX_LEN};
pub use datum::{Datum, DatumError, DatumPath, PlutusData, FUND_POLICY_PATH, HOLDING_POLICY_PATH};
pub use utxo::{Unit, Utxo};
