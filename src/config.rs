//!
//! Coin configuration as found in the indexer's per-coin JSON files.
//!

use crate::networks::{Coin, CoinProfile};
use crate::parser::amount::AmountFormat;
use crate::parser::errors::OpResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub coin_name: String,
    #[serde(default)]
    pub coin_shortcut: String,
    #[serde(default)]
    pub rpc_url: String,
    #[serde(default)]
    pub rpc_user: String,
    #[serde(default)]
    pub rpc_pass: String,
    /// seconds
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout: u32,
    /// decode blocks locally instead of asking the node for verbose json
    #[serde(default)]
    pub parse: bool,
    #[serde(default)]
    pub amount_decimal_point: Option<u32>,
    #[serde(default)]
    pub supports_estimate_fee: Option<bool>,
}

fn default_rpc_timeout() -> u32 {
    25
}

impl Configuration {
    pub fn from_json(json: &str) -> OpResult<Configuration> {
        Ok(serde_json::from_str(json)?)
    }

    /// coin named by `coin_name`, falling back to `coin_shortcut`
    pub fn coin(&self) -> OpResult<Coin> {
        self.coin_name.parse().or_else(|e| {
            if self.coin_shortcut.is_empty() {
                Err(e)
            } else {
                self.coin_shortcut.parse()
            }
        })
    }

    /// apply the overrides of this configuration to a coin profile
    pub fn apply(&self, mut profile: CoinProfile) -> CoinProfile {
        if let Some(decimals) = self.amount_decimal_point {
            profile.amounts = AmountFormat::new(decimals);
        }
        if let Some(supported) = self.supports_estimate_fee {
            profile.supports_estimate_fee = supported;
        }
        profile
    }
}
