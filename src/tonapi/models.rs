use serde::Deserialize;
use tracing::warn;

use crate::models::{scale_balance, HolderRecord, JettonMeta};

/// Metadata block of a jetton master as served by the upstream API.
/// `decimals` arrives as a string and is validated in [`extract_meta`].
#[derive(Debug, Clone, Deserialize)]
pub struct JettonMetadata {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JettonInfo {
    #[serde(default)]
    pub mintable: bool,
    /// Unscaled integer supply.
    pub total_supply: String,
    pub holders_count: i64,
    pub metadata: JettonMetadata,
}

/// The account owning a jetton wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRef {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_scam: bool,
    #[serde(default)]
    pub is_wallet: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JettonHolderEntry {
    /// Jetton wallet address.
    pub address: String,
    pub owner: AccountRef,
    /// Unscaled integer balance.
    pub balance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JettonHoldersPage {
    pub addresses: Vec<JettonHolderEntry>,
    pub total: i64,
}

impl From<JettonHolderEntry> for HolderRecord {
    fn from(entry: JettonHolderEntry) -> Self {
        HolderRecord {
            owner_address: entry.owner.address,
            owner_name: entry.owner.name,
            raw_balance: entry.balance,
        }
    }
}

/// Extract the jetton payload into our persistence metadata.
///
/// Decimals outside 0..=18 are outside the supported domain and yield
/// `None`, as does a non-numeric decimals string.
pub fn extract_meta(info: &JettonInfo) -> Option<JettonMeta> {
    let decimals: u32 = match info.metadata.decimals.trim().parse() {
        Ok(d) if d <= 18 => d,
        _ => {
            warn!(
                "jetton {} reports unusable decimals {:?}",
                info.metadata.name, info.metadata.decimals
            );
            return None;
        }
    };

    Some(JettonMeta {
        name: info.metadata.name.clone(),
        symbol: info.metadata.symbol.clone(),
        decimals,
        total_supply: scale_balance(&info.total_supply, decimals),
    })
}
