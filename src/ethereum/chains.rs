//! Static chain metadata table.
//!
//! The table ships with the crate as `data/chains.json` and is parsed once,
//! on first use.

use std::{collections::HashMap, sync::LazyLock};

use crate::types::ChainInfo;

static ALL_CHAINS: LazyLock<HashMap<u64, ChainInfo>> = LazyLock::new(|| {
    let chains: Vec<ChainInfo> = serde_json::from_str(include_str!("../../data/chains.json"))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Bundled chain metadata table is invalid");
            Vec::new()
        });
    chains.into_iter().map(|chain| (chain.chain_id, chain)).collect()
});

/// The whole metadata table, keyed by chain id.
pub fn all_chains() -> &'static HashMap<u64, ChainInfo> {
    &ALL_CHAINS
}

/// Metadata for `chain_id`, or the empty record when the id is unknown or absent.
pub fn get_chain_data(chain_id: Option<u64>) -> ChainInfo {
    chain_id.and_then(|id| ALL_CHAINS.get(&id)).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethereum::constants::*;

    #[test]
    fn test_table_is_loaded() {
        assert!(all_chains().len() > 10);
        for (id, chain) in all_chains() {
            assert_eq!(*id, chain.chain_id);
            assert!(!chain.name.is_empty());
        }
    }

    #[test]
    fn test_known_chains_return_registered_entry() {
        let ids = [
            ETHEREUM_MAINNET_CHAIN_ID,
            SEPOLIA_CHAIN_ID,
            HOLESKY_CHAIN_ID,
            LOCALHOST_CHAIN_ID,
            HARDHAT_CHAIN_ID,
        ];
        for id in ids {
            let data = get_chain_data(Some(id));
            assert_eq!(&data, all_chains().get(&id).unwrap());
        }
    }

    #[test]
    fn test_mainnet_metadata() {
        let data = get_chain_data(Some(ETHEREUM_MAINNET_CHAIN_ID));
        assert_eq!(data.name, "Ethereum Mainnet");
        assert_eq!(data.native_currency.unwrap().symbol, "ETH");
    }

    #[test]
    fn test_localhost_network_id_differs_from_chain_id() {
        let data = get_chain_data(Some(LOCALHOST_CHAIN_ID));
        assert_eq!(data.chain_id, 1337);
        assert_eq!(data.network_id, 5777);
    }

    #[test]
    fn test_unknown_or_missing_id_is_empty() {
        assert!(get_chain_data(None).is_empty());
        assert!(get_chain_data(Some(0)).is_empty());
        assert!(get_chain_data(Some(u64::MAX)).is_empty());
    }
}
