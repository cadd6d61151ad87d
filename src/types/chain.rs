//! Chain metadata types.

use serde::{Deserialize, Serialize};

/// Native currency of a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Currency name (e.g., "Ether").
    pub name: String,
    /// Currency symbol (e.g., "ETH").
    pub symbol: String,
    /// Number of decimals.
    pub decimals: u8,
}

/// Block explorer entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Explorer {
    pub name: String,
    pub url: String,
    pub standard: String,
}

/// Descriptive metadata for one chain, in the chainid.network list format.
///
/// The default value is the empty record returned for unknown chains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainInfo {
    /// Human-readable name (e.g., "Ethereum Mainnet").
    pub name: String,
    /// Chain family ticker (e.g., "ETH").
    pub chain: String,
    /// Public RPC endpoints.
    pub rpc: Vec<String>,
    /// Faucet URLs, mostly for testnets.
    pub faucets: Vec<String>,
    /// Native currency, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<NativeCurrency>,
    /// Project homepage.
    #[serde(rename = "infoURL")]
    pub info_url: String,
    /// Short name (e.g., "eth").
    pub short_name: String,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Network id, usually equal to the chain id.
    pub network_id: u64,
    /// Block explorers.
    pub explorers: Vec<Explorer>,
}

impl ChainInfo {
    /// True for the empty record used when a chain is unknown.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_info_default_is_empty() {
        assert!(ChainInfo::default().is_empty());
    }

    #[test]
    fn test_chain_info_deserialize_partial_record() {
        let json = r#"{
            "name": "Ethereum Mainnet",
            "chain": "ETH",
            "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
            "infoURL": "https://ethereum.org",
            "shortName": "eth",
            "chainId": 1,
            "networkId": 1
        }"#;

        let info: ChainInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.chain_id, 1);
        assert_eq!(info.short_name, "eth");
        assert_eq!(info.info_url, "https://ethereum.org");
        assert_eq!(info.native_currency.as_ref().map(|c| c.decimals), Some(18));
        assert!(info.rpc.is_empty());
        assert!(!info.is_empty());
    }
}
