//! Connection state published by a chain store.

use std::{fmt, sync::Arc};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use super::ChainInfo;
use crate::ethereum::{
    chains::get_chain_data,
    provider::{ChainProvider, ChainSigner, Wallet},
};

/// Network descriptor reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Network name, "unknown" when the chain is not in the metadata table.
    pub name: String,
    /// EIP-155 chain id.
    pub chain_id: u64,
}

impl Network {
    /// Build a descriptor for `chain_id`, naming it from the metadata table.
    pub fn from_chain_id(chain_id: u64) -> Self {
        let info = get_chain_data(Some(chain_id));
        let name = if info.short_name.is_empty() { "unknown".to_string() } else { info.short_name };
        Self { name, chain_id }
    }
}

/// How to pick an account-backed signer from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignerSelector {
    /// The provider's first account.
    #[default]
    Default,
    /// Account at this position in the provider's account list.
    Index(usize),
    /// A specific account.
    Address(Address),
}

/// Signer requested when connecting over JSON-RPC or changing signers.
#[derive(Clone, Default)]
pub enum SignerSource {
    /// The provider's first account.
    #[default]
    Default,
    /// Account at this position in the provider's account list.
    Index(usize),
    /// A specific account.
    Address(Address),
    /// A wallet holding its own key, connected to the provider directly.
    Wallet(Arc<dyn Wallet>),
}

impl SignerSource {
    /// Selector for provider-resolved signers, `None` for wallets.
    pub fn selector(&self) -> Option<SignerSelector> {
        match self {
            Self::Default => Some(SignerSelector::Default),
            Self::Index(index) => Some(SignerSelector::Index(*index)),
            Self::Address(address) => Some(SignerSelector::Address(*address)),
            Self::Wallet(_) => None,
        }
    }
}

impl fmt::Debug for SignerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Index(index) => f.debug_tuple("Index").field(index).finish(),
            Self::Address(address) => f.debug_tuple("Address").field(address).finish(),
            Self::Wallet(wallet) => f.debug_tuple("Wallet").field(wallet).finish(),
        }
    }
}

impl From<usize> for SignerSource {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Address> for SignerSource {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<Arc<dyn Wallet>> for SignerSource {
    fn from(wallet: Arc<dyn Wallet>) -> Self {
        Self::Wallet(wallet)
    }
}

/// Snapshot of a chain store's connection.
///
/// Always replaced as a whole. The default value is the disconnected state.
#[derive(Debug, Clone, Default)]
pub struct ConnectionState {
    pub provider: Option<Arc<dyn ChainProvider>>,
    pub signer: Option<Arc<dyn ChainSigner>>,
    pub account: Option<Address>,
    pub all_accounts: Vec<Address>,
    pub network: Option<Network>,
    pub chain_id: Option<u64>,
    pub chain_data: ChainInfo,
}

impl ConnectionState {
    /// Build a connected snapshot. `chain_id` and `chain_data` are derived
    /// from `network`.
    pub fn connected(
        provider: Arc<dyn ChainProvider>,
        signer: Option<Arc<dyn ChainSigner>>,
        account: Option<Address>,
        all_accounts: Vec<Address>,
        network: Network,
    ) -> Self {
        let chain_id = Some(network.chain_id);
        Self {
            provider: Some(provider),
            signer,
            account,
            all_accounts,
            network: Some(network),
            chain_id,
            chain_data: get_chain_data(chain_id),
        }
    }

    /// Same connection with a different signer.
    pub fn with_signer(
        &self,
        signer: Option<Arc<dyn ChainSigner>>,
        account: Option<Address>,
    ) -> Self {
        Self { signer, account, ..self.clone() }
    }

    /// A store is connected once it holds a provider.
    pub fn is_connected(&self) -> bool {
        self.provider.is_some()
    }

    /// Serialisable view of the snapshot, without the live handles.
    pub fn summary(&self) -> StateSummary {
        StateSummary {
            connected: self.is_connected(),
            has_signer: self.signer.is_some(),
            account: self.account,
            all_accounts: self.all_accounts.clone(),
            network: self.network.clone(),
            chain_id: self.chain_id,
            chain_name: (!self.chain_data.is_empty()).then(|| self.chain_data.name.clone()),
        }
    }
}

/// Handles compare by identity, everything else by value.
impl PartialEq for ConnectionState {
    fn eq(&self, other: &Self) -> bool {
        same_handle(self.provider.as_ref(), other.provider.as_ref())
            && same_handle(self.signer.as_ref(), other.signer.as_ref())
            && self.account == other.account
            && self.all_accounts == other.all_accounts
            && self.network == other.network
            && self.chain_id == other.chain_id
            && self.chain_data == other.chain_data
    }
}

fn same_handle<T: ?Sized>(a: Option<&Arc<T>>, b: Option<&Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        _ => false,
    }
}

/// Printable form of a [`ConnectionState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub connected: bool,
    pub has_signer: bool,
    pub account: Option<Address>,
    pub all_accounts: Vec<Address>,
    pub network: Option<Network>,
    pub chain_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethereum::constants::{ETHEREUM_MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID};

    #[test]
    fn test_default_state_is_disconnected() {
        let state = ConnectionState::default();
        assert!(!state.is_connected());
        assert!(state.all_accounts.is_empty());
        assert!(state.chain_id.is_none());
        assert!(state.chain_data.is_empty());
        assert_eq!(state, ConnectionState::default());
    }

    #[test]
    fn test_network_named_from_table() {
        let network = Network::from_chain_id(ETHEREUM_MAINNET_CHAIN_ID);
        assert_eq!(network.name, "eth");
        assert_eq!(network.chain_id, 1);

        let unknown = Network::from_chain_id(987_654_321);
        assert_eq!(unknown.name, "unknown");
    }

    #[test]
    fn test_signer_source_selector() {
        assert_eq!(SignerSource::Default.selector(), Some(SignerSelector::Default));
        assert_eq!(SignerSource::from(3usize).selector(), Some(SignerSelector::Index(3)));
        assert_eq!(
            SignerSource::from(Address::ZERO).selector(),
            Some(SignerSelector::Address(Address::ZERO))
        );
    }

    #[test]
    fn test_summary_of_default_state() {
        let summary = ConnectionState::default().summary();
        assert!(!summary.connected);
        assert!(!summary.has_signer);
        assert!(summary.chain_name.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("chain_name").is_none());
        assert!(json["network"].is_null());
    }

    #[test]
    fn test_summary_names_known_chain() {
        let state = ConnectionState {
            chain_id: Some(SEPOLIA_CHAIN_ID),
            chain_data: get_chain_data(Some(SEPOLIA_CHAIN_ID)),
            ..ConnectionState::default()
        };
        assert_eq!(state.summary().chain_name.as_deref(), Some("Sepolia"));
    }
}
