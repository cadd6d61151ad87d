//! Provider and signer abstractions, plus the alloy HTTP provider.

use std::{fmt, sync::Arc};

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

use super::constants::DEFAULT_SIGNER_INDEX;
use crate::{
    error::{AppError, Result},
    types::{Network, SignerSelector},
};

/// Type alias for the HTTP provider.
pub type HttpProvider = RootProvider<Ethereum>;

/// Read-only handle to a blockchain network endpoint.
#[async_trait]
pub trait ChainProvider: Send + Sync + fmt::Debug {
    /// Accounts the endpoint exposes, in order.
    async fn list_accounts(&self) -> Result<Vec<Address>>;

    /// Network the endpoint is connected to.
    async fn get_network(&self) -> Result<Network>;

    /// Signer for one of the endpoint's accounts.
    async fn get_signer(&self, selector: SignerSelector) -> Result<Arc<dyn ChainSigner>>;

    /// Execute a call without broadcasting it.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes>;
}

/// Handle able to authorize transactions for one account.
#[async_trait]
pub trait ChainSigner: Send + Sync + fmt::Debug {
    /// Address of the signing account.
    async fn get_address(&self) -> Result<Address>;

    /// Provider the signer is attached to, if any.
    fn provider(&self) -> Option<Arc<dyn ChainProvider>>;
}

/// A signer backed by a key held directly by the caller.
pub trait Wallet: ChainSigner {
    /// Attach the wallet to `provider`, returning the connected signer.
    fn connect(&self, provider: Arc<dyn ChainProvider>) -> Arc<dyn ChainSigner>;
}

/// Signer for an account managed by the provider itself (node or browser wallet).
#[derive(Debug, Clone)]
pub struct AccountSigner {
    address: Address,
    provider: Arc<dyn ChainProvider>,
}

impl AccountSigner {
    /// Bind `address` to `provider`.
    pub fn new(address: Address, provider: Arc<dyn ChainProvider>) -> Self {
        Self { address, provider }
    }

    /// Resolve `selector` against the provider's account list.
    pub async fn resolve(
        provider: Arc<dyn ChainProvider>,
        selector: SignerSelector,
    ) -> Result<Self> {
        let address = match selector {
            SignerSelector::Address(address) => address,
            SignerSelector::Default => {
                select_account(&provider.list_accounts().await?, DEFAULT_SIGNER_INDEX)?
            }
            SignerSelector::Index(index) => {
                select_account(&provider.list_accounts().await?, index)?
            }
        };
        Ok(Self::new(address, provider))
    }
}

#[async_trait]
impl ChainSigner for AccountSigner {
    async fn get_address(&self) -> Result<Address> {
        Ok(self.address)
    }

    fn provider(&self) -> Option<Arc<dyn ChainProvider>> {
        Some(Arc::clone(&self.provider))
    }
}

fn select_account(accounts: &[Address], index: usize) -> Result<Address> {
    accounts.get(index).copied().ok_or_else(|| {
        AppError::Signer(format!("no account at index {index} ({} available)", accounts.len()))
    })
}

/// Provider talking to a JSON-RPC endpoint over HTTP.
#[derive(Clone)]
pub struct RpcProvider {
    /// The underlying provider.
    provider: Arc<HttpProvider>,
    /// RPC URL for logging.
    rpc_url: String,
}

impl RpcProvider {
    /// Create a provider for `rpc_url`.
    ///
    /// Note: This does NOT make any network calls.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        #[allow(deprecated)]
        let provider = ProviderBuilder::new().connect_http(url).root().clone();

        tracing::info!(rpc_url = %rpc_url, "JSON-RPC provider created");

        Ok(Self { provider: Arc::new(provider), rpc_url: rpc_url.to_string() })
    }

    /// RPC URL the provider was created with.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

impl fmt::Debug for RpcProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcProvider").field("rpc_url", &self.rpc_url).finish()
    }
}

#[async_trait]
impl ChainProvider for RpcProvider {
    async fn list_accounts(&self) -> Result<Vec<Address>> {
        let accounts = self.provider.get_accounts().await?;
        Ok(accounts)
    }

    async fn get_network(&self) -> Result<Network> {
        let chain_id = self.provider.get_chain_id().await?;
        tracing::debug!(chain_id = chain_id, rpc_url = %self.rpc_url, "Fetched network");
        Ok(Network::from_chain_id(chain_id))
    }

    async fn get_signer(&self, selector: SignerSelector) -> Result<Arc<dyn ChainSigner>> {
        let provider: Arc<dyn ChainProvider> = Arc::new(self.clone());
        Ok(Arc::new(AccountSigner::resolve(provider, selector).await?))
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        let result = self.provider.call(tx.clone()).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_select_account_by_index() {
        let accounts = [
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        ];
        assert_eq!(select_account(&accounts, 1).unwrap(), accounts[1]);
    }

    #[test]
    fn test_select_account_out_of_range() {
        let result = select_account(&[], 0);
        match result {
            Err(AppError::Signer(msg)) => assert!(msg.contains("index 0")),
            other => panic!("Expected Signer error, got {other:?}"),
        }
    }

    #[test]
    fn test_rpc_provider_rejects_invalid_url() {
        let result = RpcProvider::new("not a url");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_rpc_provider_creation_is_lazy() {
        let provider = RpcProvider::new("http://127.0.0.1:1").unwrap();
        assert_eq!(provider.rpc_url(), "http://127.0.0.1:1");
        assert!(format!("{provider:?}").contains("127.0.0.1:1"));
    }
}
