//! Chain client binding.
//!
//! The client is the factory for providers. Stores receive it explicitly via
//! [`ClientBinding`] together with the host's injected wallet, if any.

use std::{fmt, sync::Arc};

use super::{
    injected::{Eip1193Provider, InjectedProvider},
    provider::{ChainProvider, RpcProvider},
};
use crate::error::{AppError, Result};

/// Factory for network providers.
pub trait ChainClient: Send + Sync + fmt::Debug {
    /// Version marker. A client without one is treated as missing.
    fn version(&self) -> Option<&str>;

    /// Wrap an injected wallet into a provider.
    fn browser_provider(&self, handle: Arc<dyn Eip1193Provider>) -> Result<Arc<dyn ChainProvider>>;

    /// Provider for a JSON-RPC endpoint.
    fn json_rpc_provider(&self, url: &str) -> Result<Arc<dyn ChainProvider>>;
}

/// Client backed by alloy's HTTP provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyClient;

impl AlloyClient {
    pub fn new() -> Self {
        Self
    }
}

impl ChainClient for AlloyClient {
    fn version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn browser_provider(&self, handle: Arc<dyn Eip1193Provider>) -> Result<Arc<dyn ChainProvider>> {
        Ok(Arc::new(InjectedProvider::new(handle)))
    }

    fn json_rpc_provider(&self, url: &str) -> Result<Arc<dyn ChainProvider>> {
        Ok(Arc::new(RpcProvider::new(url)?))
    }
}

/// Host bindings a store works against: the chain client and the wallet the
/// host injected, if any.
#[derive(Debug, Clone, Default)]
pub struct ClientBinding {
    client: Option<Arc<dyn ChainClient>>,
    injected_wallet: Option<Arc<dyn Eip1193Provider>>,
}

impl ClientBinding {
    /// Bind `client`. A missing client is logged; operations needing it fail later.
    pub fn new(client: Option<Arc<dyn ChainClient>>) -> Self {
        if client.is_none() {
            tracing::error!("No chain client bound. Please provide a client library");
        }
        Self { client, injected_wallet: None }
    }

    /// Binding with the default alloy client.
    pub fn alloy() -> Self {
        Self::new(Some(Arc::new(AlloyClient::new())))
    }

    /// Attach the wallet the host injected.
    pub fn with_injected_wallet(mut self, wallet: Arc<dyn Eip1193Provider>) -> Self {
        self.injected_wallet = Some(wallet);
        self
    }

    /// The bound client, failing fast when it is missing or has no version marker.
    pub fn client(&self) -> Result<&Arc<dyn ChainClient>> {
        self.client.as_ref().filter(|c| c.version().is_some()).ok_or(AppError::ClientUnavailable)
    }

    /// The injected wallet. Its absence is logged, not raised.
    pub fn injected_wallet(&self) -> Option<Arc<dyn Eip1193Provider>> {
        if self.injected_wallet.is_none() {
            tracing::error!("No injected Ethereum wallet found");
        }
        self.injected_wallet.clone()
    }
}
