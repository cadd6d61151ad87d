//! Browser-injected wallets (EIP-1193).
//!
//! A host embedding this crate hands over its injected wallet object as an
//! [`Eip1193Provider`]. [`InjectedProvider`] turns it into a [`ChainProvider`].

use std::{fmt, sync::Arc};

use alloy::{
    primitives::{Address, Bytes, U64},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{
    constants::{ETH_ACCOUNTS, ETH_CALL, ETH_CHAIN_ID},
    provider::{AccountSigner, ChainProvider, ChainSigner},
};
use crate::{
    error::{AppError, Result},
    types::{Network, SignerSelector},
};

/// Events a wallet emits when its connection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletEvent {
    AccountsChanged,
    ChainChanged,
    Disconnect,
}

impl WalletEvent {
    /// Every event a chain store listens to.
    pub const ALL: [WalletEvent; 3] =
        [WalletEvent::AccountsChanged, WalletEvent::ChainChanged, WalletEvent::Disconnect];

    /// EIP-1193 event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletEvent::AccountsChanged => "accountsChanged",
            WalletEvent::ChainChanged => "chainChanged",
            WalletEvent::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for WalletEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback registered for wallet events.
pub type Listener = Arc<dyn Fn(WalletEvent) + Send + Sync>;

/// Optional parts of the EIP-1193 surface a wallet actually implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Supports `on(event, listener)`.
    pub events: bool,
    /// Supports `request({ method, params })`.
    pub request: bool,
    /// Supports `removeAllListeners()`.
    pub remove_listeners: bool,
}

impl Capabilities {
    /// A wallet implementing the whole surface.
    pub const FULL: Capabilities =
        Capabilities { events: true, request: true, remove_listeners: true };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// Injected wallet object, as exposed by browser extensions.
#[async_trait]
pub trait Eip1193Provider: Send + Sync + fmt::Debug {
    /// Which optional methods the wallet supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::FULL
    }

    /// Send a JSON-RPC request through the wallet.
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// Register `listener` for `event`.
    fn on(&self, event: WalletEvent, listener: Listener);

    /// Drop every registered listener.
    fn remove_all_listeners(&self) {}
}

/// [`ChainProvider`] backed by an injected wallet.
#[derive(Debug, Clone)]
pub struct InjectedProvider {
    handle: Arc<dyn Eip1193Provider>,
}

impl InjectedProvider {
    /// Wrap an injected wallet handle.
    pub fn new(handle: Arc<dyn Eip1193Provider>) -> Self {
        Self { handle }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        if !self.handle.capabilities().request {
            return Err(AppError::InvalidProvider(format!(
                "wallet does not support requests (needed for {method})"
            )));
        }
        self.handle.request(method, params).await
    }
}

#[async_trait]
impl ChainProvider for InjectedProvider {
    async fn list_accounts(&self) -> Result<Vec<Address>> {
        let value = self.request(ETH_ACCOUNTS, json!([])).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_network(&self) -> Result<Network> {
        let value = self.request(ETH_CHAIN_ID, json!([])).await?;
        Ok(Network::from_chain_id(parse_quantity(value)?))
    }

    async fn get_signer(&self, selector: SignerSelector) -> Result<Arc<dyn ChainSigner>> {
        let provider: Arc<dyn ChainProvider> = Arc::new(self.clone());
        Ok(Arc::new(AccountSigner::resolve(provider, selector).await?))
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        let tx = serde_json::to_value(tx)?;
        let value = self.request(ETH_CALL, json!([tx, "latest"])).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Parse a `0x`-prefixed JSON-RPC quantity.
pub fn parse_quantity(value: Value) -> Result<u64> {
    Ok(serde_json::from_value::<U64>(value)?.to::<u64>())
}
