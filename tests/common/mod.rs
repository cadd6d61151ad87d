//! Common utilities for integration tests.
#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use alloy::{
    primitives::{address, Address, Bytes},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use chain_store::{
    ethereum::{
        AccountSigner, Capabilities, ChainClient, ChainProvider, ChainSigner, Eip1193Provider,
        Listener, WalletEvent,
    },
    AppError, ClientBinding, Config, Network, Readable, Result, SignerSelector,
};
use serde_json::{json, Value};
use tokio::sync::Notify;

pub const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Hardhat account #0 key; derives to [`ALICE`].
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[derive(Debug, Default)]
struct ProviderState {
    accounts: Vec<Address>,
    chain_id: u64,
    fail_list_accounts: bool,
    gate: Option<Arc<Notify>>,
    call_output: Bytes,
    list_calls: AtomicUsize,
}

/// Scripted provider.
#[derive(Debug, Clone)]
pub struct MockProvider(Arc<ProviderState>);

impl MockProvider {
    pub fn new(chain_id: u64, accounts: Vec<Address>) -> Self {
        Self(Arc::new(ProviderState { accounts, chain_id, ..Default::default() }))
    }

    /// Provider whose account listing fails.
    pub fn failing(chain_id: u64) -> Self {
        Self(Arc::new(ProviderState { chain_id, fail_list_accounts: true, ..Default::default() }))
    }

    /// Provider whose account listing waits for `gate` to be notified.
    pub fn gated(chain_id: u64, accounts: Vec<Address>, gate: Arc<Notify>) -> Self {
        Self(Arc::new(ProviderState { accounts, chain_id, gate: Some(gate), ..Default::default() }))
    }

    /// Provider answering every `eth_call` with `output`.
    pub fn with_call_output(chain_id: u64, output: Vec<u8>) -> Self {
        Self(Arc::new(ProviderState { chain_id, call_output: output.into(), ..Default::default() }))
    }

    pub fn list_calls(&self) -> usize {
        self.0.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainProvider for MockProvider {
    async fn list_accounts(&self) -> Result<Vec<Address>> {
        self.0.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.0.gate {
            gate.notified().await;
        }
        if self.0.fail_list_accounts {
            return Err(AppError::Rpc("eth_accounts failed".into()));
        }
        Ok(self.0.accounts.clone())
    }

    async fn get_network(&self) -> Result<Network> {
        Ok(Network::from_chain_id(self.0.chain_id))
    }

    async fn get_signer(&self, selector: SignerSelector) -> Result<Arc<dyn ChainSigner>> {
        let provider: Arc<dyn ChainProvider> = Arc::new(self.clone());
        let address = match selector {
            SignerSelector::Address(address) => address,
            SignerSelector::Default => *self.0.accounts.first().ok_or_else(no_account)?,
            SignerSelector::Index(i) => *self.0.accounts.get(i).ok_or_else(no_account)?,
        };
        Ok(Arc::new(AccountSigner::new(address, provider)))
    }

    async fn call(&self, _tx: &TransactionRequest) -> Result<Bytes> {
        Ok(self.0.call_output.clone())
    }
}

fn no_account() -> AppError {
    AppError::Signer("no such account".into())
}

/// Client handing out scripted providers in order; the last one is reused.
#[derive(Debug)]
pub struct MockClient {
    providers: Mutex<VecDeque<MockProvider>>,
}

impl MockClient {
    pub fn new(providers: Vec<MockProvider>) -> Arc<Self> {
        Arc::new(Self { providers: Mutex::new(providers.into()) })
    }

    fn next_provider(&self) -> Result<Arc<dyn ChainProvider>> {
        let mut providers = self.providers.lock().unwrap();
        let provider =
            if providers.len() > 1 { providers.pop_front() } else { providers.front().cloned() };
        provider
            .map(|p| Arc::new(p) as Arc<dyn ChainProvider>)
            .ok_or_else(|| AppError::Rpc("no provider scripted".into()))
    }
}

impl ChainClient for MockClient {
    fn version(&self) -> Option<&str> {
        Some("mock")
    }

    fn browser_provider(
        &self,
        _handle: Arc<dyn Eip1193Provider>,
    ) -> Result<Arc<dyn ChainProvider>> {
        self.next_provider()
    }

    fn json_rpc_provider(&self, _url: &str) -> Result<Arc<dyn ChainProvider>> {
        self.next_provider()
    }
}

/// Binding over a [`MockClient`] serving `providers`.
pub fn binding(providers: Vec<MockProvider>) -> ClientBinding {
    let client: Arc<dyn ChainClient> = MockClient::new(providers);
    ClientBinding::new(Some(client))
}

/// Injected wallet that records requests and lets tests fire events.
pub struct MockWallet {
    capabilities: Capabilities,
    listeners: Mutex<Vec<(WalletEvent, Listener)>>,
    requests: Mutex<Vec<String>>,
}

impl MockWallet {
    pub fn new() -> Arc<Self> {
        Self::with_capabilities(Capabilities::FULL)
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Arc<Self> {
        Arc::new(Self {
            capabilities,
            listeners: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Call every listener registered for `event`.
    pub fn emit(&self, event: WalletEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for MockWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockWallet").field("capabilities", &self.capabilities).finish()
    }
}

#[async_trait]
impl Eip1193Provider for MockWallet {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    async fn request(&self, method: &str, _params: Value) -> Result<Value> {
        self.requests.lock().unwrap().push(method.to_string());
        Ok(json!([ALICE]))
    }

    fn on(&self, event: WalletEvent, listener: Listener) {
        self.listeners.lock().unwrap().push((event, listener));
    }

    fn remove_all_listeners(&self) {
        self.listeners.lock().unwrap().clear();
    }
}

/// Wait until `store` holds a value matching `predicate`.
pub async fn wait_for<T, S>(store: &S, predicate: impl Fn(&T) -> bool) -> T
where
    S: Readable<T>,
{
    let mut sub = store.subscribe();
    let wait = async {
        loop {
            let value = sub.current();
            if predicate(&value) {
                return value;
            }
            sub.next().await.expect("store closed");
        }
    };
    tokio::time::timeout(Duration::from_secs(2), wait).await.expect("timed out waiting for store")
}

/// Config for live tests, `None` when the endpoint is not configured.
pub fn live_config() -> Option<Config> {
    let _ = dotenvy::dotenv();
    let rpc_url = std::env::var("ETHEREUM_RPC_URL").ok().filter(|u| !u.is_empty())?;

    Some(Config {
        rpc_url,
        private_key: None,
        signer_index: 0,
        store_key: "live".to_string(),
        log_level: "warn".to_string(),
    })
}

/// Skip test if the live endpoint is not configured.
#[macro_export]
macro_rules! skip_if_no_rpc {
    () => {
        match common::live_config() {
            Some(config) => config,
            None => {
                eprintln!("Skipping test: ETHEREUM_RPC_URL not set");
                return;
            }
        }
    };
}
