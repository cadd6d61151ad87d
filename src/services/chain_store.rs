//! Chain store: reactive connection state for one wallet or endpoint.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use alloy::primitives::Address;
use serde_json::json;
use tokio::runtime::Handle;
use tracing::{debug, error, info};

use crate::{
    error::{AppError, Result},
    ethereum::{
        constants::ETH_REQUEST_ACCOUNTS, ChainProvider, ChainSigner, ClientBinding,
        Eip1193Provider, WalletEvent,
    },
    reactive::{Derived, Readable, Writable},
    types::{ChainInfo, ConnectionState, Network, SignerSelector, SignerSource},
};

/// Holds one [`ConnectionState`] and republishes it on every change.
///
/// Each setup takes a generation ticket when it starts and may only publish
/// while its ticket is the newest, so a slow setup that was superseded by a
/// later one never overwrites the later result.
#[derive(Clone)]
pub struct ChainStore {
    inner: Arc<Inner>,
}

struct Inner {
    key: String,
    binding: ClientBinding,
    state: Writable<ConnectionState>,
    generation: AtomicU64,
    provider: Derived<Option<Arc<dyn ChainProvider>>>,
    signer: Derived<Option<Arc<dyn ChainSigner>>>,
    account: Derived<Option<Address>>,
    all_accounts: Derived<Vec<Address>>,
    network: Derived<Option<Network>>,
    chain_id: Derived<Option<u64>>,
    chain_data: Derived<ChainInfo>,
}

impl ChainStore {
    /// Create a disconnected store. Use [`crate::services::create_chain_store`]
    /// to also register it by name.
    pub fn new(binding: ClientBinding, key: &str) -> Self {
        let state = Writable::new(ConnectionState::default());

        let inner = Inner {
            key: key.to_string(),
            binding,
            generation: AtomicU64::new(0),
            provider: Derived::new(state.clone(), |s: &ConnectionState| s.provider.clone()),
            signer: Derived::new(state.clone(), |s: &ConnectionState| s.signer.clone()),
            account: Derived::new(state.clone(), |s: &ConnectionState| s.account),
            all_accounts: Derived::new(state.clone(), |s: &ConnectionState| s.all_accounts.clone()),
            network: Derived::new(state.clone(), |s: &ConnectionState| s.network.clone()),
            chain_id: Derived::new(state.clone(), |s: &ConnectionState| s.chain_id),
            chain_data: Derived::new(state.clone(), |s: &ConnectionState| s.chain_data.clone()),
            state,
        };

        Self { inner: Arc::new(inner) }
    }

    /// Registry key, empty for unregistered stores.
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The underlying state store.
    pub fn store(&self) -> &Writable<ConnectionState> {
        &self.inner.state
    }

    pub fn provider(&self) -> &Derived<Option<Arc<dyn ChainProvider>>> {
        &self.inner.provider
    }

    pub fn signer(&self) -> &Derived<Option<Arc<dyn ChainSigner>>> {
        &self.inner.signer
    }

    pub fn account(&self) -> &Derived<Option<Address>> {
        &self.inner.account
    }

    pub fn all_accounts(&self) -> &Derived<Vec<Address>> {
        &self.inner.all_accounts
    }

    pub fn network(&self) -> &Derived<Option<Network>> {
        &self.inner.network
    }

    pub fn chain_id(&self) -> &Derived<Option<u64>> {
        &self.inner.chain_id
    }

    pub fn chain_data(&self) -> &Derived<ChainInfo> {
        &self.inner.chain_data
    }

    /// True when both handles refer to the same store.
    pub fn ptr_eq(&self, other: &ChainStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Connect through an injected browser wallet.
    ///
    /// Falls back to the binding's injected wallet when `handle` is `None`.
    /// The wallet must support event subscription; this is checked before
    /// any request is sent. Listeners for `accountsChanged`, `chainChanged`
    /// and `disconnect` re-run the setup, replacing any listeners registered
    /// by an earlier call.
    ///
    /// Setup failures do not surface here: they are logged and the store is
    /// reset to the disconnected state.
    ///
    /// # Errors
    /// Returns an error if no client is bound, it is not polled inside a
    /// Tokio runtime, no wallet is available, the wallet cannot emit events,
    /// or the account access request fails.
    pub async fn connect_browser_provider(
        &self,
        handle: Option<Arc<dyn Eip1193Provider>>,
    ) -> Result<()> {
        self.inner.binding.client()?;
        let runtime = Handle::try_current().map_err(|e| AppError::Runtime(e.to_string()))?;

        let handle = match handle {
            Some(handle) => handle,
            None => self.inner.binding.injected_wallet().ok_or(AppError::WalletNotFound)?,
        };

        let capabilities = handle.capabilities();
        if !capabilities.events {
            return Err(AppError::InvalidProvider(
                "a valid web3 provider must support `on` as defined in EIP-1193".into(),
            ));
        }

        if capabilities.request {
            handle.request(ETH_REQUEST_ACCOUNTS, json!([])).await?;
        }

        if capabilities.remove_listeners {
            handle.remove_all_listeners();
        }

        for event in WalletEvent::ALL {
            let store = Arc::downgrade(&self.inner);
            let wallet = Arc::downgrade(&handle);
            let runtime = runtime.clone();
            handle.on(
                event,
                Arc::new(move |event: WalletEvent| {
                    let (Some(inner), Some(wallet)) = (store.upgrade(), wallet.upgrade()) else {
                        return;
                    };
                    debug!(event = %event, "Wallet event received, re-deriving chain state");
                    runtime.spawn(async move { ChainStore { inner }.setup_browser(wallet).await });
                }),
            );
        }

        self.setup_browser(handle).await;
        Ok(())
    }

    /// Connect to a JSON-RPC endpoint and attach the signer described by `source`.
    ///
    /// The returned session re-resolves signers against the same connection.
    ///
    /// # Errors
    /// Returns an error if no client is bound or the setup fails. A failed
    /// setup also resets the store to the disconnected state.
    pub async fn connect_json_rpc_provider(
        &self,
        url: &str,
        source: impl Into<SignerSource>,
    ) -> Result<JsonRpcSession> {
        let client = Arc::clone(self.inner.binding.client()?);
        let ticket = self.begin();

        let setup = async {
            let provider = client.json_rpc_provider(url)?;
            let all_accounts = provider.list_accounts().await?;
            let network = provider.get_network().await?;
            let base = ConnectionState::connected(provider, None, None, all_accounts, network);

            let session = JsonRpcSession { store: self.clone(), base };
            session.apply_signer(ticket, source.into()).await?;
            Ok::<_, AppError>(session)
        };

        match setup.await {
            Ok(session) => {
                info!(
                    key = %self.key(),
                    url = %url,
                    chain_id = ?session.base.chain_id,
                    "Connected to JSON-RPC provider"
                );
                Ok(session)
            }
            Err(e) => {
                error!(
                    key = %self.key(),
                    url = %url,
                    error = %e,
                    "An error occurred when setting up the JSON-RPC provider"
                );
                self.publish(ticket, ConnectionState::default());
                Err(e)
            }
        }
    }

    /// Take a new generation ticket, superseding every setup in flight.
    fn begin(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `state` if `ticket` is still the newest.
    fn publish(&self, ticket: u64, state: ConnectionState) -> bool {
        let generation = &self.inner.generation;
        let published =
            self.inner.state.publish_if(state, || generation.load(Ordering::SeqCst) == ticket);
        if !published {
            debug!(key = %self.key(), ticket = ticket, "Discarding state from a superseded setup");
        }
        published
    }

    /// Re-derive the whole state from the wallet. Never fails: errors reset
    /// the store to the disconnected state.
    async fn setup_browser(&self, handle: Arc<dyn Eip1193Provider>) {
        let ticket = self.begin();

        match self.derive_browser_state(handle).await {
            Ok(state) => {
                let chain_id = state.chain_id;
                let account = state.account;
                if self.publish(ticket, state) {
                    info!(
                        key = %self.key(),
                        chain_id = ?chain_id,
                        account = ?account,
                        "Browser provider connected"
                    );
                }
            }
            Err(e) => {
                error!(
                    key = %self.key(),
                    error = %e,
                    "An error occurred when setting up the browser provider"
                );
                self.publish(ticket, ConnectionState::default());
            }
        }
    }

    async fn derive_browser_state(
        &self,
        handle: Arc<dyn Eip1193Provider>,
    ) -> Result<ConnectionState> {
        let client = self.inner.binding.client()?;
        let provider = client.browser_provider(handle)?;
        let signer = resolve_signer(&provider, SignerSelector::Default).await;
        let account = resolve_address(signer.as_ref()).await;
        let all_accounts = provider.list_accounts().await?;
        let network = provider.get_network().await?;

        Ok(ConnectionState::connected(provider, signer, account, all_accounts, network))
    }
}

impl std::fmt::Debug for ChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainStore")
            .field("key", &self.inner.key)
            .field("state", &self.inner.state.get().summary())
            .finish()
    }
}

/// Handle returned by [`ChainStore::connect_json_rpc_provider`].
#[derive(Debug, Clone)]
pub struct JsonRpcSession {
    store: ChainStore,
    /// Connection without a signer.
    base: ConnectionState,
}

impl JsonRpcSession {
    /// Replace the signer. Wallets are connected to the provider directly;
    /// other sources are resolved by the provider. Resolution failures leave
    /// the signer and account empty.
    ///
    /// # Errors
    /// Returns [`AppError::NoProvider`] if the session has no provider. The
    /// published state is left untouched in that case.
    pub async fn change_signer(&self, source: impl Into<SignerSource>) -> Result<()> {
        let ticket = self.store.begin();
        self.apply_signer(ticket, source.into()).await
    }

    /// The store this session publishes to.
    pub fn store(&self) -> &ChainStore {
        &self.store
    }

    async fn apply_signer(&self, ticket: u64, source: SignerSource) -> Result<()> {
        let provider = self.base.provider.clone().ok_or(AppError::NoProvider)?;

        let signer = match &source {
            SignerSource::Wallet(wallet) => Some(wallet.connect(Arc::clone(&provider))),
            other => match other.selector() {
                Some(selector) => resolve_signer(&provider, selector).await,
                None => None,
            },
        };
        let account = resolve_address(signer.as_ref()).await;

        debug!(source = ?source, account = ?account, "Signer resolved");
        self.store.publish(ticket, self.base.with_signer(signer, account));
        Ok(())
    }
}

/// Signer for `selector`, or `None` if the provider cannot produce one.
async fn resolve_signer(
    provider: &Arc<dyn ChainProvider>,
    selector: SignerSelector,
) -> Option<Arc<dyn ChainSigner>> {
    match provider.get_signer(selector).await {
        Ok(signer) => Some(signer),
        Err(e) => {
            debug!(selector = ?selector, error = %e, "No signer available");
            None
        }
    }
}

/// Address of `signer`, or `None` if there is no signer or it cannot tell.
async fn resolve_address(signer: Option<&Arc<dyn ChainSigner>>) -> Option<Address> {
    let signer = signer?;
    match signer.get_address().await {
        Ok(address) => Some(address),
        Err(e) => {
            debug!(error = %e, "Signer address unavailable");
            None
        }
    }
}
