//! Chain Store Library
//!
//! Reactive wallet, provider and network state for Ethereum clients.
//! A chain store publishes a complete connection snapshot every time the
//! connection changes; derived stores expose each field, and contract
//! stores follow a signer or provider store.
//!
//! # Features
//!
//! - **Browser wallets**: Connect through an injected EIP-1193 wallet and
//!   follow its account, chain and disconnect events
//! - **JSON-RPC endpoints**: Connect over HTTP with node accounts or a local wallet
//! - **Chain metadata**: Static lookup of names, currencies and endpoints by chain id
//! - **Contract stores**: Contract handles rebuilt whenever the signer or provider changes
//!
//! # Example
//!
//! ```rust,ignore
//! use chain_store::{create_chain_store, ClientBinding, Readable, SignerSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = create_chain_store(ClientBinding::alloy(), "main");
//!     let url = "http://127.0.0.1:8545";
//!     let session = store.connect_json_rpc_provider(url, SignerSource::Index(0)).await?;
//!     println!("chain: {:?}", store.chain_id().get());
//!     session.change_signer(SignerSource::Index(1)).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod reactive;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
pub use ethereum::constants::*;
pub use ethereum::{all_chains, get_chain_data, ClientBinding};
pub use reactive::{Derived, Readable, Subscription, Writable};
pub use services::{
    create_chain_store, create_contract_store, get_chain_store, ChainStore, JsonRpcSession,
};
pub use types::{ChainInfo, ConnectionState, Network, SignerSelector, SignerSource};
