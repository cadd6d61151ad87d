//! Ethereum interaction module.
//!
//! Contains the client binding, provider and signer abstractions, wallet
//! adapters, chain metadata and contract handles.

pub mod chains;
pub mod client;
pub mod constants;
pub mod contract;
pub mod injected;
pub mod provider;
pub mod wallet;

pub use chains::{all_chains, get_chain_data};
pub use client::{AlloyClient, ChainClient, ClientBinding};
pub use contract::{parse_abi, AsRunner, Contract, ContractRunner};
pub use injected::{Capabilities, Eip1193Provider, InjectedProvider, Listener, WalletEvent};
pub use provider::{AccountSigner, ChainProvider, ChainSigner, HttpProvider, RpcProvider, Wallet};
pub use wallet::LocalWallet;
