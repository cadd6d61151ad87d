//! Store services module.

pub mod chain_store;
pub mod contract_store;
pub mod registry;

pub use chain_store::{ChainStore, JsonRpcSession};
pub use contract_store::create_contract_store;
pub use registry::{chain_store_keys, create_chain_store, get_chain_store};
