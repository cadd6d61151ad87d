//! Process-wide registry of named chain stores.

use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex, MutexGuard, PoisonError},
};

use tracing::warn;

use super::ChainStore;
use crate::{
    error::{AppError, Result},
    ethereum::ClientBinding,
};

static CHAIN_STORES: LazyLock<Mutex<HashMap<String, ChainStore>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn stores() -> MutexGuard<'static, HashMap<String, ChainStore>> {
    CHAIN_STORES.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create a chain store and, if `key` is non-empty, register it under `key`.
///
/// Registering an existing key replaces the previous store with a warning.
pub fn create_chain_store(binding: ClientBinding, key: &str) -> ChainStore {
    let store = ChainStore::new(binding, key);
    save_chain_store(key, &store);
    store
}

/// Look up a store previously registered under `key`.
///
/// # Errors
/// Returns [`AppError::StoreNotFound`] if no store has that key.
pub fn get_chain_store(key: &str) -> Result<ChainStore> {
    stores().get(key).cloned().ok_or_else(|| AppError::StoreNotFound(key.to_string()))
}

/// Keys of every registered store, sorted.
pub fn chain_store_keys() -> Vec<String> {
    let mut keys: Vec<String> = stores().keys().cloned().collect();
    keys.sort();
    keys
}

fn save_chain_store(key: &str, store: &ChainStore) {
    if key.is_empty() {
        return;
    }
    if stores().insert(key.to_string(), store.clone()).is_some() {
        warn!(key = %key, "Chain store name already exists, overwriting");
    }
}
