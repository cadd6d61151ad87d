//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::{env, sync::Arc};

use crate::{
    error::{AppError, Result},
    ethereum::{
        constants::{DEFAULT_SIGNER_INDEX, DEFAULT_STORE_KEY},
        LocalWallet,
    },
    types::SignerSource,
};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Optional private key for a local wallet signer (hex string, 0x prefix optional).
    pub private_key: Option<String>,
    /// Account index used when no private key is configured.
    pub signer_index: usize,
    /// Key the chain store is registered under.
    pub store_key: String,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ETHEREUM_RPC_URL`: Ethereum JSON-RPC endpoint
    ///
    /// Optional environment variables:
    /// - `ETHEREUM_PRIVATE_KEY`: Private key for a local wallet signer (hex)
    /// - `SIGNER_INDEX`: Node account index to sign with (default: 0)
    /// - `CHAIN_STORE_KEY`: Registry key for the chain store (default: main)
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let rpc_url = env::var("ETHEREUM_RPC_URL").map_err(|_| {
            AppError::Config("ETHEREUM_RPC_URL environment variable not set".into())
        })?;

        let private_key = env::var("ETHEREUM_PRIVATE_KEY").ok().filter(|k| !k.trim().is_empty());

        let signer_index = match env::var("SIGNER_INDEX") {
            Ok(raw) => raw.trim().parse::<usize>()?,
            Err(_) => DEFAULT_SIGNER_INDEX,
        };

        let store_key =
            env::var("CHAIN_STORE_KEY").unwrap_or_else(|_| DEFAULT_STORE_KEY.to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self { rpc_url, private_key, signer_index, store_key, log_level })
    }

    /// Signer to attach after connecting: the configured wallet if any,
    /// otherwise the node account at `signer_index`.
    pub fn signer_source(&self) -> Result<SignerSource> {
        match &self.private_key {
            Some(key) => Ok(SignerSource::Wallet(Arc::new(LocalWallet::from_private_key(key)?))),
            None => Ok(SignerSource::Index(self.signer_index)),
        }
    }
}
