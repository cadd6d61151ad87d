//! Local private-key wallet.

use std::sync::Arc;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use async_trait::async_trait;

use super::provider::{ChainProvider, ChainSigner, Wallet};
use crate::error::{AppError, Result};

/// Wallet holding its own private key.
#[derive(Clone)]
pub struct LocalWallet {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
    /// Provider the wallet is connected to.
    provider: Option<Arc<dyn ChainProvider>>,
}

impl LocalWallet {
    /// Create a disconnected wallet from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        // Remove 0x prefix if present
        let key = private_key.strip_prefix("0x").unwrap_or(private_key);

        let signer: PrivateKeySigner =
            key.parse().map_err(|e: alloy::signers::local::LocalSignerError| {
                AppError::Wallet(e.to_string())
            })?;

        let address = signer.address();

        tracing::info!(address = %address, "Wallet initialized");

        Ok(Self { signer, address, provider: None })
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the signer for transaction signing.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

#[async_trait]
impl ChainSigner for LocalWallet {
    async fn get_address(&self) -> Result<Address> {
        Ok(self.address)
    }

    fn provider(&self) -> Option<Arc<dyn ChainProvider>> {
        self.provider.clone()
    }
}

impl Wallet for LocalWallet {
    fn connect(&self, provider: Arc<dyn ChainProvider>) -> Arc<dyn ChainSigner> {
        Arc::new(Self { provider: Some(provider), ..self.clone() })
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .field("connected", &self.provider.is_some())
            .finish()
    }
}
