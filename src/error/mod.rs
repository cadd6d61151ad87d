//! Error types and handling module.
//!
//! Defines all crate-specific error types and conversions.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The chain client library was never bound, or reports no version.
    #[error("Cannot find the chain client library. Please make sure a client is bound")]
    ClientUnavailable,

    /// No wallet handle was passed and none is injected by the host.
    #[error("Web3 provider (MetaMask or similar) not found. Please install it")]
    WalletNotFound,

    /// The wallet handle lacks a capability required for the operation.
    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    /// An operation needed a provider but the store has none.
    #[error("There is no provider for this signer")]
    NoProvider,

    /// Event listeners need a Tokio runtime to spawn setups on.
    #[error("No Tokio runtime available: {0}")]
    Runtime(String),

    /// No chain store was registered under the given key.
    #[error("Chain store {0} does not exist")]
    StoreNotFound(String),

    /// Contract store construction arguments were rejected.
    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// ABI lookup, encoding or decoding failure.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Signer resolution errors.
    #[error("Signer error: {0}")]
    Signer(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::dyn_abi::Error> for AppError {
    fn from(err: alloy::dyn_abi::Error) -> Self {
        AppError::Abi(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
